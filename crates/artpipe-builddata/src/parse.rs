//! Typed parser for doozer's two-column `key: value` output.
//!
//! The resolver's correctness must not hinge on the tool's exact text
//! layout, so the schema check lives here with two distinguishable
//! failures: an empty sweep and a row the schema does not admit.

use artpipe_core::{ResolveError, ResolveResult};

pub(crate) fn parse_two_column(output: &str, subject: &str) -> ResolveResult<Vec<(String, String)>> {
    let mut rows = Vec::new();
    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(": ") else {
            return Err(ResolveError::MalformedMappingData {
                subject: subject.to_string(),
                line: line.to_string(),
            });
        };
        rows.push((key.trim().to_string(), value.trim().to_string()));
    }

    if rows.is_empty() {
        return Err(ResolveError::NullDataReturned {
            subject: subject.to_string(),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_split_on_the_first_separator() {
        let rows = parse_two_column(
            "openshift/ironic-image: ironic\nopenshift/console: openshift-enterprise-console\n",
            "github-distgit mapping",
        )
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], ("openshift/ironic-image".to_string(), "ironic".to_string()));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_two_column("\na: b\n\n", "test").unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn empty_output_is_null_data() {
        let err = parse_two_column("\n\n", "github-distgit mapping").unwrap_err();
        assert!(matches!(err, ResolveError::NullDataReturned { .. }));
        assert!(err.to_string().contains("github-distgit mapping"));
    }

    #[test]
    fn a_row_without_separator_is_malformed_not_null() {
        let err = parse_two_column("a: b\ngarbage-row\n", "test").unwrap_err();
        match err {
            ResolveError::MalformedMappingData { line, .. } => assert_eq!(line, "garbage-row"),
            other => panic!("expected MalformedMappingData, got {other:?}"),
        }
    }
}
