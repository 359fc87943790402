//! Projections of release-management CDN-repo documents.

/// The slice of a CDN-repo detail document the resolver cares about.
///
/// Fields are optional where the upstream document can omit them; the
/// lookups turn each absence into its own typed error so the caller learns
/// exactly which field was missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CdnRepoDetails {
    /// Numeric repo id, used to build the Errata page URL.
    pub id: Option<i64>,

    /// Externally published (delivery) repository name.
    pub external_name: Option<String>,

    /// Product variants this repo is bound to.
    pub variants: Vec<VariantRef>,

    /// Brew packages bound to this repo.
    pub packages: Vec<String>,
}

/// A variant binding inside a CDN-repo document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRef {
    pub id: i64,
    pub name: String,
}

impl CdnRepoDetails {
    /// Whether the repo is bound to the named variant.
    #[must_use]
    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.iter().any(|v| v.name == name)
    }

    /// Id of the named variant binding, if present.
    #[must_use]
    pub fn variant_id(&self, name: &str) -> Option<i64> {
        self.variants.iter().find(|v| v.name == name).map(|v| v.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_lookup_is_exact() {
        let details = CdnRepoDetails {
            id: Some(11010),
            external_name: Some("openshift4/ose-ironic-rhel8".to_string()),
            variants: vec![VariantRef {
                id: 3023,
                name: "8Base-RHOSE-4.10".to_string(),
            }],
            packages: vec!["ose-ironic-container".to_string()],
        };

        assert!(details.has_variant("8Base-RHOSE-4.10"));
        assert!(!details.has_variant("8Base-RHOSE-4.11"));
        assert_eq!(details.variant_id("8Base-RHOSE-4.10"), Some(3023));
        assert_eq!(details.variant_id("7Server-RHOSE-4.10"), None);
    }
}
