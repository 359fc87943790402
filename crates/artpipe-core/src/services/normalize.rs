//! Identifier normalization at the driver boundary.
//!
//! The command router hands identifiers through in whatever shape the user
//! typed them; these helpers reduce them to the bare names the lookups key
//! on.

/// Reduce a GitHub identifier to the bare repo name.
///
/// Accepts `repo`, `org/repo`, `github.com/org/repo` and full URLs with an
/// optional `.git` suffix or trailing slash.
pub(crate) fn github_repo(input: &str) -> String {
    let s = input.trim();
    let s = s.strip_prefix("https://").unwrap_or(s);
    let s = s.strip_prefix("http://").unwrap_or(s);
    let s = s.strip_prefix("github.com/").unwrap_or(s);
    let s = s.trim_end_matches('/');
    let s = s.strip_suffix(".git").unwrap_or(s);
    s.rsplit('/').next().unwrap_or(s).to_string()
}

/// Reduce a delivery-repo identifier to the `openshift4/name` form the
/// catalog keys on.
///
/// Accepts an optional registry host prefix or a bare repo name.
pub(crate) fn delivery_repo(input: &str) -> String {
    let s = input.trim().trim_end_matches('/');
    let s = s.strip_prefix("registry.redhat.io/").unwrap_or(s);
    let s = s.strip_prefix("registry.access.redhat.com/").unwrap_or(s);
    if s.contains('/') {
        s.to_string()
    } else {
        format!("openshift4/{s}")
    }
}
