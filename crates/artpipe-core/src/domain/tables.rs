//! Version-scoped mapping tables generated by the build-orchestration tool.

use std::collections::HashMap;

/// GitHub↔dist-git mapping for one product version, both directions built
/// from a single `images:print` sweep.
///
/// The GitHub→dist-git direction is one-to-many: a single upstream repo may
/// feed several container components. The reverse direction is keyed per
/// dist-git and records the upstream repo name.
#[derive(Debug, Clone, Default)]
pub struct UpstreamTable {
    github_to_distgit: HashMap<String, Vec<String>>,
    distgit_to_github: HashMap<String, String>,
}

impl UpstreamTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `upstream: distgit` row. The upstream side may be a full
    /// URL; only its last path segment names the GitHub repo.
    pub fn insert(&mut self, upstream: &str, distgit: &str) {
        let trimmed = upstream.trim_end_matches('/');
        let reponame = trimmed.rsplit('/').next().unwrap_or(trimmed).to_string();
        self.github_to_distgit
            .entry(reponame.clone())
            .or_default()
            .push(distgit.to_string());
        self.distgit_to_github.insert(distgit.to_string(), reponame);
    }

    /// Dist-git components produced from a GitHub repo, in sweep order.
    #[must_use]
    pub fn distgits_for(&self, reponame: &str) -> Option<&[String]> {
        self.github_to_distgit.get(reponame).map(Vec::as_slice)
    }

    /// Upstream GitHub repo name for a dist-git component.
    #[must_use]
    pub fn github_for(&self, distgit: &str) -> Option<&str> {
        self.distgit_to_github.get(distgit).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distgit_to_github.is_empty()
    }
}

/// Brew-component→dist-git mapping for one product version.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    by_component: HashMap<String, String>,
}

impl ComponentTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, component: &str, distgit: &str) {
        self.by_component
            .insert(component.to_string(), distgit.to_string());
    }

    #[must_use]
    pub fn distgit_for(&self, component: &str) -> Option<&str> {
        self.by_component.get(component).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_component.is_empty()
    }
}
