//! Build-data repository access: recipe documents and existence probes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ImageRecipe;
use crate::error::ResolveResult;

/// Access to the versioned build-definition repository and the
/// source-control existence probes.
///
/// A dist-git repo "exists" when its source-control endpoint answers the
/// probe, independent of whether its recipe document is retrievable or
/// parseable.
#[async_trait]
pub trait BuildDataPort: Send + Sync {
    /// Fetch and parse the build-recipe document for `(distgit, version)`.
    ///
    /// Returns `DistgitNotFound` when the version's build-data branch has
    /// no such document. Implementations memoize parsed documents for the
    /// life of the process.
    async fn image_recipe(&self, distgit: &str, version: &str)
        -> ResolveResult<Arc<ImageRecipe>>;

    /// Whether the upstream GitHub repo exists under the `openshift` org.
    async fn github_repo_exists(&self, repo: &str) -> ResolveResult<bool>;

    /// Whether the dist-git container project exists.
    async fn distgit_repo_exists(&self, name: &str) -> ResolveResult<bool>;
}
