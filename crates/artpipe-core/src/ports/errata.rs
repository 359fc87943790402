//! Release-management (Errata Tool) access.

use async_trait::async_trait;

use crate::domain::CdnRepoDetails;
use crate::error::ResolveResult;

/// Ticket-authenticated release-management queries.
///
/// Every method maps a 401 (after the transport's single
/// refresh-and-retry) to `KerberosAuthenticationError`.
#[async_trait]
pub trait ErrataPort: Send + Sync {
    /// CDN repo names appearing in the package's repo/package-tag
    /// relationships. May contain duplicates; callers deduplicate.
    async fn cdn_repos_for_package(&self, package: &str) -> ResolveResult<Vec<String>>;

    /// Detail document for a CDN repo. `CdnNotFound` when the name is
    /// unknown.
    async fn cdn_repo_details(&self, cdn: &str) -> ResolveResult<CdnRepoDetails>;

    /// Product-version id from a variant document, `None` when the
    /// document names no product version.
    async fn product_version_id(&self, variant_id: i64) -> ResolveResult<Option<i64>>;
}
