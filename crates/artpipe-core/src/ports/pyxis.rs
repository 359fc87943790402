//! Container-catalog (Pyxis) access.

use async_trait::async_trait;

use crate::error::ResolveResult;

/// Ticket-authenticated container-catalog queries.
#[async_trait]
pub trait PyxisPort: Send + Sync {
    /// Brew package names with published images under a delivery repo.
    /// May contain duplicates; callers deduplicate. A catalog 404 surfaces
    /// as `BrewFromDeliveryNotFound`.
    async fn brew_packages_for_repo(&self, delivery: &str) -> ResolveResult<Vec<String>>;

    /// Catalog repository id for a delivery repo, used for the Comet page
    /// URL. `DeliveryRepoUrlNotFound` when the catalog has no record,
    /// `DeliveryRepoIdNotFound` when the record carries no id.
    async fn repository_id(&self, delivery: &str) -> ResolveResult<String>;
}
