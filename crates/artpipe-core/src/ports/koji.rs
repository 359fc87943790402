//! Build-system RPC access.

use async_trait::async_trait;

use crate::error::ResolveResult;

/// The one build-system call the resolver needs.
#[async_trait]
pub trait KojiPort: Send + Sync {
    /// Resolve a package name to its numeric package id.
    ///
    /// `BrewIdNotFound` when the name is unknown, `KojiClientError` when
    /// the hub cannot be reached; connectivity failures are never retried.
    async fn package_id(&self, package: &str) -> ResolveResult<i64>;
}
