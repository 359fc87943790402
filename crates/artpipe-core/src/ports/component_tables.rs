//! Version-scoped mapping tables from the build-orchestration tool.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ComponentTable, UpstreamTable};
use crate::error::ResolveResult;

/// The doozer-backed component tables, memoized per version.
///
/// Both directions of the upstream table come from one tool invocation; the
/// brew-keyed component table is a separate, separately memoized sweep.
/// Credential failures surface as `KerberosAuthenticationError`, an empty
/// sweep as `NullDataReturned`, and a row the two-column schema does not
/// admit as `MalformedMappingData`.
#[async_trait]
pub trait ComponentTablesPort: Send + Sync {
    /// GitHub↔dist-git mapping for `version`.
    async fn upstream_table(&self, version: &str) -> ResolveResult<Arc<UpstreamTable>>;

    /// Brew-component→dist-git mapping for `version`.
    async fn component_table(&self, version: &str) -> ResolveResult<Arc<ComponentTable>>;
}
