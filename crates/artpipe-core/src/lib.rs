//! Core of the ART pipeline identity resolver.
//!
//! Given an identifier for a containerized component at any one of the five
//! release-pipeline stages (GitHub, dist-git, Brew, CDN, Delivery), the
//! resolver determines and reports the corresponding identifiers at the
//! other stages. This crate owns the domain model, the port traits the
//! infrastructure crates implement, the closed error taxonomy, the
//! memoization primitives and the traversal drivers; it performs no I/O of
//! its own.

#![deny(unused_crate_dependencies)]

pub mod cache;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use cache::MemoCache;
pub use domain::{
    CdnRepoDetails, ComponentTable, ImageRecipe, RecipeDistgit, ResolutionContext, UpstreamTable,
    VariantRef, DEFAULT_VERSION,
};
pub use error::{ErrorCategory, ResolveError, ResolveResult};
pub use ports::{
    BuildDataPort, ComponentTablesPort, ErrataPort, KojiPort, OutputSink, PyxisPort,
};
pub use services::{PipelineLookups, PipelineResolver};
pub use settings::Settings;

// Silence unused dev-dependency warnings until we add mock-based tests
#[cfg(test)]
use mockall as _;
#[cfg(test)]
use tokio_test as _;
