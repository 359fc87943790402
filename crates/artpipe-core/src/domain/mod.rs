//! Domain types for the five-stage release pipeline.
//!
//! A component's identity changes name at every stage: upstream GitHub
//! repo, dist-git project, Brew package, variant-scoped CDN repo, published
//! delivery repo. Nothing here is persisted; every value is re-derived from
//! live services per request, subject to the memoization layer.

mod cdn;
mod context;
mod recipe;
mod tables;

pub use cdn::{CdnRepoDetails, VariantRef};
pub use context::{ResolutionContext, DEFAULT_VERSION};
pub use recipe::{ImageRecipe, RecipeDistgit};
pub use tables::{ComponentTable, UpstreamTable};
