//! Per-request resolution scope.

/// Product version assumed when the caller does not name one.
pub const DEFAULT_VERSION: &str = "4.10";

/// Immutable per-request scope: the product version under discussion and
/// the product variant derived from it.
///
/// Every lookup is implicitly scoped by this context. The same Brew package
/// resolves to different CDN repos under different variants, so the variant
/// travels with the version rather than being recomputed at call sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    version: String,
    variant: String,
}

impl ResolutionContext {
    /// Build a context for `version`, falling back to [`DEFAULT_VERSION`]
    /// when the caller passed nothing usable.
    #[must_use]
    pub fn new(version: Option<&str>) -> Self {
        let version = match version.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => DEFAULT_VERSION.to_string(),
        };
        let variant = format!("8Base-RHOSE-{version}");
        Self { version, variant }
    }

    /// The `major.minor` product version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The product variant scoping Brew→CDN lookups, e.g. `8Base-RHOSE-4.10`.
    #[must_use]
    pub fn variant(&self) -> &str {
        &self.variant
    }
}
