//! The closed taxonomy of resolution failures.
//!
//! Every lookup returns one of these; "not found" is an expected outcome
//! carried as data, not a panic. Variants keep the specific inputs that
//! failed to resolve so the user-facing text can name them verbatim.

use thiserror::Error;

/// Result type alias for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// How a failure is reported back to the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Expected, user-correctable: a node or field does not exist for the
    /// given key. Reported verbatim, appended to any partial report.
    Resolution,
    /// An internal service misbehaved (credentials, build-system
    /// connectivity, tooling). Reported as "Contact the ART Team".
    InternalService,
    /// Anything the taxonomy has no name for. The user gets a generic
    /// message; the verbatim text goes to the monitoring channel only.
    Unclassified,
}

/// Errors raised while resolving a pipeline chain.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No dist-git repo maps to the GitHub repo in this version.
    #[error("Couldn't find dist-git repo from GitHub `{github}` and version `{version}`")]
    DistgitFromGithubNotFound { github: String, version: String },

    /// No GitHub repo maps to the dist-git repo in this version.
    #[error("Couldn't find GitHub repo from dist-git `{distgit}` and version `{version}`")]
    GithubFromDistgitNotFound { distgit: String, version: String },

    /// The build-recipe document for the dist-git repo does not exist in
    /// this version's build-data branch.
    #[error("Image dist-git `{distgit}` definition was not found for version {version}")]
    DistgitNotFound { distgit: String, version: String },

    /// The component table has no row for the Brew package.
    #[error("Could not find brew-distgit mapping for `{brew}` in version {version}")]
    BrewToDistgitMappingNotFound { brew: String, version: String },

    /// The build system does not know the package name.
    #[error("Brew ID not found for brew package `{brew}`. Check API call.")]
    BrewIdNotFound { brew: String },

    /// No CDN repo is bound to the package under the requested variant.
    #[error("CDN was not found for brew `{brew}` and variant `{variant}`")]
    CdnFromBrewNotFound { brew: String, variant: String },

    /// The release-management system has no CDN repo with this name.
    #[error("CDN was not found for CDN name `{cdn}`")]
    CdnNotFound { cdn: String },

    /// The CDN repo detail document carries no external delivery name.
    #[error("Delivery repo not found for CDN `{cdn}`")]
    DeliveryRepoNotFound { cdn: String },

    /// The CDN repo detail document carries no numeric id.
    #[error("CDN ID not found for CDN `{cdn}`")]
    CdnIdNotFound { cdn: String },

    /// The CDN repo is not bound to the requested variant.
    #[error("Variant ID not found for CDN `{cdn}` and variant `{variant}`")]
    VariantIdNotFound { cdn: String, variant: String },

    /// The variant document names no product version.
    #[error("Product ID not found for variant `{variant_id}`")]
    ProductIdNotFound { variant_id: i64 },

    /// The container catalog lists no package behind the delivery repo.
    #[error("Brew package could not be found from delivery repo `{delivery}`")]
    BrewFromDeliveryNotFound { delivery: String },

    /// A delivery repo is expected to back exactly one package.
    #[error("Multiple brew packages found for delivery repo `{delivery}`. Contact ART.")]
    MultipleBrewFromDelivery { delivery: String },

    /// None of the package's CDN repos map onward to the known delivery repo.
    #[error("Could not find CDN repo mapping to delivery repo `{delivery}`")]
    BrewToCdnWithDeliveryNotFound { delivery: String },

    /// A CDN repo is expected to be bound to exactly one package.
    #[error("Multiple Brew packages mapped to CDN repo `{cdn}`. Contact ART.")]
    MultipleCdnToBrewMappings { cdn: String },

    /// The CDN repo detail document lists no bound packages at all.
    #[error("Brew package not mapped to CDN repo `{cdn}` in Errata. Contact ART.")]
    BrewNotFoundFromCdnApi { cdn: String },

    /// The container catalog has no repository record for the delivery repo.
    #[error("Couldn't find delivery repo `{delivery}` in the container catalog")]
    DeliveryRepoUrlNotFound { delivery: String },

    /// The catalog record exists but carries no repository id.
    #[error("Couldn't find catalog repository ID for delivery repo `{delivery}`")]
    DeliveryRepoIdNotFound { delivery: String },

    /// Upstream tooling produced no rows at all for the version.
    #[error("No data from doozer command for {subject}")]
    NullDataReturned { subject: String },

    /// Upstream tooling produced a row the schema does not admit.
    #[error("Malformed line in doozer output for {subject}: `{line}`")]
    MalformedMappingData { subject: String, line: String },

    /// Credential failure on a ticket-authenticated call, surfaced after
    /// the single refresh-and-retry.
    #[error("Kerberos authentication failed for {service}")]
    KerberosAuthenticationError { service: String },

    /// Build-system connectivity failure. Never retried.
    #[error("Failed to connect to Brew: {0}")]
    KojiClientError(String),

    /// External command exited non-zero for a non-credential reason.
    #[error("`{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    /// Transport or serialization surprise the taxonomy has no name for.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ResolveError {
    /// Wrap an arbitrary failure as [`ResolveError::Unexpected`].
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        Self::Unexpected(err.to_string())
    }

    /// How this failure should be presented to the user.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::DistgitFromGithubNotFound { .. }
            | Self::GithubFromDistgitNotFound { .. }
            | Self::DistgitNotFound { .. }
            | Self::BrewToDistgitMappingNotFound { .. }
            | Self::BrewIdNotFound { .. }
            | Self::CdnFromBrewNotFound { .. }
            | Self::CdnNotFound { .. }
            | Self::DeliveryRepoNotFound { .. }
            | Self::CdnIdNotFound { .. }
            | Self::VariantIdNotFound { .. }
            | Self::ProductIdNotFound { .. }
            | Self::BrewFromDeliveryNotFound { .. }
            | Self::MultipleBrewFromDelivery { .. }
            | Self::BrewToCdnWithDeliveryNotFound { .. }
            | Self::MultipleCdnToBrewMappings { .. }
            | Self::BrewNotFoundFromCdnApi { .. }
            | Self::DeliveryRepoUrlNotFound { .. }
            | Self::DeliveryRepoIdNotFound { .. }
            | Self::NullDataReturned { .. }
            | Self::MalformedMappingData { .. } => ErrorCategory::Resolution,
            Self::KerberosAuthenticationError { .. }
            | Self::KojiClientError(_)
            | Self::CommandFailed { .. } => ErrorCategory::InternalService,
            Self::Unexpected(_) => ErrorCategory::Unclassified,
        }
    }
}
