//! Per-edge lookup functions.
//!
//! Each method implements exactly one pipeline edge (or one field
//! projection) with exactly one failure mode, performing one external call
//! or one cached-table access through the ports. Node-to-node edges return
//! an explicit ordered list even where the data is one-to-one today, so the
//! drivers handle multiplicity uniformly; field projections return scalars.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::ImageRecipe;
use crate::error::{ResolveError, ResolveResult};
use crate::ports::{BuildDataPort, ComponentTablesPort, ErrataPort, KojiPort, PyxisPort};

/// The per-edge lookups, bound to the ports they consult.
pub struct PipelineLookups {
    build_data: Arc<dyn BuildDataPort>,
    tables: Arc<dyn ComponentTablesPort>,
    koji: Arc<dyn KojiPort>,
    errata: Arc<dyn ErrataPort>,
    pyxis: Arc<dyn PyxisPort>,
}

impl PipelineLookups {
    pub fn new(
        build_data: Arc<dyn BuildDataPort>,
        tables: Arc<dyn ComponentTablesPort>,
        koji: Arc<dyn KojiPort>,
        errata: Arc<dyn ErrataPort>,
        pyxis: Arc<dyn PyxisPort>,
    ) -> Self {
        Self {
            build_data,
            tables,
            koji,
            errata,
            pyxis,
        }
    }

    // ------------------------------------------------------------------
    // GitHub stage
    // ------------------------------------------------------------------

    /// Whether the GitHub repo exists under the `openshift` org.
    pub async fn github_repo_is_available(&self, repo: &str) -> ResolveResult<bool> {
        self.build_data.github_repo_exists(repo).await
    }

    /// GitHub repo → dist-git components. One-to-many.
    pub async fn github_to_distgit(
        &self,
        repo: &str,
        version: &str,
    ) -> ResolveResult<Vec<String>> {
        let table = self.tables.upstream_table(version).await?;
        match table.distgits_for(repo) {
            Some(distgits) if !distgits.is_empty() => Ok(distgits.to_vec()),
            _ => Err(ResolveError::DistgitFromGithubNotFound {
                github: repo.to_string(),
                version: version.to_string(),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Dist-git stage
    // ------------------------------------------------------------------

    /// Whether the dist-git container project exists.
    pub async fn distgit_is_available(&self, name: &str) -> ResolveResult<bool> {
        self.build_data.distgit_repo_exists(name).await
    }

    /// Dist-git → upstream GitHub repo name.
    pub async fn distgit_to_github(
        &self,
        distgit: &str,
        version: &str,
    ) -> ResolveResult<Vec<String>> {
        let table = self.tables.upstream_table(version).await?;
        table
            .github_for(distgit)
            .map(|github| vec![github.to_string()])
            .ok_or_else(|| ResolveError::GithubFromDistgitNotFound {
                distgit: distgit.to_string(),
                version: version.to_string(),
            })
    }

    /// Dist-git → Brew package name.
    ///
    /// The `{distgit}-container` convention applies unless the recipe
    /// declares an explicit component. A missing recipe document is
    /// `DistgitNotFound`, distinct from "uses the default name".
    pub async fn distgit_to_brew(
        &self,
        distgit: &str,
        version: &str,
    ) -> ResolveResult<Vec<String>> {
        let recipe = self.build_data.image_recipe(distgit, version).await?;
        let brew = recipe
            .component_override()
            .map_or_else(|| format!("{distgit}-container"), ToString::to_string);
        Ok(vec![brew])
    }

    /// The parsed recipe document itself.
    pub async fn image_recipe(
        &self,
        distgit: &str,
        version: &str,
    ) -> ResolveResult<Arc<ImageRecipe>> {
        self.build_data.image_recipe(distgit, version).await
    }

    /// Release-payload tag, `None` when the component is not part of the
    /// payload.
    pub async fn get_image_stream_tag(
        &self,
        distgit: &str,
        version: &str,
    ) -> ResolveResult<Option<String>> {
        Ok(self
            .build_data
            .image_recipe(distgit, version)
            .await?
            .image_stream_tag())
    }

    /// Whether the component ships a secondary bundle build.
    pub async fn requires_bundle_build(
        &self,
        distgit: &str,
        version: &str,
    ) -> ResolveResult<bool> {
        Ok(self
            .build_data
            .image_recipe(distgit, version)
            .await?
            .requires_bundle_build())
    }

    /// Bundle component name declared in the recipe, if any.
    pub async fn bundle_override(
        &self,
        distgit: &str,
        version: &str,
    ) -> ResolveResult<Option<String>> {
        Ok(self
            .build_data
            .image_recipe(distgit, version)
            .await?
            .bundle_component_override()
            .map(ToString::to_string))
    }

    // ------------------------------------------------------------------
    // Brew stage
    // ------------------------------------------------------------------

    /// Whether the build system knows the package name.
    pub async fn brew_is_available(&self, brew: &str) -> ResolveResult<bool> {
        match self.get_brew_id(brew).await {
            Ok(_) => Ok(true),
            Err(ResolveError::BrewIdNotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Package name → numeric build-system package id.
    pub async fn get_brew_id(&self, brew: &str) -> ResolveResult<i64> {
        self.koji.package_id(brew).await
    }

    /// Brew package → dist-git, via the brew-keyed component table.
    pub async fn brew_to_distgit(
        &self,
        brew: &str,
        version: &str,
    ) -> ResolveResult<Vec<String>> {
        let table = self.tables.component_table(version).await?;
        table
            .distgit_for(brew)
            .map(|distgit| vec![distgit.to_string()])
            .ok_or_else(|| ResolveError::BrewToDistgitMappingNotFound {
                brew: brew.to_string(),
                version: version.to_string(),
            })
    }

    /// Brew package → CDN repos bound to the requested variant.
    /// One-to-many; real multiplicity is surfaced, not collapsed.
    ///
    /// Candidate names from the package-tag relationships are deduplicated
    /// and ordered, then each candidate's variant bindings are cross-checked:
    /// an unfiltered result would include repos from other variants. Zero
    /// matches for the requested variant is a hard error, never a fallback
    /// to the unfiltered set.
    pub async fn brew_to_cdn(&self, brew: &str, variant: &str) -> ResolveResult<Vec<String>> {
        let candidates: BTreeSet<String> = self
            .errata
            .cdn_repos_for_package(brew)
            .await?
            .into_iter()
            .collect();
        debug!(brew, variant, candidates = candidates.len(), "filtering CDN candidates");

        let mut matches = Vec::new();
        for cdn in candidates {
            let details = self.errata.cdn_repo_details(&cdn).await?;
            if details.has_variant(variant) {
                matches.push(cdn);
            }
        }

        if matches.is_empty() {
            return Err(ResolveError::CdnFromBrewNotFound {
                brew: brew.to_string(),
                variant: variant.to_string(),
            });
        }
        Ok(matches)
    }

    // ------------------------------------------------------------------
    // CDN stage
    // ------------------------------------------------------------------

    /// Whether the release-management system knows the CDN repo.
    pub async fn cdn_is_available(&self, cdn: &str) -> ResolveResult<bool> {
        match self.errata.cdn_repo_details(cdn).await {
            Ok(_) => Ok(true),
            Err(ResolveError::CdnNotFound { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// CDN repo → externally published delivery repo name.
    pub async fn cdn_to_delivery(&self, cdn: &str) -> ResolveResult<Vec<String>> {
        let details = self.errata.cdn_repo_details(cdn).await?;
        details
            .external_name
            .map(|name| vec![name])
            .ok_or_else(|| ResolveError::DeliveryRepoNotFound {
                cdn: cdn.to_string(),
            })
    }

    /// CDN repo → the single Brew package bound to it.
    pub async fn cdn_to_brew(&self, cdn: &str) -> ResolveResult<Vec<String>> {
        let details = self.errata.cdn_repo_details(cdn).await?;
        if details.packages.len() > 1 {
            return Err(ResolveError::MultipleCdnToBrewMappings {
                cdn: cdn.to_string(),
            });
        }
        details
            .packages
            .into_iter()
            .next()
            .map(|package| vec![package])
            .ok_or_else(|| ResolveError::BrewNotFoundFromCdnApi {
                cdn: cdn.to_string(),
            })
    }

    /// Numeric CDN repo id for the Errata page URL.
    pub async fn get_cdn_repo_id(&self, cdn: &str) -> ResolveResult<i64> {
        let details = self.errata.cdn_repo_details(cdn).await?;
        details.id.ok_or_else(|| ResolveError::CdnIdNotFound {
            cdn: cdn.to_string(),
        })
    }

    /// Id of the requested variant binding on a CDN repo.
    pub async fn get_variant_id(&self, cdn: &str, variant: &str) -> ResolveResult<i64> {
        let details = self.errata.cdn_repo_details(cdn).await?;
        details
            .variant_id(variant)
            .ok_or_else(|| ResolveError::VariantIdNotFound {
                cdn: cdn.to_string(),
                variant: variant.to_string(),
            })
    }

    /// Product-version id behind a variant.
    pub async fn get_product_id(&self, variant_id: i64) -> ResolveResult<i64> {
        self.errata
            .product_version_id(variant_id)
            .await?
            .ok_or(ResolveError::ProductIdNotFound { variant_id })
    }

    // ------------------------------------------------------------------
    // Delivery stage
    // ------------------------------------------------------------------

    /// Whether the container catalog knows the delivery repo.
    pub async fn delivery_repo_is_available(&self, delivery: &str) -> ResolveResult<bool> {
        match self.pyxis.repository_id(delivery).await {
            Ok(_) => Ok(true),
            Err(
                ResolveError::DeliveryRepoUrlNotFound { .. }
                | ResolveError::DeliveryRepoIdNotFound { .. },
            ) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Delivery repo → the single Brew package publishing under it.
    ///
    /// More than one distinct package is a metadata inconsistency, not
    /// multiplicity: a delivery repo backs exactly one package.
    pub async fn delivery_repo_to_brew(&self, delivery: &str) -> ResolveResult<Vec<String>> {
        let packages: BTreeSet<String> = self
            .pyxis
            .brew_packages_for_repo(delivery)
            .await?
            .into_iter()
            .collect();

        match packages.len() {
            0 => Err(ResolveError::BrewFromDeliveryNotFound {
                delivery: delivery.to_string(),
            }),
            1 => Ok(packages.into_iter().collect()),
            _ => Err(ResolveError::MultipleBrewFromDelivery {
                delivery: delivery.to_string(),
            }),
        }
    }

    /// Which of the package's CDN repos maps onward to an already-known
    /// delivery repo.
    pub async fn brew_to_cdn_delivery(
        &self,
        brew: &str,
        variant: &str,
        delivery: &str,
    ) -> ResolveResult<Vec<String>> {
        for cdn in self.brew_to_cdn(brew, variant).await? {
            let deliveries = self.cdn_to_delivery(&cdn).await?;
            if deliveries.iter().any(|d| d == delivery) {
                return Ok(vec![cdn]);
            }
        }
        Err(ResolveError::BrewToCdnWithDeliveryNotFound {
            delivery: delivery.to_string(),
        })
    }

    /// Catalog repository id for the Comet page URL.
    pub async fn get_delivery_repo_id(&self, delivery: &str) -> ResolveResult<String> {
        self.pyxis.repository_id(delivery).await
    }
}
