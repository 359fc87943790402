//! The five traversal drivers.
//!
//! Each driver walks the pipeline graph from its starting stage to every
//! reachable stage in a fixed order: cheap cached-table hops before
//! authenticated network hops, so an early failure wastes as few round
//! trips as possible. Reports accumulate line by line; when a downstream
//! hop fails after upstream hops succeeded, the caller still receives the
//! lines already resolved, followed by the error detail.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ResolutionContext;
use crate::error::{ErrorCategory, ResolveError, ResolveResult};
use crate::ports::OutputSink;
use crate::services::lookups::PipelineLookups;
use crate::services::normalize;
use crate::services::report::ReportLines;
use crate::settings::Settings;

/// Acknowledgement sent once the starting node passes its existence probe.
const FETCHING: &str = "Fetching data. Please wait...";

/// The resolver's public face: five entry points, one per starting stage.
///
/// Entry points are side-effecting: they reply through the [`OutputSink`]
/// and return nothing, matching the chat-reply model of the surrounding
/// system. Every invocation ends in exactly one user-visible reply; no
/// failure is silent.
pub struct PipelineResolver {
    lookups: PipelineLookups,
    lines: ReportLines,
}

impl PipelineResolver {
    pub fn new(lookups: PipelineLookups, settings: Arc<Settings>) -> Self {
        Self {
            lookups,
            lines: ReportLines::new(settings),
        }
    }

    /// The lookups this resolver traverses with.
    #[must_use]
    pub fn lookups(&self) -> &PipelineLookups {
        &self.lookups
    }

    // ------------------------------------------------------------------
    // Entry points
    // ------------------------------------------------------------------

    /// GitHub → Distgit(s) → Brew → CDN(s) → Delivery.
    pub async fn resolve_from_github(
        &self,
        sink: &dyn OutputSink,
        github_repo: &str,
        version: Option<&str>,
    ) {
        let ctx = ResolutionContext::new(version);
        let repo = normalize::github_repo(github_repo);
        debug!(repo = %repo, version = ctx.version(), "resolving from github");

        match self.lookups.github_repo_is_available(&repo).await {
            Ok(true) => {}
            Ok(false) => {
                sink.say(&format!(
                    "No GitHub repo with name *{repo}* exists. Try again.\n\
                     Example format: *what is the image pipeline for github `ironic-image`*"
                ));
                return;
            }
            Err(err) => {
                self.report_failure(sink, String::new(), &err);
                return;
            }
        }
        sink.say(FETCHING);

        let mut out = String::new();
        self.lines.github(&mut out, &repo);
        match self.github_chain(&mut out, &repo, &ctx).await {
            Ok(()) => sink.say(&out),
            Err(err) => self.report_failure(sink, out, &err),
        }
    }

    /// GitHub ← Distgit → Brew → CDN(s) → Delivery.
    pub async fn resolve_from_distgit(
        &self,
        sink: &dyn OutputSink,
        distgit: &str,
        version: Option<&str>,
    ) {
        let ctx = ResolutionContext::new(version);
        debug!(distgit, version = ctx.version(), "resolving from distgit");

        match self.lookups.distgit_is_available(distgit).await {
            Ok(true) => {}
            Ok(false) => {
                sink.say(&format!(
                    "No distgit repo with name *{distgit}* exists. Try again\n\
                     Example format: *what is the image pipeline for distgit `ironic`*"
                ));
                return;
            }
            Err(err) => {
                self.report_failure(sink, String::new(), &err);
                return;
            }
        }
        sink.say(FETCHING);

        let mut out = String::new();
        match self.distgit_chain(&mut out, distgit, &ctx).await {
            Ok(()) => sink.say(&out),
            Err(err) => self.report_failure(sink, out, &err),
        }
    }

    /// GitHub ← Distgit ← Brew → CDN(s) → Delivery.
    pub async fn resolve_from_brew(
        &self,
        sink: &dyn OutputSink,
        brew: &str,
        version: Option<&str>,
    ) {
        let ctx = ResolutionContext::new(version);
        debug!(brew, version = ctx.version(), "resolving from brew");

        match self.lookups.brew_is_available(brew).await {
            Ok(true) => {}
            Ok(false) => {
                sink.say(&format!(
                    "No brew package with name *{brew}* exists. Try again\n\
                     Example format: *what is the image pipeline for package `ironic-container`*"
                ));
                return;
            }
            Err(err) => {
                self.report_failure(sink, String::new(), &err);
                return;
            }
        }
        sink.say(FETCHING);

        let mut out = String::new();
        match self.brew_chain(&mut out, brew, &ctx).await {
            Ok(()) => sink.say(&out),
            Err(err) => self.report_failure(sink, out, &err),
        }
    }

    /// GitHub ← Distgit ← Brew ← CDN → Delivery.
    pub async fn resolve_from_cdn(
        &self,
        sink: &dyn OutputSink,
        cdn: &str,
        version: Option<&str>,
    ) {
        let ctx = ResolutionContext::new(version);
        debug!(cdn, version = ctx.version(), "resolving from cdn");

        match self.lookups.cdn_is_available(cdn).await {
            Ok(true) => {}
            Ok(false) => {
                sink.say(&format!(
                    "No CDN repo with name *{cdn}* exists. Try again\n\
                     Example format: *what is the image pipeline for cdn \
                     `redhat-openshift4-ose-ironic-rhel8`*"
                ));
                return;
            }
            Err(err) => {
                self.report_failure(sink, String::new(), &err);
                return;
            }
        }
        sink.say(FETCHING);

        let mut out = String::new();
        match self.cdn_chain(&mut out, cdn, &ctx).await {
            Ok(()) => sink.say(&out),
            Err(err) => self.report_failure(sink, out, &err),
        }
    }

    /// GitHub ← Distgit ← Brew ← CDN ← Delivery.
    pub async fn resolve_from_delivery(
        &self,
        sink: &dyn OutputSink,
        delivery: &str,
        version: Option<&str>,
    ) {
        let ctx = ResolutionContext::new(version);
        let delivery = normalize::delivery_repo(delivery);
        debug!(delivery = %delivery, version = ctx.version(), "resolving from delivery");

        match self.lookups.delivery_repo_is_available(&delivery).await {
            Ok(true) => {}
            Ok(false) => {
                sink.say(&format!(
                    "No delivery repo with name *{delivery}* exists. Try again\n\
                     Example format: *what is the image pipeline for image \
                     `openshift4/ose-ironic-rhel8`*"
                ));
                return;
            }
            Err(err) => {
                self.report_failure(sink, String::new(), &err);
                return;
            }
        }
        sink.say(FETCHING);

        let mut out = String::new();
        match self.delivery_chain(&mut out, &delivery, &ctx).await {
            Ok(()) => sink.say(&out),
            Err(err) => self.report_failure(sink, out, &err),
        }
    }

    // ------------------------------------------------------------------
    // Chains
    // ------------------------------------------------------------------

    async fn github_chain(
        &self,
        out: &mut String,
        repo: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        let distgits = self.lookups.github_to_distgit(repo, ctx.version()).await?;
        if distgits.len() > 1 {
            out.push_str(&format!(
                "\n*More than one dist-gits were found for the GitHub repo `{repo}`*\n\n"
            ));
        }
        for distgit in &distgits {
            self.lines.distgit(out, distgit);
            self.distgit_to_delivery(out, distgit, ctx).await?;
            out.push('\n');
        }
        Ok(())
    }

    async fn distgit_chain(
        &self,
        out: &mut String,
        distgit: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        let github = single(
            self.lookups
                .distgit_to_github(distgit, ctx.version())
                .await?,
        )?;
        self.lines.github(out, &github);
        self.lines.distgit(out, distgit);
        self.distgit_to_delivery(out, distgit, ctx).await
    }

    async fn brew_chain(
        &self,
        out: &mut String,
        brew: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        self.brew_to_github(out, brew, ctx).await?;
        let brew_id = self.lookups.get_brew_id(brew).await?;
        self.lines.brew(out, brew, brew_id);
        self.brew_to_delivery(out, brew, ctx).await
    }

    async fn cdn_chain(
        &self,
        out: &mut String,
        cdn: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        let brew = single(self.lookups.cdn_to_brew(cdn).await?)?;
        let brew_id = self.lookups.get_brew_id(&brew).await?;
        self.lines.brew(out, &brew, brew_id);
        self.brew_to_github(out, &brew, ctx).await?;
        self.cdn_payload(out, cdn, ctx).await?;
        self.cdn_to_delivery_payload(out, cdn).await
    }

    async fn delivery_chain(
        &self,
        out: &mut String,
        delivery: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        let brew = single(self.lookups.delivery_repo_to_brew(delivery).await?)?;
        let brew_id = self.lookups.get_brew_id(&brew).await?;
        self.brew_to_github(out, &brew, ctx).await?;
        self.lines.brew(out, &brew, brew_id);

        // Re-derive the CDN stage against the known delivery name so the
        // report walks the same path a forward resolution would.
        let cdn = single(
            self.lookups
                .brew_to_cdn_delivery(&brew, ctx.variant(), delivery)
                .await?,
        )?;
        self.cdn_payload(out, &cdn, ctx).await?;

        let repo_id = self.lookups.get_delivery_repo_id(delivery).await?;
        self.lines.delivery(out, delivery, &repo_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Shared traversal segments
    // ------------------------------------------------------------------

    /// Distgit → Brew → CDN(s) → Delivery, with the payload tag and bundle
    /// annotation along the way.
    async fn distgit_to_delivery(
        &self,
        out: &mut String,
        distgit: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        if let Some(tag) = self
            .lookups
            .get_image_stream_tag(distgit, ctx.version())
            .await?
        {
            self.lines.payload_tag(out, &tag);
        }

        let brew = single(self.lookups.distgit_to_brew(distgit, ctx.version()).await?)?;
        let brew_id = self.lookups.get_brew_id(&brew).await?;
        self.lines.brew(out, &brew, brew_id);

        self.bundle_annotation(out, distgit, &brew, ctx).await?;
        self.brew_to_delivery(out, &brew, ctx).await
    }

    /// Brew → Distgit → GitHub, printed in report order.
    async fn brew_to_github(
        &self,
        out: &mut String,
        brew: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        let distgit = single(self.lookups.brew_to_distgit(brew, ctx.version()).await?)?;
        let github = single(
            self.lookups
                .distgit_to_github(&distgit, ctx.version())
                .await?,
        )?;
        self.lines.github(out, &github);
        self.lines.distgit(out, &distgit);

        self.bundle_annotation(out, &distgit, brew, ctx).await?;

        if let Some(tag) = self
            .lookups
            .get_image_stream_tag(&distgit, ctx.version())
            .await?
        {
            self.lines.payload_tag(out, &tag);
        }
        Ok(())
    }

    /// Brew → CDN(s) → Delivery, fanning out when more than one CDN repo is
    /// bound to the variant.
    async fn brew_to_delivery(
        &self,
        out: &mut String,
        brew: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        let cdns = self.lookups.brew_to_cdn(brew, ctx.variant()).await?;
        if cdns.len() > 1 {
            out.push_str("\n *Found more than one Brew to CDN mappings:*\n\n");
        }
        for cdn in &cdns {
            self.cdn_payload(out, cdn, ctx).await?;
            self.cdn_to_delivery_payload(out, cdn).await?;
        }
        Ok(())
    }

    /// The CDN line, built from the repo, variant and product ids.
    async fn cdn_payload(
        &self,
        out: &mut String,
        cdn: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        let cdn_id = self.lookups.get_cdn_repo_id(cdn).await?;
        let variant_id = self.lookups.get_variant_id(cdn, ctx.variant()).await?;
        let product_id = self.lookups.get_product_id(variant_id).await?;
        self.lines.cdn(out, cdn, product_id, cdn_id);
        Ok(())
    }

    /// The delivery line for a CDN repo's external name.
    async fn cdn_to_delivery_payload(&self, out: &mut String, cdn: &str) -> ResolveResult<()> {
        let delivery = single(self.lookups.cdn_to_delivery(cdn).await?)?;
        let repo_id = self.lookups.get_delivery_repo_id(&delivery).await?;
        self.lines.delivery(out, &delivery, &repo_id);
        Ok(())
    }

    /// Append the bundle component/dist-git pair when the recipe calls for
    /// a bundle build. Never alters the traversal path.
    async fn bundle_annotation(
        &self,
        out: &mut String,
        distgit: &str,
        brew: &str,
        ctx: &ResolutionContext,
    ) -> ResolveResult<()> {
        if !self
            .lookups
            .requires_bundle_build(distgit, ctx.version())
            .await?
        {
            return Ok(());
        }
        let component = match self.lookups.bundle_override(distgit, ctx.version()).await? {
            Some(component) => component,
            None => default_bundle_component(brew),
        };
        self.lines.bundle(out, &component, distgit);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Failure reporting
    // ------------------------------------------------------------------

    /// One user-visible reply per failure, plus the verbatim text on the
    /// monitoring channel. Resolution-class errors keep the partial report.
    fn report_failure(&self, sink: &dyn OutputSink, partial: String, err: &ResolveError) {
        warn!(error = %err, "resolution failed");
        match err.category() {
            ErrorCategory::Resolution => {
                let mut out = partial;
                out.push('\n');
                out.push_str(&err.to_string());
                sink.say(&out);
            }
            ErrorCategory::InternalService => {
                sink.say(&format!("{err}. Contact the ART Team"));
            }
            ErrorCategory::Unclassified => {
                sink.say("Unknown error. Contact the ART team.");
            }
        }
        sink.monitoring_say(&format!("ERROR: {err}"));
    }
}

/// Every edge lookup returns a non-empty ordered list by contract; take the
/// head without panicking if that contract is ever broken.
fn single(values: Vec<String>) -> ResolveResult<String> {
    values
        .into_iter()
        .next()
        .ok_or_else(|| ResolveError::unexpected("edge lookup returned an empty list"))
}

/// Default bundle component name: the brew package with its last segment
/// replaced by `metadata-component`.
fn default_bundle_component(brew: &str) -> String {
    let base = brew.rsplit_once('-').map_or(brew, |(base, _)| base);
    format!("{base}-metadata-component")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_component_replaces_last_segment() {
        assert_eq!(
            default_bundle_component("ose-clusterresourceoverride-operator-container"),
            "ose-clusterresourceoverride-operator-metadata-component"
        );
        assert_eq!(
            default_bundle_component("ironic-container"),
            "ironic-metadata-component"
        );
    }

    #[test]
    fn single_rejects_an_empty_edge_result() {
        assert!(single(vec![]).is_err());
        assert_eq!(single(vec!["a".to_string()]).unwrap(), "a");
    }
}
