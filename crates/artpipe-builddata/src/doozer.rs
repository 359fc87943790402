//! The doozer-backed mapping tables.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use artpipe_core::{
    ComponentTable, ComponentTablesPort, MemoCache, ResolveError, ResolveResult, UpstreamTable,
};

use crate::parse::parse_two_column;
use crate::runner::CommandRunner;

/// Format string printing `upstream: distgit` rows.
const UPSTREAM_FORMAT: &str = "{upstream_public}: {name}";
/// Format string printing `brew component: distgit` rows.
const COMPONENT_FORMAT: &str = "{component}: {name}";

/// Version-scoped mapping tables produced by `doozer images:print`,
/// memoized in caches the caller owns.
///
/// One sweep per version feeds both directions of the upstream table; the
/// brew-keyed component table is a separate, separately memoized sweep.
pub struct DoozerTables {
    runner: Arc<dyn CommandRunner>,
    doozer_bin: String,
    upstream: MemoCache<String, UpstreamTable>,
    components: MemoCache<String, ComponentTable>,
}

impl DoozerTables {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        doozer_bin: impl Into<String>,
        upstream: MemoCache<String, UpstreamTable>,
        components: MemoCache<String, ComponentTable>,
    ) -> Self {
        Self {
            runner,
            doozer_bin: doozer_bin.into(),
            upstream,
            components,
        }
    }

    async fn sweep(
        &self,
        version: &str,
        format: &str,
        subject: &str,
    ) -> ResolveResult<Vec<(String, String)>> {
        let group = format!("openshift-{version}");
        let args = [
            "--disable-gssapi",
            "-g",
            group.as_str(),
            "images:print",
            "--short",
            format,
        ];
        debug!(version, subject, "running doozer sweep");
        let output = self.runner.run(&self.doozer_bin, &args).await?;

        // The credential failure shows up in stderr whatever the exit code.
        if output.stderr.contains("koji.GSSAPIAuthError") {
            return Err(ResolveError::KerberosAuthenticationError {
                service: "doozer".to_string(),
            });
        }
        if output.status != 0 {
            return Err(ResolveError::CommandFailed {
                command: format!("{} images:print", self.doozer_bin),
                status: output.status,
                stderr: output.stderr,
            });
        }

        parse_two_column(&output.stdout, subject)
    }
}

#[async_trait]
impl ComponentTablesPort for DoozerTables {
    async fn upstream_table(&self, version: &str) -> ResolveResult<Arc<UpstreamTable>> {
        if let Some(table) = self.upstream.get(&version.to_string()).await {
            return Ok(table);
        }

        let rows = self
            .sweep(version, UPSTREAM_FORMAT, "github-distgit mapping")
            .await?;
        let mut table = UpstreamTable::new();
        for (upstream, distgit) in &rows {
            table.insert(upstream, distgit);
        }
        Ok(self.upstream.insert(version.to_string(), table).await)
    }

    async fn component_table(&self, version: &str) -> ResolveResult<Arc<ComponentTable>> {
        if let Some(table) = self.components.get(&version.to_string()).await {
            return Ok(table);
        }

        let rows = self
            .sweep(version, COMPONENT_FORMAT, "brew-distgit mapping")
            .await?;
        let mut table = ComponentTable::new();
        for (component, distgit) in &rows {
            table.insert(component, distgit);
        }
        Ok(self.components.insert(version.to_string(), table).await)
    }
}
