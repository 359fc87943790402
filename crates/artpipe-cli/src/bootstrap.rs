//! Settings overlay and client wiring.

use std::env;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use artpipe_builddata::{DefaultBuildDataClient, DoozerTables, TokioCommandRunner};
use artpipe_core::{
    ErrataPort, MemoCache, PipelineLookups, PipelineResolver, PyxisPort, Settings,
};
use artpipe_errata::DefaultErrataClient;
use artpipe_kerb::{KinitProvider, NoAuth, StaticTokenProvider};
use artpipe_koji::DefaultKojiClient;
use artpipe_pyxis::DefaultPyxisClient;

/// Overlay `ARTPIPE_*` environment variables onto the production defaults.
pub fn settings_from_env() -> Settings {
    settings_from(|var| env::var(var).ok())
}

fn settings_from(get: impl Fn(&str) -> Option<String>) -> Settings {
    let overlay = |var: &str, field: &mut String| {
        if let Some(value) = get(var).filter(|value| !value.is_empty()) {
            *field = value;
        }
    };

    let mut settings = Settings::default();
    overlay("ARTPIPE_ERRATA_URL", &mut settings.errata_url);
    overlay("ARTPIPE_PYXIS_URL", &mut settings.pyxis_url);
    overlay("ARTPIPE_BREW_HUB_URL", &mut settings.brew_hub_url);
    overlay("ARTPIPE_BREW_WEB_URL", &mut settings.brew_web_url);
    overlay("ARTPIPE_CGIT_URL", &mut settings.cgit_url);
    overlay("ARTPIPE_COMET_URL", &mut settings.comet_url);
    overlay("ARTPIPE_GITHUB_URL", &mut settings.github_url);
    overlay("ARTPIPE_BUILD_DATA_URL", &mut settings.build_data_url);
    overlay("ARTPIPE_DOOZER_BIN", &mut settings.doozer_bin);
    settings.keytab_path = get("ARTPIPE_KEYTAB").filter(|value| !value.is_empty());
    settings.principal = get("ARTPIPE_PRINCIPAL").filter(|value| !value.is_empty());
    settings
}

/// Wire clients and caches into a resolver.
pub fn build_resolver(settings: &Settings) -> Result<PipelineResolver> {
    let settings = Arc::new(settings.clone());

    let build_data = Arc::new(DefaultBuildDataClient::new(
        settings.build_data_url.clone(),
        settings.github_url.clone(),
        settings.cgit_url.clone(),
        MemoCache::new(),
    ));
    let tables = Arc::new(DoozerTables::new(
        Arc::new(TokioCommandRunner),
        settings.doozer_bin.clone(),
        MemoCache::new(),
        MemoCache::new(),
    ));
    let koji = Arc::new(DefaultKojiClient::new(&settings.brew_hub_url)?);
    let (errata, pyxis) = build_ticket_clients(&settings)?;

    let lookups = PipelineLookups::new(build_data, tables, koji, errata, pyxis);
    Ok(PipelineResolver::new(lookups, settings))
}

/// Pick the credential shape the deployment configured: keytab-backed
/// kinit in production, a static token where a proxy fronts the APIs,
/// nothing for local development.
fn build_ticket_clients(
    settings: &Settings,
) -> Result<(Arc<dyn ErrataPort>, Arc<dyn PyxisPort>)> {
    if let (Some(keytab), Some(principal)) = (&settings.keytab_path, &settings.principal) {
        debug!(keytab = %keytab, "using kinit credentials");
        let errata = DefaultErrataClient::new(
            &settings.errata_url,
            KinitProvider::new(keytab.clone(), principal.clone()),
        )?;
        let pyxis = DefaultPyxisClient::new(
            &settings.pyxis_url,
            KinitProvider::new(keytab.clone(), principal.clone()),
        )?;
        return Ok((Arc::new(errata), Arc::new(pyxis)));
    }

    if let Ok(token) = env::var("ARTPIPE_TOKEN") {
        if !token.is_empty() {
            debug!("using static token credentials");
            let errata = DefaultErrataClient::new(
                &settings.errata_url,
                StaticTokenProvider::new(token.clone()),
            )?;
            let pyxis =
                DefaultPyxisClient::new(&settings.pyxis_url, StaticTokenProvider::new(token))?;
            return Ok((Arc::new(errata), Arc::new(pyxis)));
        }
    }

    debug!("no credentials configured");
    let errata = DefaultErrataClient::new(&settings.errata_url, NoAuth)?;
    let pyxis = DefaultPyxisClient::new(&settings.pyxis_url, NoAuth)?;
    Ok((Arc::new(errata), Arc::new(pyxis)))
}
