//! Resolver configuration.
//!
//! Pure domain types: service endpoints and tool names with production
//! defaults. Deployments override individual fields through the
//! environment; that overlay happens in the CLI bootstrap, not here.

use serde::{Deserialize, Serialize};

/// Service endpoints and defaults used across the resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Errata Tool (release management) base URL.
    pub errata_url: String,

    /// Pyxis (container catalog) base URL.
    pub pyxis_url: String,

    /// Brew hub RPC endpoint.
    pub brew_hub_url: String,

    /// Brew web UI base URL, used for report links.
    pub brew_web_url: String,

    /// cgit base URL for browsing dist-git projects.
    pub cgit_url: String,

    /// Comet (delivery repo browser) base URL.
    pub comet_url: String,

    /// GitHub base URL.
    pub github_url: String,

    /// Raw ocp-build-data base URL holding versioned recipe documents.
    pub build_data_url: String,

    /// doozer executable name or path.
    pub doozer_bin: String,

    /// Keytab used to refresh kerberos credentials in production.
    pub keytab_path: Option<String>,

    /// Principal passed to kinit alongside the keytab.
    pub principal: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            errata_url: "https://errata.devel.redhat.com".to_string(),
            pyxis_url: "https://pyxis.engineering.redhat.com".to_string(),
            brew_hub_url: "https://brewhub.engineering.redhat.com/brewhub".to_string(),
            brew_web_url: "https://brewweb.engineering.redhat.com/brew".to_string(),
            cgit_url: "https://pkgs.devel.redhat.com/cgit".to_string(),
            comet_url: "https://comet.engineering.redhat.com/containers/repositories".to_string(),
            github_url: "https://github.com".to_string(),
            build_data_url: "https://raw.githubusercontent.com/openshift/ocp-build-data"
                .to_string(),
            doozer_bin: "doozer".to_string(),
            keytab_path: None,
            principal: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let settings = Settings::default();
        assert!(settings.errata_url.starts_with("https://errata"));
        assert!(settings.brew_hub_url.ends_with("/brewhub"));
        assert!(settings.keytab_path.is_none());
    }

    #[test]
    fn partial_deserialization_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"errata_url": "https://errata.stage.example.com"}"#).unwrap();
        assert_eq!(settings.errata_url, "https://errata.stage.example.com");
        assert_eq!(settings.doozer_bin, "doozer");
    }
}
