//! Report line formatting.
//!
//! Lines use the chat system's mrkdwn link syntax (`<url|*text*>`). The
//! labels and their stage order are part of the resolver's contract with
//! its callers; the drivers decide which lines appear, this module decides
//! what they look like.

use std::sync::Arc;

use crate::settings::Settings;

pub(crate) struct ReportLines {
    settings: Arc<Settings>,
}

impl ReportLines {
    pub(crate) fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Upstream and private GitHub repository pair.
    pub(crate) fn github(&self, out: &mut String, repo: &str) {
        let base = &self.settings.github_url;
        out.push_str(&format!(
            "Upstream GitHub repository: <{base}/openshift/{repo}|*openshift/{repo}*>\n"
        ));
        out.push_str(&format!(
            "Private GitHub repository: <{base}/openshift-priv/{repo}|*openshift-priv/{repo}*>\n"
        ));
    }

    pub(crate) fn distgit(&self, out: &mut String, name: &str) {
        let base = &self.settings.cgit_url;
        out.push_str(&format!(
            "Production dist-git repo: <{base}/containers/{name}|*{name}*>\n"
        ));
    }

    pub(crate) fn brew(&self, out: &mut String, package: &str, package_id: i64) {
        let base = &self.settings.brew_web_url;
        out.push_str(&format!(
            "Production brew builds: <{base}/packageinfo?packageID={package_id}|*{package}*>\n"
        ));
    }

    pub(crate) fn payload_tag(&self, out: &mut String, tag: &str) {
        out.push_str(&format!("Payload tag: *{tag}*\n"));
    }

    pub(crate) fn bundle(&self, out: &mut String, component: &str, distgit: &str) {
        out.push_str(&format!("Bundle Component: *{component}*\n"));
        out.push_str(&format!("Bundle Distgit: *{distgit}-bundle*\n"));
    }

    pub(crate) fn cdn(&self, out: &mut String, cdn: &str, product_id: i64, cdn_id: i64) {
        let base = &self.settings.errata_url;
        out.push_str(&format!(
            "CDN repo: <{base}/product_versions/{product_id}/cdn_repos/{cdn_id}|*{cdn}*>\n"
        ));
    }

    pub(crate) fn delivery(&self, out: &mut String, name: &str, repo_id: &str) {
        let base = &self.settings.comet_url;
        out.push_str(&format!(
            "Delivery (Comet) repo: <{base}/{repo_id}|*{name}*>\n\n"
        ));
    }
}
