//! Recipe documents and source-repo existence probes.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use artpipe_core::{BuildDataPort, ImageRecipe, MemoCache, ResolveError, ResolveResult};

/// The two HTTP shapes this client needs: a text GET that treats 404 as
/// data, and a HEAD probe.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// GET a text document; `None` when the endpoint answers 404.
    async fn get_text(&self, url: &Url) -> ResolveResult<Option<String>>;

    /// Whether a HEAD probe answers success.
    async fn head_ok(&self, url: &Url) -> ResolveResult<bool>;
}

/// Production backend over reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_text(&self, url: &Url) -> ResolveResult<Option<String>> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(ResolveError::unexpected)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ResolveError::unexpected(format!(
                "GET {url} returned status {status}"
            )));
        }
        Ok(Some(response.text().await.map_err(ResolveError::unexpected)?))
    }

    async fn head_ok(&self, url: &Url) -> ResolveResult<bool> {
        let response = self
            .client
            .head(url.as_str())
            .send()
            .await
            .map_err(ResolveError::unexpected)?;
        Ok(response.status().is_success())
    }
}

/// Fetches build-recipe documents from the versioned build-data branches
/// and probes source repositories for existence.
pub struct BuildDataClient<B: HttpBackend> {
    backend: B,
    build_data_url: String,
    github_url: String,
    cgit_url: String,
    recipes: MemoCache<(String, String), ImageRecipe>,
}

/// Production client over the reqwest backend.
pub type DefaultBuildDataClient = BuildDataClient<ReqwestBackend>;

impl DefaultBuildDataClient {
    pub fn new(
        build_data_url: impl Into<String>,
        github_url: impl Into<String>,
        cgit_url: impl Into<String>,
        recipes: MemoCache<(String, String), ImageRecipe>,
    ) -> Self {
        Self::with_backend(
            ReqwestBackend::new(),
            build_data_url,
            github_url,
            cgit_url,
            recipes,
        )
    }
}

impl<B: HttpBackend> BuildDataClient<B> {
    pub fn with_backend(
        backend: B,
        build_data_url: impl Into<String>,
        github_url: impl Into<String>,
        cgit_url: impl Into<String>,
        recipes: MemoCache<(String, String), ImageRecipe>,
    ) -> Self {
        Self {
            backend,
            build_data_url: build_data_url.into(),
            github_url: github_url.into(),
            cgit_url: cgit_url.into(),
            recipes,
        }
    }

    fn parse_url(&self, text: &str) -> ResolveResult<Url> {
        Url::parse(text).map_err(ResolveError::unexpected)
    }
}

#[async_trait]
impl<B: HttpBackend> BuildDataPort for BuildDataClient<B> {
    async fn image_recipe(
        &self,
        distgit: &str,
        version: &str,
    ) -> ResolveResult<Arc<ImageRecipe>> {
        let key = (distgit.to_string(), version.to_string());
        if let Some(recipe) = self.recipes.get(&key).await {
            return Ok(recipe);
        }

        let url = self.parse_url(&format!(
            "{}/openshift-{version}/images/{distgit}.yml",
            self.build_data_url
        ))?;
        debug!(distgit, version, "fetching image recipe");

        let Some(body) = self.backend.get_text(&url).await? else {
            return Err(ResolveError::DistgitNotFound {
                distgit: distgit.to_string(),
                version: version.to_string(),
            });
        };

        let recipe: ImageRecipe = serde_yaml::from_str(&body).map_err(|err| {
            ResolveError::unexpected(format!("unparseable recipe for {distgit}: {err}"))
        })?;
        Ok(self.recipes.insert(key, recipe).await)
    }

    async fn github_repo_exists(&self, repo: &str) -> ResolveResult<bool> {
        let url = self.parse_url(&format!("{}/openshift/{repo}", self.github_url))?;
        self.backend.head_ok(&url).await
    }

    async fn distgit_repo_exists(&self, name: &str) -> ResolveResult<bool> {
        let url = self.parse_url(&format!("{}/containers/{name}", self.cgit_url))?;
        self.backend.head_ok(&url).await
    }
}
