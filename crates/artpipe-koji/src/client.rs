//! The Brew hub client and its `KojiPort` implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use artpipe_core::{KojiPort, ResolveError, ResolveResult};

use crate::xmlrpc::{self, ScalarResponse};

/// Moves one RPC body to the hub and returns the response body.
///
/// Connectivity failures are already mapped to `KojiClientError` here;
/// interpreting the response is the client's job.
#[async_trait]
pub trait RpcBackend: Send + Sync {
    async fn call(&self, url: &Url, body: String) -> ResolveResult<String>;
}

/// Production backend over reqwest.
pub struct ReqwestRpcBackend {
    client: reqwest::Client,
}

impl ReqwestRpcBackend {
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestRpcBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RpcBackend for ReqwestRpcBackend {
    async fn call(&self, url: &Url, body: String) -> ResolveResult<String> {
        let response = self
            .client
            .post(url.as_str())
            .header(reqwest::header::CONTENT_TYPE, "text/xml")
            .body(body)
            .send()
            .await
            .map_err(|err| ResolveError::KojiClientError(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::KojiClientError(format!(
                "hub returned status {status}"
            )));
        }
        response
            .text()
            .await
            .map_err(|err| ResolveError::KojiClientError(err.to_string()))
    }
}

/// Client for the Brew hub, generic over the backend so tests can answer
/// with canned envelopes.
pub struct KojiClient<B: RpcBackend> {
    backend: B,
    hub_url: Url,
}

/// Production client over the reqwest backend.
pub type DefaultKojiClient = KojiClient<ReqwestRpcBackend>;

impl DefaultKojiClient {
    /// Create a client for the hub endpoint.
    pub fn new(hub_url: &str) -> ResolveResult<Self> {
        let hub_url = Url::parse(hub_url).map_err(ResolveError::unexpected)?;
        Ok(Self {
            backend: ReqwestRpcBackend::new(),
            hub_url,
        })
    }
}

impl<B: RpcBackend> KojiClient<B> {
    #[cfg(test)]
    pub(crate) fn with_backend(backend: B, hub_url: Url) -> Self {
        Self { backend, hub_url }
    }
}

#[async_trait]
impl<B: RpcBackend> KojiPort for KojiClient<B> {
    async fn package_id(&self, package: &str) -> ResolveResult<i64> {
        debug!(package, "resolving brew package id");
        let body = xmlrpc::render_call("getPackageID", &[package]);
        let response = self.backend.call(&self.hub_url, body).await?;

        match xmlrpc::parse_scalar_response(&response) {
            Some(ScalarResponse::Int(id)) => Ok(id),
            // The hub answers nil for unknown names and a fault for
            // malformed ones; both mean the package cannot be resolved.
            Some(ScalarResponse::Nil | ScalarResponse::Fault { .. }) => {
                Err(ResolveError::BrewIdNotFound {
                    brew: package.to_string(),
                })
            }
            None => Err(ResolveError::unexpected(
                "unparseable response from brew hub",
            )),
        }
    }
}
