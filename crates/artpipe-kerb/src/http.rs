//! The transport and the 401 retry policy.
//!
//! A `Transport` moves one GET and returns status plus body; the
//! `TicketClient` wraps it with the credential and the single
//! refresh-and-retry. Keeping the two apart lets tests script status
//! sequences without a network.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::CredentialProvider;
use crate::error::{KerbError, KerbResult};

/// One HTTP response, reduced to what the clients consume.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Moves a single GET. Implementations do no auth handling; that belongs
/// to [`TicketClient`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url, authorization: Option<&str>) -> KerbResult<RawResponse>;
}

/// Production transport over reqwest.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url, authorization: Option<&str>) -> KerbResult<RawResponse> {
        let mut request = self.client.get(url.as_str());
        if let Some(value) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// Ticket-authenticated JSON client.
///
/// Every GET attaches the provider's credential. On a 401 the provider
/// refreshes once and the request is retried; a second 401 is
/// [`KerbError::Unauthorized`]. 404 is split out as [`KerbError::NotFound`]
/// so clients can turn it into their own typed not-found errors.
pub struct TicketClient<T: Transport, P: CredentialProvider> {
    transport: T,
    provider: P,
}

/// Default client over the reqwest transport.
pub type DefaultTicketClient<P> = TicketClient<ReqwestTransport, P>;

impl<P: CredentialProvider> DefaultTicketClient<P> {
    #[must_use]
    pub fn with_defaults(provider: P) -> Self {
        Self::new(ReqwestTransport::new(), provider)
    }
}

impl<T: Transport, P: CredentialProvider> TicketClient<T, P> {
    pub const fn new(transport: T, provider: P) -> Self {
        Self {
            transport,
            provider,
        }
    }

    /// GET and decode a JSON document.
    pub async fn get_json<D: DeserializeOwned>(&self, url: &Url) -> KerbResult<D> {
        let response = self.get_raw(url).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// GET with the credential and retry policy applied, returning the
    /// raw successful response.
    pub async fn get_raw(&self, url: &Url) -> KerbResult<RawResponse> {
        let auth = self.provider.authorization().await?;
        let mut response = self.transport.get(url, auth.as_deref()).await?;

        if response.status == 401 {
            debug!(%url, "401 response, refreshing credentials");
            self.provider.refresh().await?;
            let auth = self.provider.authorization().await?;
            response = self.transport.get(url, auth.as_deref()).await?;
        }

        match response.status {
            401 => Err(KerbError::Unauthorized {
                url: url.to_string(),
            }),
            404 => Err(KerbError::NotFound {
                url: url.to_string(),
            }),
            status if (200..300).contains(&status) => Ok(response),
            status => Err(KerbError::Status {
                status,
                url: url.to_string(),
            }),
        }
    }
}

// ============================================================================
// Canned transport for dependent crates' tests
// ============================================================================

#[cfg(any(test, feature = "test-utils"))]
pub mod testing {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// A transport answering from canned responses matched by URL
    /// substring, with a call counter for cache/short-circuit assertions.
    #[derive(Default)]
    pub struct FakeTransport {
        responses: Mutex<HashMap<String, RawResponse>>,
        calls: AtomicUsize,
    }

    impl FakeTransport {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a canned JSON response for URLs containing `pattern`.
        #[must_use]
        pub fn with_json(self, pattern: &str, status: u16, body: &serde_json::Value) -> Self {
            self.responses.lock().unwrap().insert(
                pattern.to_string(),
                RawResponse {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }

        /// Add a canned plain response for URLs containing `pattern`.
        #[must_use]
        pub fn with_response(self, pattern: &str, status: u16, body: &str) -> Self {
            self.responses.lock().unwrap().insert(
                pattern.to_string(),
                RawResponse {
                    status,
                    body: body.to_string(),
                },
            );
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: &Url, _authorization: Option<&str>) -> KerbResult<RawResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let responses = self.responses.lock().unwrap();
            for (pattern, response) in responses.iter() {
                if url.as_str().contains(pattern) {
                    return Ok(response.clone());
                }
            }
            Ok(RawResponse {
                status: 404,
                body: String::new(),
            })
        }
    }
}
