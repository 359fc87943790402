//! The Pyxis client and its `PyxisPort` implementation.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use artpipe_core::{PyxisPort, ResolveError, ResolveResult};
use artpipe_kerb::{
    CredentialProvider, DefaultTicketClient, KerbError, ReqwestTransport, TicketClient, Transport,
};

use crate::models::{RepositoriesResponse, RepositoryImagesResponse};

/// Registry under which delivery repos are published.
const REGISTRY: &str = "registry.access.redhat.com";

/// Client for the Pyxis API, generic over the transport so tests can
/// script responses.
pub struct PyxisClient<T: Transport, P: CredentialProvider> {
    http: TicketClient<T, P>,
    base_url: Url,
}

/// Production client over the reqwest transport.
pub type DefaultPyxisClient<P> = PyxisClient<ReqwestTransport, P>;

impl<P: CredentialProvider> DefaultPyxisClient<P> {
    /// Create a client for `base_url` with the deployment's credentials.
    pub fn new(base_url: &str, provider: P) -> ResolveResult<Self> {
        let base_url = Url::parse(base_url).map_err(ResolveError::unexpected)?;
        Ok(Self {
            http: DefaultTicketClient::with_defaults(provider),
            base_url,
        })
    }
}

impl<T: Transport, P: CredentialProvider> PyxisClient<T, P> {
    #[cfg(test)]
    pub(crate) fn with_parts(transport: T, provider: P, base_url: Url) -> Self {
        Self {
            http: TicketClient::new(transport, provider),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> ResolveResult<Url> {
        self.base_url.join(path).map_err(ResolveError::unexpected)
    }
}

fn map_error(err: KerbError) -> ResolveError {
    match err {
        KerbError::Unauthorized { .. } => ResolveError::KerberosAuthenticationError {
            service: "Pyxis".to_string(),
        },
        other => ResolveError::unexpected(other),
    }
}

#[async_trait]
impl<T: Transport, P: CredentialProvider> PyxisPort for PyxisClient<T, P> {
    async fn brew_packages_for_repo(&self, delivery: &str) -> ResolveResult<Vec<String>> {
        let url = self.endpoint(&format!(
            "v1/repositories/registry/{REGISTRY}/repository/{delivery}/images"
        ))?;
        debug!(delivery, "listing published images");

        match self.http.get_json::<RepositoryImagesResponse>(&url).await {
            Ok(response) => Ok(response
                .data
                .into_iter()
                .map(|entry| entry.brew.package)
                .collect()),
            Err(KerbError::NotFound { .. }) => Err(ResolveError::BrewFromDeliveryNotFound {
                delivery: delivery.to_string(),
            }),
            Err(err) => Err(map_error(err)),
        }
    }

    async fn repository_id(&self, delivery: &str) -> ResolveResult<String> {
        let mut url = self.endpoint("v1/repositories")?;
        url.query_pairs_mut()
            .append_pair("filter", &format!("repository=={delivery}"));
        debug!(delivery, "looking up catalog repository id");

        let response: RepositoriesResponse = match self.http.get_json(&url).await {
            Ok(response) => response,
            Err(KerbError::NotFound { .. }) => {
                return Err(ResolveError::DeliveryRepoUrlNotFound {
                    delivery: delivery.to_string(),
                });
            }
            Err(err) => return Err(map_error(err)),
        };

        response
            .data
            .into_iter()
            .next()
            .and_then(|entry| entry.id)
            .ok_or_else(|| ResolveError::DeliveryRepoIdNotFound {
                delivery: delivery.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use artpipe_kerb::testing::FakeTransport;
    use artpipe_kerb::NoAuth;
    use serde_json::json;

    use super::*;

    fn client(transport: FakeTransport) -> PyxisClient<FakeTransport, NoAuth> {
        PyxisClient::with_parts(
            transport,
            NoAuth,
            Url::parse("https://pyxis.example.com").unwrap(),
        )
    }

    #[tokio::test]
    async fn published_images_yield_brew_packages() {
        let transport = FakeTransport::new().with_json(
            "repository/openshift4/ose-ironic-rhel8/images",
            200,
            &json!({"data": [
                {"brew": {"package": "ose-ironic-container"}},
                {"brew": {"package": "ose-ironic-container"}}
            ]}),
        );

        let packages = client(transport)
            .brew_packages_for_repo("openshift4/ose-ironic-rhel8")
            .await
            .unwrap();
        assert_eq!(packages.len(), 2);
        assert!(packages.iter().all(|p| p == "ose-ironic-container"));
    }

    #[tokio::test]
    async fn catalog_404_is_brew_from_delivery_not_found() {
        let err = client(FakeTransport::new())
            .brew_packages_for_repo("openshift4/absent")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::BrewFromDeliveryNotFound { .. }));
    }

    #[tokio::test]
    async fn repository_id_projects_the_first_record() {
        let transport = FakeTransport::new().with_json(
            "v1/repositories?",
            200,
            &json!({"data": [{"_id": "61f0b42ac9e8b5094f8da847"}]}),
        );

        let id = client(transport)
            .repository_id("openshift4/ose-ironic-rhel8")
            .await
            .unwrap();
        assert_eq!(id, "61f0b42ac9e8b5094f8da847");
    }

    #[tokio::test]
    async fn empty_record_set_is_missing_id() {
        let transport =
            FakeTransport::new().with_json("v1/repositories?", 200, &json!({"data": []}));

        let err = client(transport)
            .repository_id("openshift4/ose-ironic-rhel8")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::DeliveryRepoIdNotFound { .. }));
    }

    #[tokio::test]
    async fn persistent_401_maps_to_kerberos_error() {
        let transport = FakeTransport::new().with_response("images", 401, "");

        let err = client(transport)
            .brew_packages_for_repo("openshift4/ose-ironic-rhel8")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::KerberosAuthenticationError { .. }
        ));
    }
}
