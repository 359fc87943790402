//! The Errata Tool client and its `ErrataPort` implementation.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use artpipe_core::{CdnRepoDetails, ErrataPort, ResolveError, ResolveResult};
use artpipe_kerb::{
    CredentialProvider, DefaultTicketClient, KerbError, ReqwestTransport, TicketClient, Transport,
};

use crate::models::{CdnRepoResponse, PackageTagsResponse, VariantResponse};

/// Client for the Errata Tool API, generic over the transport so tests can
/// script responses.
pub struct ErrataClient<T: Transport, P: CredentialProvider> {
    http: TicketClient<T, P>,
    base_url: Url,
}

/// Production client over the reqwest transport.
pub type DefaultErrataClient<P> = ErrataClient<ReqwestTransport, P>;

impl<P: CredentialProvider> DefaultErrataClient<P> {
    /// Create a client for `base_url` with the deployment's credentials.
    pub fn new(base_url: &str, provider: P) -> ResolveResult<Self> {
        let base_url = Url::parse(base_url).map_err(ResolveError::unexpected)?;
        Ok(Self {
            http: DefaultTicketClient::with_defaults(provider),
            base_url,
        })
    }
}

impl<T: Transport, P: CredentialProvider> ErrataClient<T, P> {
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

/// Map transport errors with no per-call meaning into the core taxonomy.
fn map_error(err: KerbError) -> ResolveError {
    match err {
        KerbError::Unauthorized { .. } => ResolveError::KerberosAuthenticationError {
            service: "Errata Tool".to_string(),
        },
        other => ResolveError::unexpected(other),
    }
}

#[async_trait]
impl<T: Transport, P: CredentialProvider> ErrataPort for ErrataClient<T, P> {
    async fn cdn_repos_for_package(&self, package: &str) -> ResolveResult<Vec<String>> {
        let mut url = self.endpoint("api/v1/cdn_repo_package_tags")?;
        url.query_pairs_mut()
            .append_pair("filter[package_name]", package);
        debug!(package, "listing CDN repo package tags");

        let response: PackageTagsResponse = self.http.get_json(&url).await.map_err(map_error)?;
        Ok(response
            .data
            .into_iter()
            .map(|entry| entry.relationships.cdn_repo.name)
            .collect())
    }

    async fn cdn_repo_details(&self, cdn: &str) -> ResolveResult<CdnRepoDetails> {
        let url = self.endpoint(&format!("api/v1/cdn_repos/{cdn}"))?;
        debug!(cdn, "fetching CDN repo details");

        match self.http.get_json::<CdnRepoResponse>(&url).await {
            Ok(response) => Ok(response.data.into()),
            Err(KerbError::NotFound { .. }) => Err(ResolveError::CdnNotFound {
                cdn: cdn.to_string(),
            }),
            Err(err) => Err(map_error(err)),
        }
    }

    async fn product_version_id(&self, variant_id: i64) -> ResolveResult<Option<i64>> {
        let url = self.endpoint(&format!("api/v1/variants/{variant_id}"))?;
        debug!(variant_id, "fetching variant document");

        match self.http.get_json::<VariantResponse>(&url).await {
            Ok(response) => Ok(response
                .data
                .attributes
                .relationships
                .product_version
                .map(|p| p.id)),
            Err(KerbError::NotFound { .. }) => Ok(None),
            Err(err) => Err(map_error(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use artpipe_kerb::testing::FakeTransport;
    use artpipe_kerb::NoAuth;
    use serde_json::json;

    use super::*;

    fn client(transport: FakeTransport) -> ErrataClient<FakeTransport, NoAuth> {
        ErrataClient::with_parts(
            transport,
            NoAuth,
            Url::parse("https://errata.example.com").unwrap(),
        )
    }

    #[tokio::test]
    async fn package_tags_yield_cdn_repo_names_with_duplicates() {
        let transport = FakeTransport::new().with_json(
            "cdn_repo_package_tags",
            200,
            &json!({"data": [
                {"relationships": {"cdn_repo": {"name": "cdn-a"}}},
                {"relationships": {"cdn_repo": {"name": "cdn-b"}}},
                {"relationships": {"cdn_repo": {"name": "cdn-a"}}}
            ]}),
        );

        let repos = client(transport)
            .cdn_repos_for_package("ose-ironic-container")
            .await
            .unwrap();
        // Duplicates are the lookup layer's problem, not the client's.
        assert_eq!(repos, vec!["cdn-a", "cdn-b", "cdn-a"]);
    }

    #[tokio::test]
    async fn unknown_cdn_repo_is_cdn_not_found() {
        let err = client(FakeTransport::new())
            .cdn_repo_details("no-such-repo")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::CdnNotFound { .. }));
    }

    #[tokio::test]
    async fn cdn_repo_details_project_the_document() {
        let transport = FakeTransport::new().with_json(
            "cdn_repos/redhat-openshift4-ose-ironic-rhel8",
            200,
            &json!({"data": {
                "id": 11010,
                "attributes": {"external_name": "openshift4/ose-ironic-rhel8"},
                "relationships": {
                    "variants": [{"id": 3023, "name": "8Base-RHOSE-4.10"}],
                    "packages": [{"name": "ose-ironic-container"}]
                }
            }}),
        );

        let details = client(transport)
            .cdn_repo_details("redhat-openshift4-ose-ironic-rhel8")
            .await
            .unwrap();
        assert_eq!(details.id, Some(11010));
        assert!(details.has_variant("8Base-RHOSE-4.10"));
        assert_eq!(details.packages, vec!["ose-ironic-container"]);
    }

    #[tokio::test]
    async fn persistent_401_maps_to_kerberos_error() {
        let transport = FakeTransport::new().with_response("cdn_repos/x", 401, "");

        let err = client(transport).cdn_repo_details("x").await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::KerberosAuthenticationError { .. }
        ));
    }

    #[tokio::test]
    async fn variant_without_product_version_is_none() {
        let transport =
            FakeTransport::new().with_json("variants/3023", 200, &json!({"data": {}}));

        let id = client(transport).product_version_id(3023).await.unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn variant_with_product_version_projects_the_id() {
        let transport = FakeTransport::new().with_json(
            "variants/3023",
            200,
            &json!({"data": {"attributes": {"relationships": {"product_version": {"id": 1126}}}}}),
        );

        let id = client(transport).product_version_id(3023).await.unwrap();
        assert_eq!(id, Some(1126));
    }
}
