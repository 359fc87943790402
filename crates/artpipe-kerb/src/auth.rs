//! Credential providers.
//!
//! The transport asks a provider for the Authorization value to attach and
//! tells it to refresh after a 401. What "refresh" means depends on the
//! deployment: in production it is a kinit against the mounted keytab, in
//! development usually nothing at all.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{KerbError, KerbResult};

/// Source of the credential attached to ticket-authenticated requests.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Authorization header value for the next request, if any.
    async fn authorization(&self) -> KerbResult<Option<String>>;

    /// Re-establish credentials after a 401. Called at most once per
    /// request.
    async fn refresh(&self) -> KerbResult<()>;
}

/// Production provider: credentials come from the host's ticket cache,
/// replenished by running kinit against a mounted keytab.
///
/// The ticket itself is negotiated below this layer (the deployment fronts
/// the internal APIs with a negotiating proxy), so `authorization` attaches
/// nothing; the provider's job is the refresh.
pub struct KinitProvider {
    keytab: PathBuf,
    principal: String,
}

impl KinitProvider {
    pub fn new(keytab: impl Into<PathBuf>, principal: impl Into<String>) -> Self {
        Self {
            keytab: keytab.into(),
            principal: principal.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for KinitProvider {
    async fn authorization(&self) -> KerbResult<Option<String>> {
        Ok(None)
    }

    async fn refresh(&self) -> KerbResult<()> {
        info!(keytab = %self.keytab.display(), "running kinit");
        let output = Command::new("kinit")
            .arg("-kt")
            .arg(&self.keytab)
            .arg(&self.principal)
            .output()
            .await
            .map_err(|err| KerbError::Refresh(format!("failed to run kinit: {err}")))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(KerbError::Refresh(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ))
        }
    }
}

/// Service-account token attached as a Bearer header. Refresh is a no-op:
/// if the token stops working, the retry fails and the caller reports the
/// authentication error.
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenProvider {
    async fn authorization(&self) -> KerbResult<Option<String>> {
        Ok(Some(format!("Bearer {}", self.token)))
    }

    async fn refresh(&self) -> KerbResult<()> {
        debug!("static token provider has nothing to refresh");
        Ok(())
    }
}

/// No credentials at all. Development default.
pub struct NoAuth;

#[async_trait]
impl CredentialProvider for NoAuth {
    async fn authorization(&self) -> KerbResult<Option<String>> {
        Ok(None)
    }

    async fn refresh(&self) -> KerbResult<()> {
        Ok(())
    }
}
