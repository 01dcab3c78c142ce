//! Short-lived parameters that let a client upload straight to the media
//! provider.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tracing::error;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::{UploadCredentialsIssuer, UploadSigner};

/// Lifetime applied when none is configured.
pub const DEFAULT_CREDENTIAL_TTL: Duration = Duration::from_secs(30 * 60);
/// The provider rejects expiries an hour or more in the future.
pub const MAX_CREDENTIAL_TTL: Duration = Duration::from_secs(60 * 60);

/// Token, expiry and signature handed to the upload client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCredentials {
    /// Single-use random token.
    pub token: String,
    /// UNIX timestamp in seconds after which the provider refuses the upload.
    pub expire: i64,
    /// Hex signature over `token` followed by `expire`.
    pub signature: String,
}

/// Issues credentials using a [`UploadSigner`] and the injected clock.
#[derive(Clone)]
pub struct UploadCredentialService<S> {
    signer: Arc<S>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl<S> UploadCredentialService<S> {
    /// Build the service. `ttl` is clamped below [`MAX_CREDENTIAL_TTL`].
    pub fn new(signer: Arc<S>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        let ceiling = MAX_CREDENTIAL_TTL - Duration::from_secs(1);
        Self {
            signer,
            clock,
            ttl: ttl.min(ceiling),
        }
    }

    /// Effective credential lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<S> UploadCredentialsIssuer for UploadCredentialService<S>
where
    S: UploadSigner,
{
    fn issue(&self) -> Result<UploadCredentials, Error> {
        let token = Uuid::new_v4().to_string();
        let ttl_secs = i64::try_from(self.ttl.as_secs())
            .map_err(|_| Error::internal("credential ttl out of range"))?;
        let expire = self.clock.utc().timestamp() + ttl_secs;
        let signature = self.signer.sign(&token, expire).map_err(|err| {
            error!(error = %err, "upload credential signing failed");
            Error::internal(format!("upload credential signing failed: {err}"))
        })?;
        Ok(UploadCredentials {
            token,
            expire,
            signature,
        })
    }
}
