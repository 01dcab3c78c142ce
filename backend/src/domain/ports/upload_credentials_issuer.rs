//! Driving port handing out direct-upload credentials.

use crate::domain::{Error, UploadCredentials};

/// Issues a fresh credential set on every call.
#[cfg_attr(test, mockall::automock)]
pub trait UploadCredentialsIssuer: Send + Sync {
    /// Generate, sign and return credentials.
    fn issue(&self) -> Result<UploadCredentials, Error>;
}
