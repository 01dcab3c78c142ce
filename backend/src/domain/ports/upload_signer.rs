//! Driven port for the media provider's request signature.

use super::define_port_error;

define_port_error! {
    /// Failures raised while signing upload parameters.
    pub enum UploadSignerError {
        /// No private key is configured.
        MissingKey => "upload signing key is not configured",
        /// The signing primitive rejected its input.
        Signing { message: String } => "upload signing failed: {message}",
    }
}

/// Produces the provider signature over a token and expiry pair.
#[cfg_attr(test, mockall::automock)]
pub trait UploadSigner: Send + Sync {
    /// Sign `token` concatenated with the decimal `expire` timestamp.
    fn sign(&self, token: &str, expire: i64) -> Result<String, UploadSignerError>;
}
