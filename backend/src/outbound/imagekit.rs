//! ImageKit upload signature adapter.
//!
//! ImageKit authenticates browser uploads with
//! `hex(HMAC-SHA1(private_key, token || expire))`. The private key never
//! leaves this adapter.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use zeroize::Zeroizing;

use crate::domain::ports::{UploadSigner, UploadSignerError};

type HmacSha1 = Hmac<Sha1>;

/// Signs upload credentials with the account's private key.
pub struct ImageKitSigner {
    private_key: Zeroizing<String>,
}

impl ImageKitSigner {
    /// Wrap the account private key.
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: Zeroizing::new(private_key.into()),
        }
    }
}

impl std::fmt::Debug for ImageKitSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageKitSigner")
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl UploadSigner for ImageKitSigner {
    fn sign(&self, token: &str, expire: i64) -> Result<String, UploadSignerError> {
        if self.private_key.is_empty() {
            return Err(UploadSignerError::missing_key());
        }
        let mut mac = HmacSha1::new_from_slice(self.private_key.as_bytes())
            .map_err(|err| UploadSignerError::signing(err.to_string()))?;
        mac.update(token.as_bytes());
        mac.update(expire.to_string().as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn matches_provider_reference_signature() {
        let signer = ImageKitSigner::new("private_key_test");
        let signature = signer
            .sign("your_token", 1_655_379_249)
            .expect("signing succeeds");
        assert_eq!(signature, "239f84d664cd64492ebf366e2c8a1cbe529dac74");
    }

    #[rstest]
    fn signature_depends_on_expiry() {
        let signer = ImageKitSigner::new("k");
        let first = signer.sign("t", 1).expect("sign");
        let second = signer.sign("t", 2).expect("sign");
        assert_ne!(first, second);
        assert_eq!(first.len(), 40);
    }

    #[rstest]
    fn empty_key_is_rejected() {
        let err = ImageKitSigner::new("").sign("t", 1).expect_err("no key");
        assert_eq!(err, UploadSignerError::MissingKey);
    }

    #[rstest]
    fn debug_output_hides_the_key() {
        let rendered = format!("{:?}", ImageKitSigner::new("secret"));
        assert!(!rendered.contains("secret"));
    }
}
