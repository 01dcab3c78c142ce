//! Short-lived upload authorisation issued by the backend.

use serde::{Deserialize, Serialize};

/// Parameters from `GET /api/imagekit-auth`. They expire quickly and are
/// meant for a single upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCredentials {
    /// Single-use token.
    pub token: String,
    /// UNIX expiry in seconds.
    pub expire: i64,
    /// Server-computed signature over `token` and `expire`.
    pub signature: String,
}
