//! `GET /api/imagekit-auth`: credentials for a direct upload to ImageKit.
//!
//! The authorization gate guarantees a session before this handler runs.

use actix_web::{HttpResponse, get, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::UploadCredentials;
use crate::inbound::http::schemas::{ErrorSchema, MessageErrorBody};
use crate::inbound::http::state::HttpState;

/// Message returned when credentials cannot be produced.
pub const AUTH_FAILED_MESSAGE: &str = "Imagekit Auth Failed";

/// Upload authentication parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadCredentialsBody {
    /// Single-use token.
    #[schema(example = "2c3f9f9e-1d6a-4c1b-9a45-0f8f2b7f3d10")]
    pub token: String,
    /// UNIX expiry in seconds.
    #[schema(example = 1767227400)]
    pub expire: i64,
    /// Hex HMAC-SHA1 over `token` and `expire`.
    pub signature: String,
}

impl From<UploadCredentials> for UploadCredentialsBody {
    fn from(value: UploadCredentials) -> Self {
        Self {
            token: value.token,
            expire: value.expire,
            signature: value.signature,
        }
    }
}

/// Issue fresh upload credentials.
#[utoipa::path(
    get,
    path = "/api/imagekit-auth",
    responses(
        (status = 200, description = "Fresh credentials", body = UploadCredentialsBody),
        (status = 401, description = "No session", body = ErrorSchema),
        (status = 500, description = "Signing failed", body = MessageErrorBody)
    ),
    tags = ["uploads"],
    operation_id = "imagekitAuth"
)]
#[get("/api/imagekit-auth")]
pub async fn imagekit_auth(state: web::Data<HttpState>) -> HttpResponse {
    match state.upload_credentials.issue() {
        Ok(credentials) => HttpResponse::Ok().json(UploadCredentialsBody::from(credentials)),
        Err(err) => {
            error!(message = err.message(), "upload credential issue failed");
            HttpResponse::InternalServerError().json(MessageErrorBody::new(AUTH_FAILED_MESSAGE))
        }
    }
}
