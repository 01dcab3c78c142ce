//! OpenAPI schemas for payloads whose Rust types stay framework-free.
//!
//! The domain error type does not derive `ToSchema`; the mirrors below are
//! registered under the domain names instead.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Schema mirror of [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// Malformed or invalid request.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Missing or invalid session.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Unknown resource.
    #[schema(rename = "not_found")]
    NotFound,
    /// Backing service unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// Unexpected failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Schema mirror of [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "only read by utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Missing required fields.")]
    message: String,
    /// Correlation id, also sent as the `trace-id` header.
    #[schema(example = "6f1c1a5e-3a55-4d7b-9b3e-0e6c3f0b8a11")]
    trace_id: Option<String>,
    /// Structured context, such as the list of missing fields.
    details: Option<serde_json::Value>,
}

/// Single-message error body kept for browser compatibility:
/// `{"error": "…"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageErrorBody {
    /// Human-readable message.
    #[schema(example = "Imagekit Auth Failed")]
    pub error: String,
}

impl MessageErrorBody {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
