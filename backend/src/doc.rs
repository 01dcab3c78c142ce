//! OpenAPI document for the REST API.
//!
//! Handlers register their paths through `utoipa::path`; the error payload
//! is described by the mirrors in [`crate::inbound::http::schemas`] so the
//! domain stays free of utoipa derives. Swagger UI serves this document in
//! debug builds and `openapi-dump` prints it for tooling.

use crate::inbound::http::imagekit_auth::UploadCredentialsBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, MessageErrorBody};
use crate::inbound::http::videos::{
    CreateVideoRequest, TransformationBody, TransformationRequest, VideoBody,
};
use crate::inbound::http::identity::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// Generated OpenAPI document.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Reels backend API",
        description = "Short-form video feed, publishing and direct-upload credentials."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::videos::list_videos,
        crate::inbound::http::videos::create_video,
        crate::inbound::http::imagekit_auth::imagekit_auth,
        crate::inbound::http::identity::login,
        crate::inbound::http::identity::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        VideoBody,
        TransformationBody,
        CreateVideoRequest,
        TransformationRequest,
        UploadCredentialsBody,
        LoginRequest,
        MessageErrorBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "videos", description = "Public feed and publishing"),
        (name = "uploads", description = "Direct-upload credentials"),
        (name = "auth", description = "Session login and logout"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    #[rstest]
    fn error_schema_is_registered_under_the_domain_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(ERROR_SCHEMA_NAME).expect("Error schema") {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("code"));
                assert!(obj.properties.contains_key("traceId"));
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/videos")]
    #[case("/api/imagekit-auth")]
    #[case("/api/auth/login")]
    #[case("/health/ready")]
    fn documents_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
