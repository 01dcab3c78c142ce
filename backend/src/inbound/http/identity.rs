//! Session endpoints under the identity namespace.
//!
//! ```text
//! POST /api/auth/login  {"username":"admin","password":"password"}
//! POST /api/auth/logout
//! ```
//!
//! Every path under `/api/auth` is admitted by the authorization gate.

use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Account name.
    #[schema(example = "admin")]
    pub username: String,
    /// Account password.
    #[schema(example = "password")]
    pub password: String,
}

fn validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field }))
}

/// Check credentials and start a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Blank username or password", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&username, &password).map_err(validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "session started");
    Ok(HttpResponse::Ok().finish())
}

/// End the current session, if any.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/api/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{session_cookie, test_app_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    macro_rules! identity_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_app_state()))
                    .wrap(test_session_middleware())
                    .service(login)
                    .service(logout),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn valid_login_sets_a_session_cookie() {
        let app = identity_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": "admin", "password": "password" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_some());
    }

    #[rstest]
    #[case("", "password", StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest)]
    #[case("admin", "", StatusCode::BAD_REQUEST, ErrorCode::InvalidRequest)]
    #[case("admin", "nope", StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized)]
    #[actix_web::test]
    async fn bad_logins_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] status: StatusCode,
        #[case] code: ErrorCode,
    ) {
        let app = identity_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "username": username, "password": password }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), status);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], serde_json::to_value(code).expect("code json"));
    }

    #[actix_web::test]
    async fn logout_answers_no_content() {
        let app = identity_app!();
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/auth/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
