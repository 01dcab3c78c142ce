//! End-to-end checks of routing, the authorization gate and session
//! lifecycle against the assembled application.

use std::sync::Arc;

use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend::domain::ports::FixtureLoginService;
use backend::domain::{TRACE_ID_HEADER, UploadCredentialService, VideoCatalogService};
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::imagekit::ImageKitSigner;
use backend::outbound::memory::InMemoryVideoRepository;
use backend::server::{AppDependencies, SESSION_COOKIE_NAME, build_app};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

#[fixture]
fn deps() -> AppDependencies {
    let catalog = Arc::new(VideoCatalogService::new(
        Arc::new(InMemoryVideoRepository::default()),
        Arc::new(DefaultClock),
    ));
    let health_state = web::Data::new(HealthState::new());
    health_state.mark_ready();
    AppDependencies {
        health_state,
        http_state: web::Data::new(HttpState::new(HttpStatePorts {
            login: Arc::new(FixtureLoginService),
            videos: catalog.clone(),
            videos_command: catalog,
            upload_credentials: Arc::new(UploadCredentialService::new(
                Arc::new(ImageKitSigner::new("")),
                Arc::new(DefaultClock),
                backend::domain::DEFAULT_CREDENTIAL_TTL,
            )),
        })),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
    }
}

fn session_cookie<B>(res: &actix_web::dev::ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.into_owned())
        .expect("session cookie")
}

fn login_request() -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn probes_bypass_the_gate(deps: AppDependencies, #[case] path: &str) {
    let app = test::init_service(build_app(deps)).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
}

#[rstest]
#[case("/")]
#[case("/login")]
#[case("/register")]
#[actix_web::test]
async fn public_pages_are_not_gated(deps: AppDependencies, #[case] path: &str) {
    let app = test::init_service(build_app(deps)).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;
    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn unknown_private_paths_are_denied_with_a_trace_id(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/dashboard").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(header.as_str()));
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let login = test::call_service(&app, login_request().to_request()).await;
    let cookie = session_cookie(&login);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/videos")
            .cookie(cookie)
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.get("code").and_then(Value::as_str), Some("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn missing_signing_key_yields_the_legacy_error_body(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let login = test::call_service(&app, login_request().to_request()).await;
    let cookie = session_cookie(&login);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/imagekit-auth")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!({ "error": "Imagekit Auth Failed" }));
}

#[rstest]
#[actix_web::test]
async fn bad_credentials_are_rejected(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "admin", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn logout_purges_the_session(deps: AppDependencies) {
    let app = test::init_service(build_app(deps)).await;
    let login = test::call_service(&app, login_request().to_request()).await;
    let cookie = session_cookie(&login);

    let logout = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = session_cookie(&logout);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/imagekit-auth")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
