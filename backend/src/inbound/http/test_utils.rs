//! Helpers shared by the HTTP adapter tests.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::test;
use serde_json::json;

use crate::domain::ports::{
    FixtureLoginService, UploadCredentialsIssuer, VideoCatalogCommand, VideoCatalogQuery,
};
use crate::domain::{Error, UploadCredentials, UserId, Video, VideoDraft};
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Cookie name used by [`test_session_middleware`].
pub const TEST_SESSION_COOKIE: &str = "session";

/// Cookie session middleware with a fresh key and no `Secure` flag.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(TEST_SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == TEST_SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Catalog double that never holds videos and refuses writes.
struct EmptyCatalog;

#[async_trait::async_trait]
impl VideoCatalogQuery for EmptyCatalog {
    async fn list(&self) -> Vec<Video> {
        Vec::new()
    }
}

#[async_trait::async_trait]
impl VideoCatalogCommand for EmptyCatalog {
    async fn create(&self, _author: &UserId, _draft: VideoDraft) -> Result<Video, Error> {
        Err(Error::service_unavailable("catalog disabled in tests"))
    }
}

/// Issuer double returning constant credentials.
struct FixedCredentials;

impl UploadCredentialsIssuer for FixedCredentials {
    fn issue(&self) -> Result<UploadCredentials, Error> {
        Ok(UploadCredentials {
            token: "token".to_owned(),
            expire: 1_800,
            signature: "signature".to_owned(),
        })
    }
}

/// State wired with the fixture login service and inert doubles.
pub fn test_app_state() -> HttpState {
    HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        videos: Arc::new(EmptyCatalog),
        videos_command: Arc::new(EmptyCatalog),
        upload_credentials: Arc::new(FixedCredentials),
    })
}

/// Login request for the fixture account accepted by [`FixtureLoginService`].
pub fn login_request() -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "admin", "password": "password" }))
}
