//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{
    BIND_ADDR_ENV, ConfigError, DATABASE_URL_ENV, DEFAULT_BIND_ADDR, EnvSettings,
    IMAGEKIT_PRIVATE_KEY_ENV, IMAGEKIT_PUBLIC_KEY_ENV, IMAGEKIT_TOKEN_TTL_ENV,
    IMAGEKIT_URL_ENDPOINT_ENV, ImageKitSettings, RUN_MIGRATIONS_ENV, ServerConfig,
};

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::GatePolicy;
use crate::domain::authorization::DEFAULT_EXCLUDED_PREFIXES;
use crate::inbound::http::AuthorizationGate;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::identity::{login, logout};
use crate::inbound::http::imagekit_auth::imagekit_auth;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::videos::{create_video, list_videos};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Everything [`build_app`] needs; cheap to clone per worker.
#[derive(Clone)]
pub struct AppDependencies {
    /// Probe flags.
    pub health_state: web::Data<HealthState>,
    /// Handler ports.
    pub http_state: web::Data<HttpState>,
    /// Cookie key.
    pub key: Key,
    /// `Secure` cookie attribute.
    pub cookie_secure: bool,
    /// `SameSite` cookie attribute.
    pub same_site: SameSite,
}

/// Static assets and probes bypass the gate; debug builds also expose the
/// API docs without a session.
fn gate_policy() -> GatePolicy {
    let docs: &[&str] = if cfg!(debug_assertions) {
        &["/docs", "/api-docs/"]
    } else {
        &[]
    };
    GatePolicy::new(DEFAULT_EXCLUDED_PREFIXES.iter().chain(docs).copied())
}

/// Assemble the application: routes, session cookies, the authorization
/// gate and per-request tracing.
///
/// Middleware runs outermost first: `Trace`, then the session store, then
/// the gate, so the gate sees the decoded session and every response gets a
/// trace id.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(AuthorizationGate::new(gate_policy()))
        .wrap(session)
        .wrap(Trace)
        .service(login)
        .service(logout)
        .service(list_videos)
        .service(create_video)
        .service(imagekit_auth)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the listener and start serving.
///
/// Readiness flips on once the socket is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        db_pool: _,
        imagekit: _,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
