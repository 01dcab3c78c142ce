//! Backend entry-point: reads configuration, prepares storage and serves.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::server::{EnvSettings, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let env = DefaultEnv::new();
    let settings = EnvSettings::from_env(&env).map_err(std::io::Error::other)?;
    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let EnvSettings {
        bind_addr,
        database_url,
        run_migrations,
        imagekit,
    } = settings;
    let mut config = ServerConfig::new(session, bind_addr).with_imagekit(imagekit);

    if let Some(url) = database_url {
        if run_migrations {
            run_pending_migrations(&url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    info!(%bind_addr, "starting reels backend");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
