//! Wire concrete adapters into the HTTP port bundle.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use crate::domain::ports::{
    FixtureLoginService, UploadCredentialsIssuer, VideoCatalogCommand, VideoCatalogQuery,
    VideoRepository,
};
use crate::domain::{UploadCredentialService, VideoCatalogService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::imagekit::ImageKitSigner;
use crate::outbound::memory::InMemoryVideoRepository;
use crate::outbound::persistence::DieselVideoRepository;

use super::config::{ImageKitSettings, ServerConfig};

fn catalog_ports<R>(
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
) -> (Arc<dyn VideoCatalogQuery>, Arc<dyn VideoCatalogCommand>)
where
    R: VideoRepository + 'static,
{
    let service = Arc::new(VideoCatalogService::new(repo, clock));
    let query: Arc<dyn VideoCatalogQuery> = service.clone();
    (query, service)
}

fn upload_credentials(
    imagekit: &ImageKitSettings,
    clock: Arc<dyn Clock>,
) -> Arc<dyn UploadCredentialsIssuer> {
    if imagekit.private_key.is_empty() {
        warn!("IMAGEKIT_PRIVATE_KEY is unset; upload credential requests will fail");
    }
    let signer = Arc::new(ImageKitSigner::new(imagekit.private_key.as_str()));
    Arc::new(UploadCredentialService::new(
        signer,
        clock,
        imagekit.token_ttl,
    ))
}

/// Build the handler state, choosing PostgreSQL when a pool is configured
/// and the in-memory store otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let (videos, videos_command) = match &config.db_pool {
        Some(pool) => {
            info!("video catalog backed by PostgreSQL");
            catalog_ports(
                Arc::new(DieselVideoRepository::new(pool.clone())),
                clock.clone(),
            )
        }
        None => {
            warn!("no database configured; videos are kept in memory");
            catalog_ports(Arc::new(InMemoryVideoRepository::default()), clock.clone())
        }
    };

    web::Data::new(HttpState::new(HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        videos,
        videos_command,
        upload_credentials: upload_credentials(&config.imagekit, clock),
    }))
}
