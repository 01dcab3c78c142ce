//! Catalog service implementing the feed's driving ports.
//!
//! Reads never fail from the caller's point of view: repository errors are
//! logged and an empty feed is returned. Writes surface repository failures
//! as domain errors so the HTTP layer can choose the response.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    VideoCatalogCommand, VideoCatalogQuery, VideoRepository, VideoRepositoryError,
};
use crate::domain::{
    Error, UserId, Video, VideoDraft, VideoId, VideoValidationError, sort_newest_first,
};

/// Validated create and ordered read over a [`VideoRepository`].
#[derive(Clone)]
pub struct VideoCatalogService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> VideoCatalogService<R> {
    /// Build the service around a repository and a time source.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use backend::domain::VideoCatalogService;
    /// # use backend::outbound::memory::InMemoryVideoRepository;
    /// # use mockable::DefaultClock;
    /// let service = VideoCatalogService::new(
    ///     Arc::new(InMemoryVideoRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = service;
    /// ```
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn map_repository_error(error: VideoRepositoryError) -> Error {
    match error {
        VideoRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("video store unavailable: {message}"))
        }
        VideoRepositoryError::Query { message } => {
            Error::internal(format!("video store error: {message}"))
        }
    }
}

fn map_validation_error(error: VideoValidationError) -> Error {
    let details = match &error {
        VideoValidationError::MissingFields(fields) => json!({
            "code": "missing_fields",
            "fields": fields.iter().map(|field| field.as_str()).collect::<Vec<_>>(),
        }),
        VideoValidationError::QualityOutOfRange(value) => json!({
            "code": "quality_out_of_range",
            "field": "transformation.quality",
            "value": value,
        }),
    };
    Error::invalid_request(error.to_string()).with_details(details)
}

#[async_trait]
impl<R> VideoCatalogQuery for VideoCatalogService<R>
where
    R: VideoRepository,
{
    async fn list(&self) -> Vec<Video> {
        match self.repo.list_newest_first().await {
            Ok(mut videos) => {
                sort_newest_first(&mut videos);
                videos
            }
            Err(error) => {
                warn!(%error, "video feed read failed; serving empty feed");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<R> VideoCatalogCommand for VideoCatalogService<R>
where
    R: VideoRepository,
{
    async fn create(&self, author: &UserId, draft: VideoDraft) -> Result<Video, Error> {
        let fields = draft.validate().map_err(map_validation_error)?;
        let video = Video::create(VideoId::random(), fields, self.clock.utc());
        self.repo
            .insert(&video)
            .await
            .map_err(map_repository_error)?;
        info!(video_id = %video.id, author = %author, "video published");
        Ok(video)
    }
}
