//! Feed endpoints.
//!
//! ```text
//! GET  /api/videos
//! POST /api/videos {"title":"…","description":"…","videoUrl":"…","thumbnailUrl":"…"}
//! ```
//!
//! Both endpoints answer `200` when the store misbehaves: reads return an
//! empty array and writes return `{"error": "Failed to create a video."}`.
//! Browser clients depend on that shape.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{Error, ErrorCode, Transformation, Video, VideoDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, MessageErrorBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Message returned when a write reaches the store and fails.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create a video.";

/// Rendering parameters as serialised on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransformationBody {
    /// Always 1920.
    #[schema(example = 1920)]
    pub height: u32,
    /// Always 1080.
    #[schema(example = 1080)]
    pub width: u32,
    /// 1..=100.
    #[schema(example = 100)]
    pub quality: u8,
}

impl From<Transformation> for TransformationBody {
    fn from(value: Transformation) -> Self {
        Self {
            height: value.height,
            width: value.width,
            quality: value.quality,
        }
    }
}

/// A published video as returned by the feed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VideoBody {
    /// Identifier.
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Provider URL of the video.
    pub video_url: String,
    /// Provider URL of the thumbnail.
    pub thumbnail_url: String,
    /// Whether player controls are shown.
    pub controls: bool,
    /// Rendering parameters.
    pub transformation: TransformationBody,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last update instant.
    pub updated_at: DateTime<Utc>,
}

impl From<Video> for VideoBody {
    fn from(video: Video) -> Self {
        Self {
            id: *video.id.as_uuid(),
            title: video.title,
            description: video.description,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            controls: video.controls,
            transformation: video.transformation.into(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

/// Optional rendering hints; only `quality` is honoured.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TransformationRequest {
    /// Ignored; the stored height is always 1920.
    pub height: Option<u32>,
    /// Ignored; the stored width is always 1080.
    pub width: Option<u32>,
    /// 1..=100, defaults to 100.
    pub quality: Option<i64>,
}

/// Body of `POST /api/videos`.
///
/// Every field is optional at the JSON level so that missing fields are
/// reported together as a validation error instead of a parse failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    /// Required.
    #[schema(example = "Sunset at the pier")]
    pub title: Option<String>,
    /// Required.
    pub description: Option<String>,
    /// Required; URL returned by the media provider.
    pub video_url: Option<String>,
    /// Required; URL returned by the media provider.
    pub thumbnail_url: Option<String>,
    /// Defaults to `true`.
    pub controls: Option<bool>,
    /// Optional rendering hints.
    pub transformation: Option<TransformationRequest>,
}

impl From<CreateVideoRequest> for VideoDraft {
    fn from(body: CreateVideoRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            video_url: body.video_url,
            thumbnail_url: body.thumbnail_url,
            controls: body.controls,
            quality: body.transformation.and_then(|t| t.quality),
        }
    }
}

/// Newest-first feed of every published video.
#[utoipa::path(
    get,
    path = "/api/videos",
    responses(
        (status = 200, description = "Videos, newest first; empty on store failure", body = [VideoBody])
    ),
    tags = ["videos"],
    operation_id = "listVideos",
    security([])
)]
#[get("/api/videos")]
pub async fn list_videos(state: web::Data<HttpState>) -> web::Json<Vec<VideoBody>> {
    let videos = state.videos.list().await;
    web::Json(videos.into_iter().map(VideoBody::from).collect())
}

/// Publish a video on behalf of the signed-in user.
#[utoipa::path(
    post,
    path = "/api/videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 200, description = "Created video, or `{error}` when the store failed", body = VideoBody),
        (status = 400, description = "Missing fields or malformed body", body = ErrorSchema),
        (status = 401, description = "No session", body = ErrorSchema)
    ),
    tags = ["videos"],
    operation_id = "createVideo"
)]
#[post("/api/videos")]
pub async fn create_video(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Result<web::Json<CreateVideoRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let author = session.require_user_id()?;
    let body = payload.map_err(|err| {
        Error::invalid_request("request body must be a JSON object")
            .with_details(json!({ "reason": err.to_string() }))
    })?;

    match state
        .videos_command
        .create(&author, body.into_inner().into())
        .await
    {
        Ok(video) => Ok(HttpResponse::Ok().json(VideoBody::from(video))),
        Err(err) if err.code() == ErrorCode::InvalidRequest => Err(err),
        Err(err) => {
            error!(code = ?err.code(), message = err.message(), "video create failed");
            Ok(HttpResponse::Ok().json(MessageErrorBody::new(CREATE_FAILED_MESSAGE)))
        }
    }
}
