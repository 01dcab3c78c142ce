//! Client for the reels backend: session login, upload credentials and
//! publishing finished uploads to the feed.
//!
//! The session lives in a cookie, so the underlying `reqwest` client keeps a
//! cookie store and every call after [`BackendClient::login`] is
//! authenticated.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::credentials::UploadCredentials;

/// Failures talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never produced a usable response.
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// An endpoint path could not be joined onto the base URL.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The session is missing or the credentials were refused.
    #[error("unauthorised")]
    Unauthorized,
    /// The backend answered with an error message.
    #[error("backend rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status of the response.
        status: u16,
        /// Message taken from the response body.
        message: String,
    },
}

/// Body of `POST /api/videos`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    /// Title shown in the feed.
    pub title: String,
    /// Description shown under the title.
    pub description: String,
    /// Provider URL of the uploaded video.
    pub video_url: String,
    /// Provider URL of the thumbnail.
    pub thumbnail_url: String,
    /// Player controls; the backend defaults to `true` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controls: Option<bool>,
    /// Rendering quality between 1 and 100; the backend defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transformation: Option<PublishTransformation>,
}

/// Rendering overrides sent with a publish request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishTransformation {
    /// Quality between 1 and 100.
    pub quality: u8,
}

/// A video record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedVideo {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Title.
    pub title: String,
    /// Provider URL of the video.
    pub video_url: String,
    /// Provider URL of the thumbnail.
    pub thumbnail_url: String,
    /// RFC 3339 creation instant.
    pub created_at: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PublishResponse {
    Failed { error: String },
    Created(PublishedVideo),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// Cookie-authenticated client for the reels backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// Build a client for the backend served at `base`.
    pub fn new(base: Url) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { http, base })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Open a session. The cookie is kept for later calls.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), BackendError> {
        let response = self
            .http
            .post(self.base.join("/api/auth/login")?)
            .json(&LoginBody { username, password })
            .send()
            .await?;
        check_status(response).await?;
        info!(username, "signed in to backend");
        Ok(())
    }

    /// Fetch fresh credentials for one direct upload.
    pub async fn upload_credentials(&self) -> Result<UploadCredentials, BackendError> {
        let response = self
            .http
            .get(self.base.join("/api/imagekit-auth")?)
            .send()
            .await?;
        let credentials = check_status(response)
            .await?
            .json::<UploadCredentials>()
            .await?;
        debug!(expire = credentials.expire, "received upload credentials");
        Ok(credentials)
    }

    /// Add a video to the feed.
    ///
    /// Storage failures come back as `200 {"error": ...}`, which is mapped to
    /// [`BackendError::Rejected`].
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishedVideo, BackendError> {
        let response = self
            .http
            .post(self.base.join("/api/videos")?)
            .json(request)
            .send()
            .await?;
        let response = check_status(response).await?;
        let status = response.status().as_u16();
        match response.json::<PublishResponse>().await? {
            PublishResponse::Created(video) => {
                info!(id = %video.id, "published video");
                Ok(video)
            }
            PublishResponse::Failed { error } => Err(BackendError::Rejected {
                status,
                message: error,
            }),
        }
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthorized);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    Err(BackendError::Rejected {
        status: status.as_u16(),
        message,
    })
}
