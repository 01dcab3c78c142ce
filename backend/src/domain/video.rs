//! Video records published to the public feed.
//!
//! A [`VideoDraft`] carries whatever the client sent. [`VideoDraft::validate`]
//! turns it into a [`NewVideo`] or reports every missing field at once, and
//! [`Video::create`] stamps the identifier, canonical dimensions and
//! timestamps.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Portrait height every stored video is rendered at.
pub const CANONICAL_HEIGHT: u32 = 1920;
/// Portrait width every stored video is rendered at.
pub const CANONICAL_WIDTH: u32 = 1080;
/// Quality applied when the client does not choose one.
pub const DEFAULT_QUALITY: u8 = 100;
/// Lowest accepted quality.
pub const MIN_QUALITY: u8 = 1;
/// Highest accepted quality.
pub const MAX_QUALITY: u8 = 100;

/// Stable identifier assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(Uuid);

impl VideoId {
    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Rendering parameters passed to the media provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    /// Always [`CANONICAL_HEIGHT`].
    pub height: u32,
    /// Always [`CANONICAL_WIDTH`].
    pub width: u32,
    /// 1..=100.
    pub quality: u8,
}

impl Transformation {
    /// Canonical portrait dimensions with the given quality.
    pub fn canonical(quality: u8) -> Self {
        Self {
            height: CANONICAL_HEIGHT,
            width: CANONICAL_WIDTH,
            quality,
        }
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::canonical(DEFAULT_QUALITY)
    }
}

/// Required text fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoField {
    /// `title`
    Title,
    /// `description`
    Description,
    /// `videoUrl`
    VideoUrl,
    /// `thumbnailUrl`
    ThumbnailUrl,
}

impl VideoField {
    /// JSON field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::VideoUrl => "videoUrl",
            Self::ThumbnailUrl => "thumbnailUrl",
        }
    }
}

impl fmt::Display for VideoField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a draft cannot be published.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VideoValidationError {
    /// One or more required fields were absent or blank.
    #[error("Missing required fields.")]
    MissingFields(Vec<VideoField>),
    /// Quality fell outside 1..=100.
    #[error("quality must be between {MIN_QUALITY} and {MAX_QUALITY}, got {0}")]
    QualityOutOfRange(i64),
}

/// Unvalidated publish request.
///
/// Client supplied height and width are deliberately absent: the stored
/// transformation always uses the canonical dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDraft {
    /// Title shown in the feed.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Provider URL of the uploaded video.
    pub video_url: Option<String>,
    /// Provider URL of the thumbnail image.
    pub thumbnail_url: Option<String>,
    /// Whether player controls are shown.
    pub controls: Option<bool>,
    /// Requested rendering quality.
    pub quality: Option<i64>,
}

/// Validated fields ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVideo {
    /// Title, as supplied.
    pub title: String,
    /// Description, as supplied.
    pub description: String,
    /// Video URL, as supplied.
    pub video_url: String,
    /// Thumbnail URL, as supplied.
    pub thumbnail_url: String,
    /// Player controls flag.
    pub controls: bool,
    /// Rendering parameters.
    pub transformation: Transformation,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

impl VideoDraft {
    /// Check required fields and apply defaults.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{VideoDraft, VideoField, VideoValidationError};
    ///
    /// let draft = VideoDraft {
    ///     title: Some("Sunset".into()),
    ///     description: Some("   ".into()),
    ///     ..VideoDraft::default()
    /// };
    /// let err = draft.validate().unwrap_err();
    /// assert_eq!(
    ///     err,
    ///     VideoValidationError::MissingFields(vec![
    ///         VideoField::Description,
    ///         VideoField::VideoUrl,
    ///         VideoField::ThumbnailUrl,
    ///     ])
    /// );
    /// ```
    pub fn validate(self) -> Result<NewVideo, VideoValidationError> {
        let title = present(self.title);
        let description = present(self.description);
        let video_url = present(self.video_url);
        let thumbnail_url = present(self.thumbnail_url);

        let (Some(title), Some(description), Some(video_url), Some(thumbnail_url)) =
            (title.clone(), description.clone(), video_url.clone(), thumbnail_url.clone())
        else {
            let missing = [
                (VideoField::Title, title.is_none()),
                (VideoField::Description, description.is_none()),
                (VideoField::VideoUrl, video_url.is_none()),
                (VideoField::ThumbnailUrl, thumbnail_url.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, missing)| missing.then_some(field))
            .collect();
            return Err(VideoValidationError::MissingFields(missing));
        };

        let quality = match self.quality {
            None => DEFAULT_QUALITY,
            Some(raw) => u8::try_from(raw)
                .ok()
                .filter(|q| (MIN_QUALITY..=MAX_QUALITY).contains(q))
                .ok_or(VideoValidationError::QualityOutOfRange(raw))?,
        };

        Ok(NewVideo {
            title,
            description,
            video_url,
            thumbnail_url,
            controls: self.controls.unwrap_or(true),
            transformation: Transformation::canonical(quality),
        })
    }
}

/// A published video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    /// Identifier.
    pub id: VideoId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Provider URL of the video.
    pub video_url: String,
    /// Provider URL of the thumbnail.
    pub thumbnail_url: String,
    /// Player controls flag.
    pub controls: bool,
    /// Rendering parameters.
    pub transformation: Transformation,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant; equals `created_at` since records are immutable.
    pub updated_at: DateTime<Utc>,
}

impl Video {
    /// Stamp validated fields with an identifier and timestamps.
    pub fn create(id: VideoId, fields: NewVideo, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            description: fields.description,
            video_url: fields.video_url,
            thumbnail_url: fields.thumbnail_url,
            controls: fields.controls,
            transformation: fields.transformation,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Order videos newest first, breaking timestamp ties by descending id.
pub fn sort_newest_first(videos: &mut [Video]) {
    videos.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
