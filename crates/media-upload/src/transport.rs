//! The port between the upload client and a media provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::credentials::UploadCredentials;
use crate::file::{FileKind, UploadFile};
use crate::progress::ProgressEvent;

/// One transfer's inputs.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Media kind, deciding the provider folder and file name.
    pub kind: FileKind,
    /// File to send.
    pub file: UploadFile,
    /// Authorisation for this upload.
    pub credentials: UploadCredentials,
}

/// What the provider reports about a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResult {
    /// Durable delivery URL.
    pub url: String,
    /// Provider file identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
    /// Stored name after uniquifying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Path inside the provider's storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    /// Generated thumbnail, when the provider made one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Transfer failures. All of them count as provider errors for the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The provider answered with an error.
    #[error("{message}")]
    Provider {
        /// Message supplied by the provider.
        message: String,
    },
    /// No answer within the configured timeout.
    #[error("upload timed out")]
    Timeout,
    /// The request could not be sent or the response could not be read.
    #[error("upload failed: {message}")]
    Network {
        /// Underlying error text.
        message: String,
    },
}

/// Sends a file to the media provider.
///
/// Implementations push [`ProgressEvent`]s into `progress` as bytes leave
/// and may stop early if the future is dropped.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Transfer `request.file`, resolving with the provider's description
    /// of the stored file.
    async fn upload(
        &self,
        request: UploadRequest,
        progress: UnboundedSender<ProgressEvent>,
    ) -> Result<UploadResult, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_provider_response_with_extra_fields() {
        let body = r#"{
            "fileId": "598821f949c0a938d57563bd",
            "name": "video_XyZ.mp4",
            "url": "https://ik.imagekit.io/demo/videos/video_XyZ.mp4",
            "filePath": "/videos/video_XyZ.mp4",
            "thumbnailUrl": "https://ik.imagekit.io/demo/tr:n-ik_ml_thumbnail/videos/video_XyZ.mp4",
            "height": 1920,
            "width": 1080,
            "size": 1048576
        }"#;
        let result: UploadResult = serde_json::from_str(body).expect("valid body");
        assert_eq!(result.file_path.as_deref(), Some("/videos/video_XyZ.mp4"));
        assert!(result.thumbnail_url.is_some());
    }

    #[test]
    fn provider_errors_display_the_provider_message() {
        let err = TransportError::Provider {
            message: "Your account cannot be authenticated.".into(),
        };
        assert_eq!(err.to_string(), "Your account cannot be authenticated.");
    }
}
