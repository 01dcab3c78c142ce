//! ImageKit upload API transport.
//!
//! Files go to the provider as `multipart/form-data` together with the
//! account public key and the backend-issued token, expiry and signature.
//! The body is streamed in fixed-size chunks so progress can be reported
//! as reqwest pulls them.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use url::Url;

use crate::progress::ProgressEvent;
use crate::transport::{TransportError, UploadRequest, UploadResult, UploadTransport};

/// Public upload endpoint.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "https://upload.imagekit.io/api/v1/files/upload";
/// Whole-request timeout applied unless overridden.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(10 * 60);

const CHUNK_SIZE: usize = 64 * 1024;

#[derive(Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// [`UploadTransport`] for ImageKit.
#[derive(Debug, Clone)]
pub struct ImageKitTransport {
    http: reqwest::Client,
    endpoint: Url,
    public_key: String,
    timeout: Duration,
}

impl ImageKitTransport {
    /// Transport posting to `endpoint` with the account's public key.
    pub fn new(http: reqwest::Client, public_key: impl Into<String>, endpoint: Url) -> Self {
        Self {
            http,
            endpoint,
            public_key: public_key.into(),
            timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    /// Replace the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configured request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn form(&self, request: UploadRequest, progress: UnboundedSender<ProgressEvent>) -> Result<Form, TransportError> {
        let UploadRequest {
            kind,
            file,
            credentials,
        } = request;
        let total = file.size();
        let part = Part::stream_with_length(chunked_body(file.bytes(), total, progress), total)
            .file_name(file.name().to_owned())
            .mime_str(file.mime_type())
            .map_err(map_reqwest_error)?;
        Ok(Form::new()
            .text("fileName", kind.file_name())
            .text("folder", kind.folder())
            .text("useUniqueFileName", "true")
            .text("publicKey", self.public_key.clone())
            .text("token", credentials.token)
            .text("expire", credentials.expire.to_string())
            .text("signature", credentials.signature)
            .part("file", part))
    }
}

fn chunked_body(bytes: Bytes, total: u64, progress: UnboundedSender<ProgressEvent>) -> reqwest::Body {
    reqwest::Body::wrap_stream(chunked_stream(bytes, total, progress))
}

fn chunked_stream(
    bytes: Bytes,
    total: u64,
    progress: UnboundedSender<ProgressEvent>,
) -> impl futures_util::Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static {
    let len = bytes.len();
    let chunks: Vec<Bytes> = (0..len)
        .step_by(CHUNK_SIZE)
        .map(|start| bytes.slice(start..len.min(start + CHUNK_SIZE)))
        .collect();
    let mut loaded: u64 = 0;
    futures_util::stream::iter(chunks).map(move |chunk| {
        loaded = loaded.saturating_add(u64::try_from(chunk.len()).unwrap_or(u64::MAX));
        if progress.send(ProgressEvent::new(loaded, total)).is_err() {
            debug!("progress receiver dropped");
        }
        Ok(chunk)
    })
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network {
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl UploadTransport for ImageKitTransport {
    async fn upload(
        &self,
        request: UploadRequest,
        progress: UnboundedSender<ProgressEvent>,
    ) -> Result<UploadResult, TransportError> {
        let form = self.form(request, progress)?;
        let response = self
            .http
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ProviderErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("upload rejected with status {status}"),
            };
            return Err(TransportError::Provider { message });
        }
        response
            .json::<UploadResult>()
            .await
            .map_err(map_reqwest_error)
    }
}
