//! `reel-upload`: sign in to the reels backend, fetch upload credentials,
//! send one file straight to ImageKit and optionally publish it to the feed.
//!
//! Ctrl-C during the transfer cancels it and exits without publishing.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use media_upload::{
    BackendClient, BackendError, DEFAULT_UPLOAD_ENDPOINT, FileKind, ImageKitTransport,
    MediaUploadClient, PublishRequest, PublishTransformation, UploadCallbacks, UploadError,
    UploadFile, UploadResult,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "reel-upload", version, about = "Upload a reel or thumbnail to ImageKit")]
struct Args {
    /// File to upload.
    path: PathBuf,
    /// Whether the file is a `video` or an `image`.
    #[arg(long, env = "REELS_KIND", default_value = "video")]
    kind: FileKind,
    /// Override the MIME type guessed from the file extension.
    #[arg(long, env = "REELS_CONTENT_TYPE")]
    content_type: Option<String>,
    /// Base URL of the reels backend.
    #[arg(long, env = "REELS_BACKEND_URL", default_value = "http://localhost:8080")]
    backend_url: Url,
    #[arg(long, env = "REELS_USERNAME")]
    username: String,
    #[arg(long, env = "REELS_PASSWORD", hide_env_values = true)]
    password: String,
    /// ImageKit account public key.
    #[arg(long, env = "REELS_IMAGEKIT_PUBLIC_KEY")]
    public_key: String,
    #[arg(long, env = "REELS_IMAGEKIT_UPLOAD_URL", default_value = DEFAULT_UPLOAD_ENDPOINT)]
    upload_url: Url,
    /// Abort the transfer after this many seconds.
    #[arg(long, env = "REELS_UPLOAD_TIMEOUT_SECS", default_value_t = 600)]
    timeout_secs: u64,
    /// Publish the uploaded video with this title.
    #[arg(long, requires = "description")]
    title: Option<String>,
    #[arg(long, requires = "title")]
    description: Option<String>,
    /// Thumbnail to publish with; defaults to the provider's thumbnail.
    #[arg(long)]
    thumbnail_url: Option<String>,
    #[arg(long)]
    hide_controls: bool,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("failed to read upload file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    #[error("no thumbnail URL available; pass --thumbnail-url")]
    MissingThumbnail,
}

/// Logs progress in steps of ten percent.
#[derive(Debug, Default)]
struct ProgressLog {
    last: Option<u8>,
}

impl UploadCallbacks for ProgressLog {
    fn on_upload_start(&mut self) {
        info!("transfer started");
    }

    fn on_progress(&mut self, percent: u8) {
        let step = percent / 10;
        if self.last.is_none_or(|last| last / 10 < step) {
            info!(percent, "uploading");
            self.last = Some(percent);
        }
    }

    fn on_success(&mut self, result: &UploadResult) {
        info!(url = %result.url, "transfer finished");
    }

    fn on_error(&mut self, message: &str) {
        error!(message, "transfer failed");
    }
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    match run(Args::parse()).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "reel-upload failed");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let backend = BackendClient::new(args.backend_url.clone())?;
    backend.login(&args.username, &args.password).await?;
    let credentials = backend.upload_credentials().await?;
    let file = UploadFile::from_path(&args.path, args.content_type.as_deref()).await?;

    let transport = ImageKitTransport::new(
        reqwest::Client::builder().build()?,
        args.public_key.clone(),
        args.upload_url.clone(),
    )
    .with_timeout(Duration::from_secs(args.timeout_secs));
    let client = MediaUploadClient::new(Arc::new(transport));
    let mut progress = ProgressLog::default();

    let result = tokio::select! {
        result = client.upload(args.kind, file, credentials, &mut progress) => result?,
        _ = tokio::signal::ctrl_c() => {
            client.cancel();
            warn!("interrupted; upload cancelled");
            return Err(UploadError::Cancelled.into());
        }
    };

    writeln!(std::io::stdout().lock(), "{}", result.url)?;

    if let (Some(title), Some(description)) = (args.title, args.description) {
        let thumbnail_url = args
            .thumbnail_url
            .or(result.thumbnail_url)
            .ok_or(CliError::MissingThumbnail)?;
        let video = backend
            .publish(&PublishRequest {
                title,
                description,
                video_url: result.url,
                thumbnail_url,
                controls: args.hide_controls.then_some(false),
                transformation: args.quality.map(|quality| PublishTransformation { quality }),
            })
            .await?;
        let summary = serde_json::json!({ "id": video.id, "createdAt": video.created_at });
        writeln!(std::io::stdout().lock(), "{summary}")?;
    }
    Ok(())
}
