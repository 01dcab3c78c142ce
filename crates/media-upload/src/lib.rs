//! Direct-to-provider media uploads for the reels feed.
//!
//! A [`MediaUploadClient`] takes one file at a time through
//! `Idle → Validating → Uploading → Succeeded | Failed`. Validation runs
//! locally against the [`FileKind`] rules; the transfer goes straight to the
//! media provider through an [`UploadTransport`] using short-lived
//! [`UploadCredentials`] issued by the backend. Progress, success and errors
//! reach the caller through [`UploadCallbacks`], and the returned future
//! resolves with the provider's [`UploadResult`].
//!
//! [`ImageKitTransport`] is the production transport and [`BackendClient`]
//! talks to the reels backend for sessions, credentials and publishing.

pub mod backend;
pub mod callbacks;
pub mod client;
pub mod credentials;
pub mod file;
pub mod imagekit;
pub mod machine;
pub mod progress;
pub mod transport;
pub mod validation;

pub use backend::{
    BackendClient, BackendError, PublishRequest, PublishTransformation, PublishedVideo,
};
pub use callbacks::{NoopCallbacks, UploadCallbacks};
pub use client::{MediaUploadClient, UploadError};
pub use credentials::UploadCredentials;
pub use file::{FileKind, UploadFile};
pub use imagekit::{DEFAULT_UPLOAD_ENDPOINT, DEFAULT_UPLOAD_TIMEOUT, ImageKitTransport};
pub use machine::{FailureKind, TransitionError, UploadMachine, UploadState};
pub use progress::{ProgressEvent, percentage};
pub use transport::{TransportError, UploadRequest, UploadResult, UploadTransport};
pub use validation::{ValidationError, validate};
