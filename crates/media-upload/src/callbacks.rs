//! Hooks fired as an upload moves through its states.
//!
//! Every hook runs on the task awaiting
//! [`MediaUploadClient::upload`](crate::MediaUploadClient::upload), one at
//! a time, so implementations need no synchronisation of their own.

use crate::transport::UploadResult;

/// Observer for one upload attempt. Every method defaults to doing nothing.
pub trait UploadCallbacks {
    /// Validation passed and the transfer is starting.
    fn on_upload_start(&mut self) {}

    /// Rounded percentage of bytes sent.
    fn on_progress(&mut self, percent: u8) {
        let _ = percent;
    }

    /// The provider stored the file.
    fn on_success(&mut self, result: &UploadResult) {
        let _ = result;
    }

    /// The provider or network failed the transfer.
    fn on_error(&mut self, message: &str) {
        let _ = message;
    }
}

/// Callbacks that ignore every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallbacks;

impl UploadCallbacks for NoopCallbacks {}
