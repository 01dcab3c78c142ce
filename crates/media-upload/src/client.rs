//! The upload client: validation, transfer and callbacks for one file at a
//! time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::{AbortHandle, Aborted, abortable};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::callbacks::UploadCallbacks;
use crate::credentials::UploadCredentials;
use crate::file::{FileKind, UploadFile};
use crate::machine::{TransitionError, UploadMachine, UploadState};
use crate::progress::ProgressEvent;
use crate::transport::{TransportError, UploadRequest, UploadResult, UploadTransport};
use crate::validation::{ValidationError, validate};

/// Why [`MediaUploadClient::upload`] did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// Another attempt on this client is still running.
    #[error("an upload is already in progress")]
    Busy,
    /// The file failed local validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The provider or network failed the transfer.
    #[error(transparent)]
    Provider(#[from] TransportError),
    /// [`MediaUploadClient::cancel`] stopped the transfer.
    #[error("upload cancelled")]
    Cancelled,
}

struct Shared {
    machine: UploadMachine,
    /// Incremented per started transfer; identifies the owner of `abort`.
    attempt: u64,
    abort: Option<(u64, AbortHandle)>,
}

/// Uploads files through a transport, one attempt at a time.
///
/// Clones share the same state, so any clone may observe or cancel the
/// running attempt.
pub struct MediaUploadClient<T: ?Sized> {
    transport: Arc<T>,
    shared: Arc<Mutex<Shared>>,
}

impl<T: ?Sized> Clone for MediaUploadClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Shared {
    fn owns(&self, attempt: u64) -> bool {
        matches!(self.abort, Some((owner, _)) if owner == attempt)
    }
}

fn note_unexpected(result: Result<(), TransitionError>) {
    if let Err(error) = result {
        warn!(%error, "unexpected upload state transition");
    }
}

impl<T> MediaUploadClient<T>
where
    T: UploadTransport + ?Sized,
{
    /// Client with a fresh idle state machine.
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            shared: Arc::new(Mutex::new(Shared {
                machine: UploadMachine::new(),
                attempt: 0,
                abort: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> UploadState {
        self.lock().machine.state().clone()
    }

    /// Message of the most recent failure, if it has not been cleared by a
    /// later success.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock().machine.error().map(str::to_owned)
    }

    /// Abort the running transfer and return to idle.
    ///
    /// Returns `false` when nothing was uploading.
    pub fn cancel(&self) -> bool {
        let mut shared = self.lock();
        if shared.machine.cancel().is_err() {
            return false;
        }
        if let Some((_, handle)) = shared.abort.take() {
            handle.abort();
        }
        info!("upload cancelled");
        true
    }

    /// Validate `file` as `kind` and, if it passes, send it to the provider.
    ///
    /// `callbacks` hears about the start, every progress percentage, and the
    /// final success or provider error. Validation failures are returned
    /// without firing any callback.
    ///
    /// # Errors
    /// See [`UploadError`].
    pub async fn upload<C>(
        &self,
        kind: FileKind,
        file: UploadFile,
        credentials: UploadCredentials,
        callbacks: &mut C,
    ) -> Result<UploadResult, UploadError>
    where
        C: UploadCallbacks + ?Sized,
    {
        let verdict = validate(kind, file.mime_type(), file.size());
        let size = file.size();
        let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();

        let (attempt, transfer) = {
            let mut shared = self.lock();
            shared
                .machine
                .select_file()
                .map_err(|_| UploadError::Busy)?;
            if let Err(error) = verdict {
                note_unexpected(shared.machine.validation_failed(&error));
                debug!(%kind, %error, "file rejected before upload");
                return Err(UploadError::Validation(error));
            }
            note_unexpected(shared.machine.validation_passed());
            let (transfer, abort) = abortable(self.transport.upload(
                UploadRequest {
                    kind,
                    file,
                    credentials,
                },
                progress_tx,
            ));
            shared.attempt = shared.attempt.wrapping_add(1);
            let attempt = shared.attempt;
            shared.abort = Some((attempt, abort));
            (attempt, transfer)
        };

        info!(%kind, size, "upload started");
        callbacks.on_upload_start();

        tokio::pin!(transfer);
        let outcome = loop {
            tokio::select! {
                Some(event) = progress_rx.recv() => self.report_progress(attempt, &event, callbacks),
                outcome = &mut transfer => break outcome,
            }
        };
        while let Ok(event) = progress_rx.try_recv() {
            self.report_progress(attempt, &event, callbacks);
        }

        self.finish(attempt, outcome, callbacks)
    }

    fn report_progress<C>(&self, attempt: u64, event: &ProgressEvent, callbacks: &mut C)
    where
        C: UploadCallbacks + ?Sized,
    {
        let percent = {
            let shared = self.lock();
            if !shared.owns(attempt) {
                return;
            }
            shared.machine.progress(event).ok().flatten()
        };
        if let Some(percent) = percent {
            callbacks.on_progress(percent);
        }
    }

    fn finish<C>(
        &self,
        attempt: u64,
        outcome: Result<Result<UploadResult, TransportError>, Aborted>,
        callbacks: &mut C,
    ) -> Result<UploadResult, UploadError>
    where
        C: UploadCallbacks + ?Sized,
    {
        let transfer = {
            let mut shared = self.lock();
            // A cancelled attempt no longer owns the machine; a newer one may.
            if !shared.owns(attempt) {
                return Err(UploadError::Cancelled);
            }
            shared.abort = None;
            match outcome {
                Err(Aborted) => return Err(UploadError::Cancelled),
                Ok(Ok(result)) => {
                    if shared.machine.succeed(result.clone()).is_err() {
                        return Err(UploadError::Cancelled);
                    }
                    Ok(result)
                }
                Ok(Err(error)) => {
                    if shared.machine.fail(error.to_string()).is_err() {
                        return Err(UploadError::Cancelled);
                    }
                    Err(error)
                }
            }
        };

        match transfer {
            Ok(result) => {
                info!(url = %result.url, "upload succeeded");
                callbacks.on_success(&result);
                Ok(result)
            }
            Err(error) => {
                warn!(%error, "upload failed");
                callbacks.on_error(&error.to_string());
                Err(UploadError::Provider(error))
            }
        }
    }
}
