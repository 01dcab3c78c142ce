//! The per-client upload state machine.
//!
//! Transitions are plain methods that either move the machine or explain
//! why they cannot. The machine performs no I/O; [`MediaUploadClient`]
//! drives it and turns transitions into callbacks.
//!
//! [`MediaUploadClient`]: crate::MediaUploadClient

use crate::progress::ProgressEvent;
use crate::transport::UploadResult;
use crate::validation::ValidationError;

/// Why an attempt ended in [`UploadState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected locally before any transfer.
    Validation,
    /// The provider or the network failed the transfer.
    Provider,
}

/// Where the current attempt stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A file was selected and is being checked.
    Validating,
    /// Bytes are on their way to the provider.
    Uploading,
    /// The provider stored the file.
    Succeeded(UploadResult),
    /// The attempt failed.
    Failed {
        /// Failure category.
        kind: FailureKind,
        /// Message shown to the user.
        message: String,
    },
}

impl UploadState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Uploading => "uploading",
            Self::Succeeded(_) => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// A transition the current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// A file was selected while another attempt is still running.
    #[error("an upload is already in progress")]
    UploadInProgress,
    /// Any other out-of-order event.
    #[error("cannot {event} while {state}")]
    Invalid {
        /// Event that was attempted.
        event: &'static str,
        /// State the machine was in.
        state: &'static str,
    },
}

/// Upload lifecycle for one client.
#[derive(Debug, Clone, Default)]
pub struct UploadMachine {
    state: UploadState,
    error: Option<String>,
}

impl UploadMachine {
    /// A machine in [`UploadState::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &UploadState {
        &self.state
    }

    /// Message of the most recent failure, cleared by a later success.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while validating or uploading.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        matches!(self.state, UploadState::Validating | UploadState::Uploading)
    }

    fn invalid(&self, event: &'static str) -> TransitionError {
        TransitionError::Invalid {
            event,
            state: self.state.name(),
        }
    }

    /// Start a new attempt: `Idle | Succeeded | Failed → Validating`.
    ///
    /// # Errors
    /// [`TransitionError::UploadInProgress`] while busy.
    pub fn select_file(&mut self) -> Result<(), TransitionError> {
        if self.is_busy() {
            return Err(TransitionError::UploadInProgress);
        }
        self.state = UploadState::Validating;
        Ok(())
    }

    /// `Validating → Failed` with a validation message.
    ///
    /// # Errors
    /// Fails unless validating.
    pub fn validation_failed(&mut self, error: &ValidationError) -> Result<(), TransitionError> {
        if self.state != UploadState::Validating {
            return Err(self.invalid("reject a file"));
        }
        self.fail_with(FailureKind::Validation, error.to_string());
        Ok(())
    }

    /// `Validating → Uploading`.
    ///
    /// # Errors
    /// Fails unless validating.
    pub fn validation_passed(&mut self) -> Result<(), TransitionError> {
        if self.state != UploadState::Validating {
            return Err(self.invalid("start uploading"));
        }
        self.state = UploadState::Uploading;
        Ok(())
    }

    /// Observe progress while uploading. Returns the percentage to report,
    /// if the event carries a usable total.
    ///
    /// # Errors
    /// Fails unless uploading.
    pub fn progress(&self, event: &ProgressEvent) -> Result<Option<u8>, TransitionError> {
        if self.state != UploadState::Uploading {
            return Err(self.invalid("report progress"));
        }
        Ok(event.percent())
    }

    /// `Uploading → Succeeded`, clearing any earlier error.
    ///
    /// # Errors
    /// Fails unless uploading.
    pub fn succeed(&mut self, result: UploadResult) -> Result<(), TransitionError> {
        if self.state != UploadState::Uploading {
            return Err(self.invalid("complete"));
        }
        self.error = None;
        self.state = UploadState::Succeeded(result);
        Ok(())
    }

    /// `Uploading → Failed` with the provider's message.
    ///
    /// # Errors
    /// Fails unless uploading.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), TransitionError> {
        if self.state != UploadState::Uploading {
            return Err(self.invalid("fail"));
        }
        self.fail_with(FailureKind::Provider, message.into());
        Ok(())
    }

    /// `Uploading → Idle`, abandoning the transfer.
    ///
    /// # Errors
    /// Fails unless uploading.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        if self.state != UploadState::Uploading {
            return Err(self.invalid("cancel"));
        }
        self.state = UploadState::Idle;
        Ok(())
    }

    fn fail_with(&mut self, kind: FailureKind, message: String) {
        self.error = Some(message.clone());
        self.state = UploadState::Failed { kind, message };
    }
}
