//! Driven port for video persistence.

use async_trait::async_trait;

use crate::domain::Video;

use super::define_port_error;

define_port_error! {
    /// Failures reported by video storage adapters.
    pub enum VideoRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "video store connection failed: {message}",
        /// A statement failed or a row could not be mapped.
        Query { message: String } => "video store query failed: {message}",
    }
}

/// Storage for published videos.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Persist a single new record.
    async fn insert(&self, video: &Video) -> Result<(), VideoRepositoryError>;

    /// Every stored video ordered by creation time, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Video>, VideoRepositoryError>;
}
