//! Driving ports for the public feed.
//!
//! HTTP handlers depend on these traits rather than on
//! [`VideoCatalogService`](crate::domain::VideoCatalogService) so they can be
//! exercised with mocks.

use async_trait::async_trait;

use crate::domain::{Error, UserId, Video, VideoDraft};

/// Read side of the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoCatalogQuery: Send + Sync {
    /// All videos, newest first. Never fails: read errors yield an empty feed.
    async fn list(&self) -> Vec<Video>;
}

/// Write side of the catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoCatalogCommand: Send + Sync {
    /// Validate and persist a draft on behalf of `author`.
    async fn create(&self, author: &UserId, draft: VideoDraft) -> Result<Video, Error>;
}
