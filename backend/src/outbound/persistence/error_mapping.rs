//! Diesel and pool failures translated into port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::VideoRepositoryError;

use super::pool::PoolError;

pub(crate) fn map_pool_error(error: PoolError) -> VideoRepositoryError {
    VideoRepositoryError::connection(error.into_message())
}

pub(crate) fn map_diesel_error(error: DieselError) -> VideoRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "video query failed");
        }
        other => debug!(error = %other, "video query failed"),
    }
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            VideoRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            VideoRepositoryError::query("duplicate video id")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            VideoRepositoryError::query("video row violates a table constraint")
        }
        DieselError::NotFound => VideoRepositoryError::query("record not found"),
        _ => VideoRepositoryError::query("database error"),
    }
}
