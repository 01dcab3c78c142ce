//! PostgreSQL persistence through Diesel, `diesel-async` and a bb8 pool.
//!
//! Row structs and the table definition are private to this module; the
//! domain only ever sees [`Video`](crate::domain::Video).

mod diesel_video_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_video_repository::DieselVideoRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
