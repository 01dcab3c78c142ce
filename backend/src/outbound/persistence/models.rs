//! Row structs for the `videos` table. Never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::videos;

/// A row read from `videos`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = videos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VideoRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub controls: bool,
    pub height: i32,
    pub width: i32,
    pub quality: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row written to `videos`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = videos)]
pub(crate) struct NewVideoRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub video_url: &'a str,
    pub thumbnail_url: &'a str,
    pub controls: bool,
    pub height: i32,
    pub width: i32,
    pub quality: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
