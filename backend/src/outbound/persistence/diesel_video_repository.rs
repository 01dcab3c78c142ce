//! PostgreSQL-backed [`VideoRepository`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{VideoRepository, VideoRepositoryError};
use crate::domain::{Transformation, Video, VideoId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewVideoRow, VideoRow};
use super::pool::DbPool;
use super::schema::videos;

/// Diesel adapter for the `videos` table.
#[derive(Clone)]
pub struct DieselVideoRepository {
    pool: DbPool,
}

impl DieselVideoRepository {
    /// Use connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_row(video: &Video) -> NewVideoRow<'_> {
    NewVideoRow {
        id: *video.id.as_uuid(),
        title: &video.title,
        description: &video.description,
        video_url: &video.video_url,
        thumbnail_url: &video.thumbnail_url,
        controls: video.controls,
        height: i32::try_from(video.transformation.height).unwrap_or(i32::MAX),
        width: i32::try_from(video.transformation.width).unwrap_or(i32::MAX),
        quality: i16::from(video.transformation.quality),
        created_at: video.created_at,
        updated_at: video.updated_at,
    }
}

fn from_row(row: VideoRow) -> Result<Video, VideoRepositoryError> {
    let quality = u8::try_from(row.quality)
        .map_err(|_| VideoRepositoryError::query(format!("quality out of range: {}", row.quality)))?;
    let height = u32::try_from(row.height)
        .map_err(|_| VideoRepositoryError::query(format!("negative height: {}", row.height)))?;
    let width = u32::try_from(row.width)
        .map_err(|_| VideoRepositoryError::query(format!("negative width: {}", row.width)))?;
    Ok(Video {
        id: VideoId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        video_url: row.video_url,
        thumbnail_url: row.thumbnail_url,
        controls: row.controls,
        transformation: Transformation {
            height,
            width,
            quality,
        },
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl VideoRepository for DieselVideoRepository {
    async fn insert(&self, video: &Video) -> Result<(), VideoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(videos::table)
            .values(to_row(video))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Video>, VideoRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<VideoRow> = videos::table
            .select(VideoRow::as_select())
            .order((videos::created_at.desc(), videos::id.desc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(from_row).collect()
    }
}
