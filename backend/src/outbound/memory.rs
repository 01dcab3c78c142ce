//! Process-local [`VideoRepository`] used when no database is configured.
//!
//! Contents vanish on restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{VideoRepository, VideoRepositoryError};
use crate::domain::{Video, sort_newest_first};

/// Videos held in a vector behind an async lock.
#[derive(Debug, Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<Vec<Video>>,
}

impl InMemoryVideoRepository {
    /// Start with `videos` already stored.
    pub fn with_videos(videos: Vec<Video>) -> Self {
        Self {
            videos: RwLock::new(videos),
        }
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn insert(&self, video: &Video) -> Result<(), VideoRepositoryError> {
        let mut videos = self.videos.write().await;
        if videos.iter().any(|existing| existing.id == video.id) {
            return Err(VideoRepositoryError::query(format!(
                "duplicate video id {}",
                video.id
            )));
        }
        videos.push(video.clone());
        Ok(())
    }

    async fn list_newest_first(&self) -> Result<Vec<Video>, VideoRepositoryError> {
        let mut snapshot = self.videos.read().await.clone();
        sort_newest_first(&mut snapshot);
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewVideo, Transformation, VideoId};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("valid instant")
    }

    fn video(title: &str, at: DateTime<Utc>) -> Video {
        Video::create(
            VideoId::random(),
            NewVideo {
                title: title.into(),
                description: "d".into(),
                video_url: "v".into(),
                thumbnail_url: "t".into(),
                controls: true,
                transformation: Transformation::default(),
            },
            at,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn lists_newest_first(epoch: DateTime<Utc>) {
        let repo = InMemoryVideoRepository::default();
        repo.insert(&video("old", epoch)).await.expect("insert");
        repo.insert(&video("new", epoch + Duration::minutes(5)))
            .await
            .expect("insert");

        let titles: Vec<_> = repo
            .list_newest_first()
            .await
            .expect("list")
            .into_iter()
            .map(|v| v.title)
            .collect();
        assert_eq!(titles, ["new", "old"]);
    }

    #[rstest]
    #[tokio::test]
    async fn rejects_duplicate_ids(epoch: DateTime<Utc>) {
        let first = video("one", epoch);
        let repo = InMemoryVideoRepository::with_videos(vec![first.clone()]);
        let err = repo.insert(&first).await.expect_err("duplicate");
        assert!(matches!(err, VideoRepositoryError::Query { .. }));
    }
}
