//! Integration tests for `DieselVideoRepository` against embedded PostgreSQL.
//!
//! These run the real INSERT, the feed ordering and the table constraints
//! from the embedded migrations.

use backend::domain::ports::{VideoRepository, VideoRepositoryError};
use backend::domain::{NewVideo, Transformation, Video, VideoId};
use backend::outbound::persistence::{
    DbPool, DieselVideoRepository, PoolConfig, run_pending_migrations,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

#[path = "support/pg_embed.rs"]
mod pg_embed;

mod support;

use pg_embed::test_cluster;
use support::{handle_cluster_setup_failure, reset_database};

const TEST_DB: &str = "diesel_video_repo_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselVideoRepository,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    reset_database(&cluster, TEST_DB)?;
    let database_url = cluster.connection().database_url(TEST_DB);
    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselVideoRepository::new(pool),
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn published_at(minutes: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid instant");
    base + Duration::minutes(minutes)
}

fn video(id: u128, title: &str, at: DateTime<Utc>) -> Video {
    Video::create(
        VideoId::from_uuid(Uuid::from_u128(id)),
        NewVideo {
            title: title.into(),
            description: format!("{title} at dawn"),
            video_url: format!("https://ik.imagekit.io/demo/videos/{id}.mp4"),
            thumbnail_url: format!("https://ik.imagekit.io/demo/images/{id}.png"),
            controls: true,
            transformation: Transformation::canonical(80),
        },
        at,
    )
}

#[rstest]
fn videos_list_newest_first(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: videos_list_newest_first skipped");
        return;
    };
    let repository = context.repository.clone();
    let older = video(1, "Harbour", published_at(0));
    let newer = video(2, "Lighthouse", published_at(5));
    let tied = video(3, "Breakwater", published_at(5));

    context
        .runtime
        .block_on(async {
            repository.insert(&older).await?;
            repository.insert(&newer).await?;
            repository.insert(&tied).await
        })
        .expect("insert videos");

    let listed = context
        .runtime
        .block_on(async { repository.list_newest_first().await })
        .expect("list videos");

    let titles: Vec<&str> = listed.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Breakwater", "Lighthouse", "Harbour"]);
    assert_eq!(listed[2], older);
}

#[rstest]
fn non_canonical_height_is_rejected(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: non_canonical_height_is_rejected skipped");
        return;
    };
    let repository = context.repository.clone();
    let mut landscape = video(4, "Sideways", published_at(0));
    landscape.transformation.height = 720;

    let err = context
        .runtime
        .block_on(async { repository.insert(&landscape).await })
        .expect_err("height CHECK rejects the row");
    assert_eq!(
        err,
        VideoRepositoryError::query("video row violates a table constraint")
    );

    let listed = context
        .runtime
        .block_on(async { repository.list_newest_first().await })
        .expect("list videos");
    assert!(listed.is_empty());
}
