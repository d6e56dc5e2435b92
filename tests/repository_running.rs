use chrono::NaiveDate;
use fitness_tracker::domain::entities::{
    NewRunningSession, RaceResult, RunType, RunningSessionPatch,
};
use fitness_tracker::domain::repositories::RunningSessionRepository;
use fitness_tracker::infrastructure::persistence::PgRunningSessionRepository;
use fitness_tracker::utils::pace::Segment;
use sqlx::PgPool;
use std::sync::Arc;

fn new_run(user: &str, day: u32) -> NewRunningSession {
    NewRunningSession {
        user_uid: user.to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
        run_type: RunType::EasyRun,
        distance: Some(5.0),
        duration: Some(25.0),
        average_pace: Some("5:00".to_string()),
        intervals: None,
        race: None,
        segments: Vec::new(),
        notes: None,
        perceived_effort: Some(4),
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let repo = PgRunningSessionRepository::new(Arc::new(pool));

    let mut run = new_run("runner-1", 1);
    run.run_type = RunType::Race;
    run.race = Some(RaceResult {
        name: "Spring 5K".to_string(),
        distance: 5.0,
        official_time: "24:59".to_string(),
        placement: Some(12),
    });
    run.segments = vec![Segment::with_pace(25.0, "5:00")];

    let created = repo.create(run).await.unwrap();
    let found = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(found, created);
    assert_eq!(found.run_type, RunType::Race);
    assert_eq!(found.race.unwrap().placement, Some(12));
    assert_eq!(found.segments.len(), 1);
}

#[sqlx::test]
async fn test_find_missing(pool: PgPool) {
    let repo = PgRunningSessionRepository::new(Arc::new(pool));

    assert!(repo.find_by_id(424242).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_by_owner_newest_first(pool: PgPool) {
    let repo = PgRunningSessionRepository::new(Arc::new(pool));

    let first = repo.create(new_run("runner-1", 1)).await.unwrap();
    let second = repo.create(new_run("runner-1", 2)).await.unwrap();
    repo.create(new_run("runner-2", 3)).await.unwrap();

    let all = repo.list_by_owner("runner-1", None).await.unwrap();
    assert_eq!(
        all.iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );

    let limited = repo.list_by_owner("runner-1", Some(1)).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, second.id);
}

#[sqlx::test]
async fn test_update_patch(pool: PgPool) {
    let repo = PgRunningSessionRepository::new(Arc::new(pool));

    let created = repo.create(new_run("runner-1", 1)).await.unwrap();

    let updated = repo
        .update(
            created.id,
            RunningSessionPatch {
                run_type: Some(RunType::Tempo),
                perceived_effort: Some(None),
                notes: Some(Some("negative split".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.run_type, RunType::Tempo);
    assert_eq!(updated.perceived_effort, None);
    assert_eq!(updated.notes.as_deref(), Some("negative split"));
    assert_eq!(updated.distance, Some(5.0));
    assert!(updated.updated_at >= created.updated_at);
}

#[sqlx::test]
async fn test_delete(pool: PgPool) {
    let repo = PgRunningSessionRepository::new(Arc::new(pool));

    let created = repo.create(new_run("runner-1", 1)).await.unwrap();

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.delete(created.id).await.unwrap());
    assert!(repo.find_by_id(created.id).await.unwrap().is_none());
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgRunningSessionRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
