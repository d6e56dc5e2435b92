use chrono::{DateTime, Utc};
use fitness_tracker::domain::repositories::TokenRepository;
use fitness_tracker::error::AppError;
use fitness_tracker::infrastructure::persistence::PgTokenRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_token(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let result = repo.create_token("test-token", "runner-1", "hash123").await;

    assert!(result.is_ok());
    let token = result.unwrap();
    assert_eq!(token.name, "test-token");
    assert_eq!(token.user_uid, "runner-1");
    assert_eq!(token.token_hash, "hash123");
    assert!(token.revoked_at.is_none());
}

#[sqlx::test]
async fn test_create_token_duplicate_name(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("phone", "runner-1", "hash-a").await.unwrap();
    let result = repo.create_token("phone", "runner-2", "hash-b").await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));
}

#[sqlx::test]
async fn test_find_owner_valid(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("valid-token", "runner-1", "validhash")
        .await
        .unwrap();

    let owner = repo.find_owner("validhash").await.unwrap();

    assert_eq!(owner.as_deref(), Some("runner-1"));
}

#[sqlx::test]
async fn test_find_owner_unknown(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let owner = repo.find_owner("nonexistent").await.unwrap();

    assert!(owner.is_none());
}

#[sqlx::test]
async fn test_find_owner_revoked(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("revoked-token", "runner-1", "revokedhash")
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    let owner = repo.find_owner("revokedhash").await.unwrap();

    assert!(owner.is_none());
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool.clone()));

    let token = repo
        .create_token("update-token", "runner-1", "updatehash")
        .await
        .unwrap();

    let result = repo.update_last_used("updatehash").await;
    assert!(result.is_ok());

    let last_used: Option<DateTime<Utc>> =
        sqlx::query_scalar("SELECT last_used_at FROM api_tokens WHERE id = $1")
            .bind(token.id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(last_used.is_some());
}

#[sqlx::test]
async fn test_list_and_find(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let created = repo.create_token("token1", "runner-1", "hash1").await.unwrap();
    repo.create_token("token2", "runner-2", "hash2").await.unwrap();

    let tokens = repo.list_tokens().await.unwrap();
    assert_eq!(tokens.len(), 2);

    let by_id = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(by_id.unwrap().name, "token1");

    let by_name = repo.find_by_name("token2").await.unwrap();
    assert_eq!(by_name.unwrap().user_uid, "runner-2");

    assert!(repo.find_by_name("missing").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_revoke_already_revoked(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("double-revoke", "runner-1", "doublehash")
        .await
        .unwrap();

    repo.revoke_token(token.id).await.unwrap();
    let result = repo.revoke_token(token.id).await;

    assert!(result.is_ok());
}
