//! Password Reset Token Repository

use super::RepoResult;
use shared::util::now_millis;
use sqlx::{SqliteExecutor, SqlitePool};

pub async fn insert(
    pool: &SqlitePool,
    token: &str,
    user_id: i64,
    expires_at: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO password_reset (token, user_id, expires_at, used, created_at) VALUES (?, ?, ?, 0, ?)",
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .bind(now_millis())
    .execute(pool)
    .await?;
    Ok(())
}

/// Atomically claim an unused, unexpired token. Returns the owning user id.
pub async fn consume<'e>(
    executor: impl SqliteExecutor<'e>,
    token: &str,
    now: i64,
) -> RepoResult<Option<i64>> {
    let user_id: Option<i64> = sqlx::query_scalar(
        "UPDATE password_reset SET used = 1 WHERE token = ? AND used = 0 AND expires_at > ? RETURNING user_id",
    )
    .bind(token)
    .bind(now)
    .fetch_optional(executor)
    .await?;
    Ok(user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::user;

    #[tokio::test]
    async fn test_token_is_single_use() {
        let db = DbService::open_in_memory().await.unwrap();
        let account = user::create(&db.pool, "a@nortegas.com", "hash").await.unwrap();
        insert(&db.pool, "tok-1", account.id, 10_000).await.unwrap();

        assert_eq!(consume(&db.pool, "tok-1", 5_000).await.unwrap(), Some(account.id));
        assert_eq!(consume(&db.pool, "tok-1", 5_000).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let db = DbService::open_in_memory().await.unwrap();
        let account = user::create(&db.pool, "a@nortegas.com", "hash").await.unwrap();
        insert(&db.pool, "tok-2", account.id, 10_000).await.unwrap();

        assert_eq!(consume(&db.pool, "tok-2", 10_001).await.unwrap(), None);
        assert_eq!(consume(&db.pool, "unknown", 0).await.unwrap(), None);
    }
}
