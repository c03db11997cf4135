//! User Account Repository
//!
//! Credentials only. Display data lives in `profile`.

use super::{RepoError, RepoResult};
use shared::util::{now_millis, snowflake_id};
use sqlx::{SqliteExecutor, SqlitePool};

/// Login account row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub hash_pass: String,
    pub is_active: bool,
    pub created_at: i64,
}

impl UserAccount {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

const USER_SELECT: &str = "SELECT id, email, hash_pass, is_active, created_at FROM user_account";

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<UserAccount>> {
    let user = sqlx::query_as::<_, UserAccount>(&format!("{USER_SELECT} WHERE email = ? LIMIT 1"))
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<UserAccount>> {
    let user = sqlx::query_as::<_, UserAccount>(&format!("{USER_SELECT} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Insert an account from an already hashed password
pub async fn create<'e>(
    executor: impl SqliteExecutor<'e>,
    email: &str,
    hash_pass: &str,
) -> RepoResult<UserAccount> {
    let user = UserAccount {
        id: snowflake_id(),
        email: email.trim().to_string(),
        hash_pass: hash_pass.to_string(),
        is_active: true,
        created_at: now_millis(),
    };
    sqlx::query(
        "INSERT INTO user_account (id, email, hash_pass, is_active, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.hash_pass)
    .bind(user.is_active)
    .bind(user.created_at)
    .execute(executor)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("Email {} already registered", user.email)),
        other => other,
    })?;
    Ok(user)
}

pub async fn update_password<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
    hash_pass: &str,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE user_account SET hash_pass = ? WHERE id = ?")
        .bind(hash_pass)
        .bind(id)
        .execute(executor)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[test]
    fn test_password_hash_roundtrip() {
        let hash = UserAccount::hash_password("s3cret-gas").unwrap();
        let user = UserAccount {
            id: 1,
            email: "a@b.c".into(),
            hash_pass: hash,
            is_active: true,
            created_at: 0,
        };
        assert!(user.verify_password("s3cret-gas").unwrap());
        assert!(!user.verify_password("wrong").unwrap());
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let db = DbService::open_in_memory().await.unwrap();
        let created = create(&db.pool, "Maria@NorteGas.com", "hash").await.unwrap();
        let found = find_by_email(&db.pool, "maria@nortegas.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = DbService::open_in_memory().await.unwrap();
        create(&db.pool, "maria@nortegas.com", "hash").await.unwrap();
        let err = create(&db.pool, "MARIA@nortegas.com", "hash2")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
