//! Profile Repository

use super::{RepoError, RepoResult};
use shared::models::Profile;
use sqlx::{SqliteExecutor, SqlitePool};

const PROFILE_SELECT: &str = "SELECT user_id, nome, email, avatar, cargo FROM profile";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Profile>> {
    let profiles = sqlx::query_as::<_, Profile>(&format!("{PROFILE_SELECT} ORDER BY nome"))
        .fetch_all(pool)
        .await?;
    Ok(profiles)
}

pub async fn find_by_user_id(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(&format!("{PROFILE_SELECT} WHERE user_id = ?"))
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

pub async fn insert<'e>(executor: impl SqliteExecutor<'e>, profile: &Profile) -> RepoResult<()> {
    sqlx::query("INSERT INTO profile (user_id, nome, email, avatar, cargo) VALUES (?, ?, ?, ?, ?)")
        .bind(profile.user_id)
        .bind(&profile.nome)
        .bind(&profile.email)
        .bind(&profile.avatar)
        .bind(&profile.cargo)
        .execute(executor)
        .await?;
    Ok(())
}

/// Load the profile, creating the default one on first access
pub async fn get_or_create_default(
    pool: &SqlitePool,
    user_id: i64,
    email: &str,
) -> RepoResult<Profile> {
    if let Some(profile) = find_by_user_id(pool, user_id).await? {
        return Ok(profile);
    }
    let profile = Profile::default_for(user_id, email);
    match insert(pool, &profile).await {
        Ok(()) => {
            tracing::info!(user_id, "Default profile created");
            Ok(profile)
        }
        // Concurrent first login already created it
        Err(RepoError::Duplicate(_)) => find_by_user_id(pool, user_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Profile {user_id} not found"))),
        Err(e) => Err(e),
    }
}

pub async fn update_cargo(pool: &SqlitePool, user_id: i64, cargo: &str) -> RepoResult<Profile> {
    let rows = sqlx::query("UPDATE profile SET cargo = ? WHERE user_id = ?")
        .bind(cargo)
        .bind(user_id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Profile {user_id} not found")));
    }
    find_by_user_id(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Profile {user_id} not found")))
}
