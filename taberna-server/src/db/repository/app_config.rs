//! App Config Repository (key/value)

use super::RepoResult;
use shared::models::ConfigEntry;
use sqlx::SqlitePool;

/// Insert the default entries that are not present yet
pub async fn seed_defaults(pool: &SqlitePool, now: i64) -> RepoResult<()> {
    for (key, value) in shared::models::DEFAULT_ENTRIES {
        sqlx::query("INSERT OR IGNORE INTO app_config (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(now)
            .execute(pool)
            .await?;
    }
    Ok(())
}

pub async fn list(pool: &SqlitePool) -> RepoResult<Vec<ConfigEntry>> {
    let rows = sqlx::query_as::<_, ConfigEntry>("SELECT key, value FROM app_config ORDER BY key")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get(pool: &SqlitePool, key: &str) -> RepoResult<Option<String>> {
    let value = sqlx::query_scalar::<_, String>("SELECT value FROM app_config WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(value)
}

pub async fn upsert(pool: &SqlitePool, key: &str, value: &str, now: i64) -> RepoResult<ConfigEntry> {
    let row = sqlx::query_as::<_, ConfigEntry>(
        "INSERT INTO app_config (key, value, updated_at) VALUES (?1, ?2, ?3) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at \
         RETURNING key, value",
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}
