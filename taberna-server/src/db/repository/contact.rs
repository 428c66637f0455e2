//! Project Contact Repository

use super::RepoResult;
use shared::models::{ProjectContact, ProjectContactStats};
use sqlx::SqlitePool;

/// Validated submission
#[derive(Debug, Clone)]
pub struct NewProjectContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub consent: bool,
    pub source: Option<String>,
}

pub async fn insert(pool: &SqlitePool, contact: &NewProjectContact, now: i64) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO project_contacts (name, email, phone, company, subject, message, consent, source, is_read, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9) RETURNING id",
    )
    .bind(&contact.name)
    .bind(&contact.email)
    .bind(&contact.phone)
    .bind(&contact.company)
    .bind(&contact.subject)
    .bind(&contact.message)
    .bind(contact.consent)
    .bind(&contact.source)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Newest first
pub async fn list(pool: &SqlitePool, limit: i64, offset: i64) -> RepoResult<Vec<ProjectContact>> {
    let rows = sqlx::query_as::<_, ProjectContact>(
        "SELECT id, name, email, phone, company, subject, message, consent, source, is_read, read_at, created_at \
         FROM project_contacts ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn stats(pool: &SqlitePool) -> RepoResult<ProjectContactStats> {
    let (total, unread): (i64, i64) = sqlx::query_as(
        "SELECT COUNT(*), COALESCE(SUM(CASE WHEN is_read = 0 THEN 1 ELSE 0 END), 0) FROM project_contacts",
    )
    .fetch_one(pool)
    .await?;
    Ok(ProjectContactStats { total, unread })
}

/// Mark as read, keeping the first `read_at`. Returns `false` for an unknown id.
pub async fn mark_read(pool: &SqlitePool, id: i64, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE project_contacts SET is_read = 1, read_at = COALESCE(read_at, ?1) WHERE id = ?2",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
