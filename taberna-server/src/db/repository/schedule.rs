//! Schedule Repository (days + service windows)

use super::{RepoError, RepoResult};
use shared::models::{ScheduleDay, ServiceWindow};
use sqlx::SqlitePool;

pub async fn find_day(pool: &SqlitePool, date: &str) -> RepoResult<Option<ScheduleDay>> {
    let row = sqlx::query_as::<_, ScheduleDay>(
        "SELECT id, date, open, note FROM schedule_days WHERE date = ?",
    )
    .bind(date)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Days in `[from, to]` (both optional, inclusive), ordered by date
pub async fn list_days(
    pool: &SqlitePool,
    from: Option<&str>,
    to: Option<&str>,
) -> RepoResult<Vec<ScheduleDay>> {
    let rows = sqlx::query_as::<_, ScheduleDay>(
        "SELECT id, date, open, note FROM schedule_days WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2) ORDER BY date",
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn upsert_day(
    pool: &SqlitePool,
    date: &str,
    open: bool,
    note: Option<&str>,
) -> RepoResult<ScheduleDay> {
    let row = sqlx::query_as::<_, ScheduleDay>(
        "INSERT INTO schedule_days (date, open, note) VALUES (?1, ?2, ?3) \
         ON CONFLICT(date) DO UPDATE SET open = excluded.open, note = excluded.note \
         RETURNING id, date, open, note",
    )
    .bind(date)
    .bind(open)
    .bind(note)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Existing day for `date`, or a new open day without a note
pub async fn ensure_day(pool: &SqlitePool, date: &str) -> RepoResult<ScheduleDay> {
    sqlx::query("INSERT INTO schedule_days (date, open) VALUES (?, 1) ON CONFLICT(date) DO NOTHING")
        .bind(date)
        .execute(pool)
        .await?;
    find_day(pool, date)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("schedule day {date}")))
}

pub async fn windows_for_day(pool: &SqlitePool, day_id: i64) -> RepoResult<Vec<ServiceWindow>> {
    let rows = sqlx::query_as::<_, ServiceWindow>(
        "SELECT id, day_id, start_time, end_time FROM service_windows WHERE day_id = ? ORDER BY start_time, end_time",
    )
    .bind(day_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Windows of every day in `[from, to]`, ordered by day then start
pub async fn windows_in_range(
    pool: &SqlitePool,
    from: Option<&str>,
    to: Option<&str>,
) -> RepoResult<Vec<ServiceWindow>> {
    let rows = sqlx::query_as::<_, ServiceWindow>(
        "SELECT w.id, w.day_id, w.start_time, w.end_time FROM service_windows w \
         JOIN schedule_days d ON d.id = w.day_id \
         WHERE (?1 IS NULL OR d.date >= ?1) AND (?2 IS NULL OR d.date <= ?2) \
         ORDER BY d.date, w.start_time, w.end_time",
    )
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Add a window to a day. Fails with `Duplicate` for an
/// identical window.
pub async fn add_window(
    pool: &SqlitePool,
    day_id: i64,
    start: &str,
    end: &str,
) -> RepoResult<ServiceWindow> {
    let row = sqlx::query_as::<_, ServiceWindow>(
        "INSERT INTO service_windows (day_id, start_time, end_time) VALUES (?1, ?2, ?3) \
         RETURNING id, day_id, start_time, end_time",
    )
    .bind(day_id)
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate(format!("window {start}-{end}")),
        other => other,
    })?;
    Ok(row)
}

pub async fn delete_window(
    pool: &SqlitePool,
    day_id: i64,
    start: &str,
    end: &str,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM service_windows WHERE day_id = ?1 AND start_time = ?2 AND end_time = ?3",
    )
    .bind(day_id)
    .bind(start)
    .bind(end)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    #[tokio::test]
    async fn test_upsert_day_replaces_flags() {
        let pool = test_support::pool().await;

        let day = upsert_day(&pool, "2026-05-01", true, None).await.unwrap();
        let again = upsert_day(&pool, "2026-05-01", false, Some("holiday")).await.unwrap();

        assert_eq!(day.id, again.id);
        assert!(!again.open);
        assert_eq!(again.note.as_deref(), Some("holiday"));
    }

    #[tokio::test]
    async fn test_ensure_day_keeps_existing_flags() {
        let pool = test_support::pool().await;

        let created = ensure_day(&pool, "2026-05-04").await.unwrap();
        assert!(created.open);
        assert_eq!(created.note, None);

        upsert_day(&pool, "2026-05-04", false, Some("inventario")).await.unwrap();
        let existing = ensure_day(&pool, "2026-05-04").await.unwrap();
        assert_eq!(existing.id, created.id);
        assert!(!existing.open);
        assert_eq!(existing.note.as_deref(), Some("inventario"));
    }

    #[tokio::test]
    async fn test_duplicate_window_rejected() {
        let pool = test_support::pool().await;
        let day = upsert_day(&pool, "2026-05-01", true, None).await.unwrap();

        add_window(&pool, day.id, "13:00", "16:00").await.unwrap();
        let err = add_window(&pool, day.id, "13:00", "16:00").await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));

        assert!(delete_window(&pool, day.id, "13:00", "16:00").await.unwrap());
        assert!(!delete_window(&pool, day.id, "13:00", "16:00").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_days_range() {
        let pool = test_support::pool().await;
        for date in ["2026-05-01", "2026-05-02", "2026-05-03"] {
            let day = upsert_day(&pool, date, true, None).await.unwrap();
            add_window(&pool, day.id, "20:00", "23:00").await.unwrap();
        }

        let days = list_days(&pool, Some("2026-05-02"), None).await.unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2026-05-02");

        let windows = windows_in_range(&pool, None, Some("2026-05-01")).await.unwrap();
        assert_eq!(windows.len(), 1);
    }
}
