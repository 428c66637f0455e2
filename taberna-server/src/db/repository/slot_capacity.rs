//! Slot Capacity Override Repository

use super::{RepoResult, reservation};
use shared::models::CapacityOverride;
use sqlx::SqlitePool;

pub async fn list_for_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<CapacityOverride>> {
    let rows = sqlx::query_as::<_, CapacityOverride>(
        "SELECT date, slot, capacity, updated_at FROM slot_capacity WHERE date = ? ORDER BY slot",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Outcome of an override change that must keep the slot's confirmed
/// seats within its capacity
#[derive(Debug)]
pub enum CapacityWrite<T> {
    Applied(T),
    /// Nothing was written; `committed` seats are already confirmed
    BelowCommitted { committed: i64 },
}

/// Set the override for `(date, slot)` unless it would drop below the
/// seats already confirmed there
pub async fn upsert(
    pool: &SqlitePool,
    date: &str,
    slot: &str,
    capacity: i64,
    now: i64,
) -> RepoResult<CapacityWrite<CapacityOverride>> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let committed = reservation::committed_in_slot(&mut tx, date, slot).await?;
    if capacity < committed {
        tx.rollback().await?;
        return Ok(CapacityWrite::BelowCommitted { committed });
    }

    let row = sqlx::query_as::<_, CapacityOverride>(
        "INSERT INTO slot_capacity (date, slot, capacity, updated_at) VALUES (?1, ?2, ?3, ?4) \
         ON CONFLICT(date, slot) DO UPDATE SET capacity = excluded.capacity, updated_at = excluded.updated_at \
         RETURNING date, slot, capacity, updated_at",
    )
    .bind(date)
    .bind(slot)
    .bind(capacity)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(CapacityWrite::Applied(row))
}

/// Remove the override so the slot falls back to `default_capacity`.
///
/// `Applied(false)` when there was no override.
pub async fn delete(
    pool: &SqlitePool,
    date: &str,
    slot: &str,
    default_capacity: i64,
) -> RepoResult<CapacityWrite<bool>> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let exists: Option<i64> =
        sqlx::query_scalar("SELECT capacity FROM slot_capacity WHERE date = ? AND slot = ?")
            .bind(date)
            .bind(slot)
            .fetch_optional(&mut *tx)
            .await?;
    if exists.is_none() {
        tx.rollback().await?;
        return Ok(CapacityWrite::Applied(false));
    }

    let committed = reservation::committed_in_slot(&mut tx, date, slot).await?;
    if default_capacity < committed {
        tx.rollback().await?;
        return Ok(CapacityWrite::BelowCommitted { committed });
    }

    sqlx::query("DELETE FROM slot_capacity WHERE date = ? AND slot = ?")
        .bind(date)
        .bind(slot)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(CapacityWrite::Applied(true))
}
