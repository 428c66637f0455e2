//! Reservation Repository

use super::RepoResult;
use shared::models::Reservation;
use sqlx::{SqliteConnection, SqlitePool};

const SELECT_RESERVATION: &str = "SELECT id, date, slot, party_size, customer_name, customer_phone, customer_email, notes, status, cancel_reason, created_at, updated_at FROM reservations";

/// Validated reservation ready to be written
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub date: String,
    pub slot: String,
    pub party_size: i64,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub notes: Option<String>,
}

/// Result of a capacity-guarded insert
#[derive(Debug)]
pub enum InsertOutcome {
    Created(Reservation),
    /// Nothing was written; `remaining` is the slot's free seats at the time
    Full { remaining: i64 },
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let row = sqlx::query_as::<_, Reservation>(&format!("{SELECT_RESERVATION} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All reservations of a date, ordered by slot then creation
pub async fn list_by_date(pool: &SqlitePool, date: &str) -> RepoResult<Vec<Reservation>> {
    let rows = sqlx::query_as::<_, Reservation>(&format!(
        "{SELECT_RESERVATION} WHERE date = ? ORDER BY slot, created_at, id"
    ))
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Sum of confirmed party sizes per slot for a date
pub async fn committed_by_slot(pool: &SqlitePool, date: &str) -> RepoResult<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT slot, COALESCE(SUM(party_size), 0) FROM reservations WHERE date = ? AND status = 'CONFIRMED' GROUP BY slot",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Insert a confirmed reservation only if the slot still has room.
///
/// Runs under `BEGIN IMMEDIATE`, so the capacity read and the write hold
/// the database write lock together. The slot capacity is the override for
/// `(date, slot)` when present, `default_capacity` otherwise. Dropping the
/// future before commit rolls the transaction back.
pub async fn insert_if_capacity(
    pool: &SqlitePool,
    new: &NewReservation,
    default_capacity: i64,
    now: i64,
) -> RepoResult<InsertOutcome> {
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;
    let outcome = conditional_insert(&mut tx, new, default_capacity, now).await?;
    tx.commit().await?;
    Ok(outcome)
}

async fn conditional_insert(
    conn: &mut SqliteConnection,
    new: &NewReservation,
    default_capacity: i64,
    now: i64,
) -> RepoResult<InsertOutcome> {
    let created = sqlx::query_as::<_, Reservation>(
        "INSERT INTO reservations (date, slot, party_size, customer_name, customer_phone, customer_email, notes, status, created_at, updated_at) \
         SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, 'CONFIRMED', ?8, ?8 \
         WHERE (SELECT COALESCE(SUM(party_size), 0) FROM reservations WHERE date = ?1 AND slot = ?2 AND status = 'CONFIRMED') + ?3 \
            <= COALESCE((SELECT capacity FROM slot_capacity WHERE date = ?1 AND slot = ?2), ?9) \
         RETURNING id, date, slot, party_size, customer_name, customer_phone, customer_email, notes, status, cancel_reason, created_at, updated_at",
    )
    .bind(&new.date)
    .bind(&new.slot)
    .bind(new.party_size)
    .bind(&new.customer_name)
    .bind(&new.customer_phone)
    .bind(&new.customer_email)
    .bind(&new.notes)
    .bind(now)
    .bind(default_capacity)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(reservation) = created {
        return Ok(InsertOutcome::Created(reservation));
    }

    let capacity: i64 = sqlx::query_scalar(
        "SELECT COALESCE((SELECT capacity FROM slot_capacity WHERE date = ?1 AND slot = ?2), ?3)",
    )
    .bind(&new.date)
    .bind(&new.slot)
    .bind(default_capacity)
    .fetch_one(&mut *conn)
    .await?;
    let committed = committed_in_slot(conn, &new.date, &new.slot).await?;

    Ok(InsertOutcome::Full {
        remaining: (capacity - committed).max(0),
    })
}

/// Confirmed seats of one slot, read on the caller's connection so it can
/// share a write transaction
pub async fn committed_in_slot(
    conn: &mut SqliteConnection,
    date: &str,
    slot: &str,
) -> RepoResult<i64> {
    let seats: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(party_size), 0) FROM reservations WHERE date = ? AND slot = ? AND status = 'CONFIRMED'",
    )
    .bind(date)
    .bind(slot)
    .fetch_one(&mut *conn)
    .await?;
    Ok(seats)
}

/// Transition a confirmed reservation to cancelled.
///
/// Returns `false` when no confirmed row with that id exists.
pub async fn cancel(
    pool: &SqlitePool,
    id: i64,
    reason: Option<&str>,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE reservations SET status = 'CANCELLED', cancel_reason = ?1, updated_at = ?2 WHERE id = ?3 AND status = 'CONFIRMED'",
    )
    .bind(reason)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
