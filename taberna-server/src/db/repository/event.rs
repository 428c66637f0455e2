//! Event Repository

use super::RepoResult;
use shared::models::Event;
use sqlx::SqlitePool;

const EVENT_COLUMNS: &str = "id, title, date_start, date_end, timezone, description, category, image_url, location_name, is_published, created_at, updated_at";

/// Validated event ready to be written (instants in UTC millis)
#[derive(Debug, Clone, Default)]
pub struct EventRow {
    pub title: String,
    pub date_start: i64,
    pub date_end: Option<i64>,
    pub timezone: String,
    pub description: String,
    pub category: String,
    pub image_url: String,
    pub location_name: Option<String>,
    pub is_published: bool,
}

/// Listing filter; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub published: Option<bool>,
    pub category: Option<String>,
    /// Inclusive lower bound on `date_start`
    pub starts_from: Option<i64>,
    /// Exclusive upper bound on `date_start`
    pub starts_before: Option<i64>,
    pub newest_first: bool,
}

pub async fn list(
    pool: &SqlitePool,
    filter: &EventFilter,
    limit: i64,
    offset: i64,
) -> RepoResult<Vec<Event>> {
    let order = if filter.newest_first { "DESC" } else { "ASC" };
    let rows = sqlx::query_as::<_, Event>(&format!(
        "SELECT {EVENT_COLUMNS} FROM events \
         WHERE (?1 IS NULL OR is_published = ?1) \
           AND (?2 IS NULL OR category = ?2) \
           AND (?3 IS NULL OR date_start >= ?3) \
           AND (?4 IS NULL OR date_start < ?4) \
         ORDER BY date_start {order}, id {order} LIMIT ?5 OFFSET ?6"
    ))
    .bind(filter.published)
    .bind(&filter.category)
    .bind(filter.starts_from)
    .bind(filter.starts_before)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find(pool: &SqlitePool, id: i64) -> RepoResult<Option<Event>> {
    let row = sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, event: &EventRow, now: i64) -> RepoResult<Event> {
    let row = sqlx::query_as::<_, Event>(&format!(
        "INSERT INTO events (title, date_start, date_end, timezone, description, category, image_url, location_name, is_published, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10) \
         RETURNING {EVENT_COLUMNS}"
    ))
    .bind(&event.title)
    .bind(event.date_start)
    .bind(event.date_end)
    .bind(&event.timezone)
    .bind(&event.description)
    .bind(&event.category)
    .bind(&event.image_url)
    .bind(&event.location_name)
    .bind(event.is_published)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Overwrite every editable field; `None` when the event does not exist
pub async fn replace(
    pool: &SqlitePool,
    id: i64,
    event: &EventRow,
    now: i64,
) -> RepoResult<Option<Event>> {
    let row = sqlx::query_as::<_, Event>(&format!(
        "UPDATE events SET title = ?1, date_start = ?2, date_end = ?3, timezone = ?4, description = ?5, \
           category = ?6, image_url = ?7, location_name = ?8, is_published = ?9, updated_at = ?10 \
         WHERE id = ?11 \
         RETURNING {EVENT_COLUMNS}"
    ))
    .bind(&event.title)
    .bind(event.date_start)
    .bind(event.date_end)
    .bind(&event.timezone)
    .bind(&event.description)
    .bind(&event.category)
    .bind(&event.image_url)
    .bind(&event.location_name)
    .bind(event.is_published)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Set the publication flag; `None` when the event does not exist
pub async fn set_published(
    pool: &SqlitePool,
    id: i64,
    published: bool,
    now: i64,
) -> RepoResult<Option<Event>> {
    let row = sqlx::query_as::<_, Event>(&format!(
        "UPDATE events SET is_published = ?1, updated_at = ?2 WHERE id = ?3 RETURNING {EVENT_COLUMNS}"
    ))
    .bind(published)
    .bind(now)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support;

    const DAY: i64 = 86_400_000;

    fn event(title: &str, date_start: i64, is_published: bool) -> EventRow {
        EventRow {
            title: title.into(),
            date_start,
            timezone: "Europe/Madrid".into(),
            description: "Concierto".into(),
            category: "musica".into(),
            image_url: "https://taberna.es/e.jpg".into(),
            is_published,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_filters_and_orders() {
        let pool = test_support::pool().await;
        create(&pool, &event("b", 2 * DAY, true), 1).await.unwrap();
        create(&pool, &event("a", DAY, true), 1).await.unwrap();
        create(&pool, &event("draft", 3 * DAY, false), 1).await.unwrap();
        let mut cata = event("cata", 4 * DAY, true);
        cata.category = "cata".into();
        create(&pool, &cata, 1).await.unwrap();

        let published = EventFilter {
            published: Some(true),
            ..Default::default()
        };
        let titles = |rows: Vec<Event>| rows.into_iter().map(|e| e.title).collect::<Vec<_>>();

        let rows = list(&pool, &published, 10, 0).await.unwrap();
        assert_eq!(titles(rows), ["a", "b", "cata"]);

        let window = EventFilter {
            starts_from: Some(2 * DAY),
            starts_before: Some(4 * DAY),
            ..Default::default()
        };
        assert_eq!(titles(list(&pool, &window, 10, 0).await.unwrap()), ["b", "draft"]);

        let by_category = EventFilter {
            category: Some("cata".into()),
            newest_first: true,
            ..Default::default()
        };
        assert_eq!(titles(list(&pool, &by_category, 10, 0).await.unwrap()), ["cata"]);

        let newest = EventFilter {
            newest_first: true,
            ..Default::default()
        };
        assert_eq!(titles(list(&pool, &newest, 2, 1).await.unwrap()), ["draft", "b"]);
    }

    #[tokio::test]
    async fn test_replace_and_publish() {
        let pool = test_support::pool().await;
        let created = create(&pool, &event("Jazz", DAY, false), 1).await.unwrap();
        assert_eq!(created.created_at, 1);

        let mut changed = event("Jazz en la terraza", DAY, false);
        changed.date_end = Some(DAY + 3_600_000);
        let replaced = replace(&pool, created.id, &changed, 5).await.unwrap().unwrap();
        assert_eq!(replaced.title, "Jazz en la terraza");
        assert_eq!(replaced.date_end, Some(DAY + 3_600_000));
        assert_eq!(replaced.created_at, 1);
        assert_eq!(replaced.updated_at, 5);

        let published = set_published(&pool, created.id, true, 6).await.unwrap().unwrap();
        assert!(published.is_published);
        assert!(find(&pool, created.id).await.unwrap().unwrap().is_published);
    }

    #[tokio::test]
    async fn test_missing_event() {
        let pool = test_support::pool().await;
        assert!(find(&pool, 1).await.unwrap().is_none());
        assert!(replace(&pool, 1, &event("x", DAY, true), 1).await.unwrap().is_none());
        assert!(set_published(&pool, 1, true, 1).await.unwrap().is_none());
        assert!(!delete(&pool, 1).await.unwrap());
    }
}
