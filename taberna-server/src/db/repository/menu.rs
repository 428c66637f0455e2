//! Menu Item Repository

use super::RepoResult;
use shared::models::{MenuItem, MenuItemType};
use sqlx::SqlitePool;

const SELECT_ITEM: &str = "SELECT id, kind, name, description, category, price_cents, region, glass_price_cents, bottle_price_cents, image_url, is_active, updated_at FROM menu_items";

/// Insert payload with prices already converted to cents
#[derive(Debug, Clone, Default)]
pub struct MenuItemRow {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub region: Option<String>,
    pub glass_price_cents: Option<i64>,
    pub bottle_price_cents: Option<i64>,
    pub image_url: Option<String>,
}

/// Partial update, `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub region: Option<String>,
    pub glass_price_cents: Option<i64>,
    pub bottle_price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

pub async fn list(
    pool: &SqlitePool,
    kind: MenuItemType,
    active_only: bool,
) -> RepoResult<Vec<MenuItem>> {
    let rows = sqlx::query_as::<_, MenuItem>(&format!(
        "{SELECT_ITEM} WHERE kind = ?1 AND (?2 = 0 OR is_active = 1) ORDER BY category, name, id"
    ))
    .bind(kind)
    .bind(active_only)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find(pool: &SqlitePool, kind: MenuItemType, id: i64) -> RepoResult<Option<MenuItem>> {
    let row = sqlx::query_as::<_, MenuItem>(&format!("{SELECT_ITEM} WHERE id = ? AND kind = ?"))
        .bind(id)
        .bind(kind)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(
    pool: &SqlitePool,
    kind: MenuItemType,
    item: &MenuItemRow,
    now: i64,
) -> RepoResult<MenuItem> {
    let row = sqlx::query_as::<_, MenuItem>(
        "INSERT INTO menu_items (kind, name, description, category, price_cents, region, glass_price_cents, bottle_price_cents, image_url, is_active, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 1, ?10) \
         RETURNING id, kind, name, description, category, price_cents, region, glass_price_cents, bottle_price_cents, image_url, is_active, updated_at",
    )
    .bind(kind)
    .bind(&item.name)
    .bind(&item.description)
    .bind(&item.category)
    .bind(item.price_cents)
    .bind(&item.region)
    .bind(item.glass_price_cents)
    .bind(item.bottle_price_cents)
    .bind(&item.image_url)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Apply a partial update; `None` when the item does not exist
pub async fn update(
    pool: &SqlitePool,
    kind: MenuItemType,
    id: i64,
    patch: &MenuItemPatch,
    now: i64,
) -> RepoResult<Option<MenuItem>> {
    let row = sqlx::query_as::<_, MenuItem>(
        "UPDATE menu_items SET \
           name = COALESCE(?1, name), \
           description = COALESCE(?2, description), \
           category = COALESCE(?3, category), \
           price_cents = COALESCE(?4, price_cents), \
           region = COALESCE(?5, region), \
           glass_price_cents = COALESCE(?6, glass_price_cents), \
           bottle_price_cents = COALESCE(?7, bottle_price_cents), \
           image_url = COALESCE(?8, image_url), \
           is_active = COALESCE(?9, is_active), \
           updated_at = ?10 \
         WHERE id = ?11 AND kind = ?12 \
         RETURNING id, kind, name, description, category, price_cents, region, glass_price_cents, bottle_price_cents, image_url, is_active, updated_at",
    )
    .bind(&patch.name)
    .bind(&patch.description)
    .bind(&patch.category)
    .bind(patch.price_cents)
    .bind(&patch.region)
    .bind(patch.glass_price_cents)
    .bind(patch.bottle_price_cents)
    .bind(&patch.image_url)
    .bind(patch.is_active)
    .bind(now)
    .bind(id)
    .bind(kind)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn delete(pool: &SqlitePool, kind: MenuItemType, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_items WHERE id = ? AND kind = ?")
        .bind(id)
        .bind(kind)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Newest `updated_at` among active items, 0 for an empty menu
pub async fn last_updated(pool: &SqlitePool) -> RepoResult<i64> {
    let ts: i64 =
        sqlx::query_scalar("SELECT COALESCE(MAX(updated_at), 0) FROM menu_items WHERE is_active = 1")
            .fetch_one(pool)
            .await?;
    Ok(ts)
}
