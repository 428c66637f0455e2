//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    FoodCreate, FoodItemView, MenuItemCreated, MenuItemType, MenuItemUpdate, MenuResponse,
    WineCreate, WineItemView,
};
use shared::util::{eur_to_cents, public_id};

use crate::api::{json_body, non_blank};
use crate::db::repository::menu::{self, MenuItemPatch, MenuItemRow};
use crate::error::ServiceResult;
use crate::state::AppState;

const MENU_ID: &str = "menu_current";
const CURRENCY: &str = "EUR";

/// Euros to cents; negative or non-finite prices are rejected
fn price_cents(field: &str, value: Option<f64>) -> Result<Option<i64>, AppError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::with_message(
            ErrorCode::MenuItemInvalidPrice,
            format!("{field} must be a non-negative amount"),
        )
        .with_detail("field", field)),
        other => Ok(eur_to_cents(other)),
    }
}

fn required_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "name is required")
            .with_detail("field", "name"));
    }
    Ok(name.to_string())
}

/// GET /api/v1/menu
pub async fn get_menu(State(state): State<AppState>) -> ServiceResult<Json<MenuResponse>> {
    let food = menu::list(state.pool(), MenuItemType::Food, true).await?;
    let wines = menu::list(state.pool(), MenuItemType::Wine, true).await?;
    let updated_at = menu::last_updated(state.pool()).await?;

    Ok(Json(MenuResponse {
        id: MENU_ID.to_string(),
        updated_at,
        currency: CURRENCY.to_string(),
        food: food.into_iter().map(Into::into).collect(),
        wines: wines.into_iter().map(Into::into).collect(),
    }))
}

/// GET /api/v1/menu/food
pub async fn list_food(State(state): State<AppState>) -> ServiceResult<Json<Vec<FoodItemView>>> {
    let items = menu::list(state.pool(), MenuItemType::Food, true).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/menu/wines
pub async fn list_wines(State(state): State<AppState>) -> ServiceResult<Json<Vec<WineItemView>>> {
    let items = menu::list(state.pool(), MenuItemType::Wine, true).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// POST /admin/menu/food
pub async fn create_food(
    State(state): State<AppState>,
    payload: Result<Json<FoodCreate>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<MenuItemCreated>)> {
    let payload = json_body(payload)?;
    let row = MenuItemRow {
        name: required_name(&payload.name)?,
        description: non_blank(payload.description),
        category: non_blank(payload.category),
        price_cents: price_cents("price", payload.price)?,
        image_url: non_blank(payload.image_url),
        ..Default::default()
    };

    let item = menu::create(state.pool(), MenuItemType::Food, &row, shared::util::now_millis()).await?;
    tracing::info!(id = item.id, name = %item.name, "Food item created");

    Ok((
        StatusCode::CREATED,
        Json(MenuItemCreated {
            id: public_id(MenuItemType::Food.id_prefix(), item.id),
        }),
    ))
}

/// POST /admin/menu/wines
pub async fn create_wine(
    State(state): State<AppState>,
    payload: Result<Json<WineCreate>, JsonRejection>,
) -> ServiceResult<(StatusCode, Json<MenuItemCreated>)> {
    let payload = json_body(payload)?;
    let row = MenuItemRow {
        name: required_name(&payload.name)?,
        description: non_blank(payload.description),
        category: non_blank(payload.category),
        region: non_blank(payload.region),
        glass_price_cents: price_cents("glassPrice", payload.glass_price)?,
        bottle_price_cents: price_cents("bottlePrice", payload.bottle_price)?,
        image_url: non_blank(payload.image_url),
        ..Default::default()
    };

    let item = menu::create(state.pool(), MenuItemType::Wine, &row, shared::util::now_millis()).await?;
    tracing::info!(id = item.id, name = %item.name, "Wine item created");

    Ok((
        StatusCode::CREATED,
        Json(MenuItemCreated {
            id: public_id(MenuItemType::Wine.id_prefix(), item.id),
        }),
    ))
}

fn parse_item_id(id: &str) -> Result<(MenuItemType, i64), AppError> {
    MenuItemType::parse_public_id(id)
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id))
}

/// PATCH /admin/menu/{id}
///
/// Returns the updated item in its public shape (food or wine).
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<MenuItemUpdate>, JsonRejection>,
) -> ServiceResult<Json<serde_json::Value>> {
    let (kind, row_id) = parse_item_id(&id)?;
    let payload = json_body(payload)?;

    let name = match payload.name {
        Some(name) => Some(required_name(&name)?),
        None => None,
    };
    let mut patch = MenuItemPatch {
        name,
        description: payload.description,
        category: payload.category,
        image_url: payload.image_url,
        is_active: payload.is_active,
        ..Default::default()
    };
    match kind {
        MenuItemType::Food => {
            patch.price_cents = price_cents("price", payload.price)?;
        }
        MenuItemType::Wine => {
            patch.region = payload.region;
            patch.glass_price_cents = price_cents("glassPrice", payload.glass_price)?;
            patch.bottle_price_cents = price_cents("bottlePrice", payload.bottle_price)?;
        }
    }

    let item = menu::update(state.pool(), kind, row_id, &patch, shared::util::now_millis())
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id.clone()))?;

    let body = match kind {
        MenuItemType::Food => serde_json::to_value(FoodItemView::from(item)),
        MenuItemType::Wine => serde_json::to_value(WineItemView::from(item)),
    }
    .map_err(|e| AppError::internal(format!("serialize menu item: {e}")))?;

    Ok(Json(body))
}

/// DELETE /admin/menu/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    let (kind, row_id) = parse_item_id(&id)?;
    if !menu::delete(state.pool(), kind, row_id).await? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound)
            .with_detail("id", id)
            .into());
    }
    tracing::info!(id = %id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
