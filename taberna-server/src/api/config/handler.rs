//! Site configuration API Handlers

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    ConfigEntry, ConfigListResponse, KEY_CONTACT_EMAIL, KEY_CONTACT_PHONE,
    KEY_RESERVATIONS_ACTIVE, MAX_MESSAGE_LENGTH, PublicConfig, PublicContact, PublicFeatures,
    PublicLimits, is_truthy,
};

use crate::api::json_body;
use crate::db::repository::app_config;
use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /api/v1/config
pub async fn public_config(State(state): State<AppState>) -> ServiceResult<Json<PublicConfig>> {
    let pool = state.pool();
    let reservations_enabled = app_config::get(pool, KEY_RESERVATIONS_ACTIVE)
        .await?
        .is_some_and(|v| is_truthy(&v));
    let phone = app_config::get(pool, KEY_CONTACT_PHONE).await?.unwrap_or_default();
    let email = app_config::get(pool, KEY_CONTACT_EMAIL).await?.unwrap_or_default();

    Ok(Json(PublicConfig {
        environment: state.environment.to_string(),
        features: PublicFeatures {
            reservations_enabled,
            menu_enabled: true,
            projects_contact_enabled: true,
        },
        limits: PublicLimits {
            max_message_length: MAX_MESSAGE_LENGTH,
        },
        contact: PublicContact { phone, email },
    }))
}

/// GET /admin/config
pub async fn list(State(state): State<AppState>) -> ServiceResult<Json<ConfigListResponse>> {
    let items = app_config::list(state.pool()).await?;
    Ok(Json(ConfigListResponse { items }))
}

/// GET /admin/config/{key}
pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServiceResult<Json<ConfigEntry>> {
    match app_config::get(state.pool(), &key).await? {
        Some(value) => Ok(Json(ConfigEntry { key, value })),
        None => Err(AppError::new(ErrorCode::ConfigKeyNotFound)
            .with_detail("key", key)
            .into()),
    }
}

/// PUT /admin/config/{key}
pub async fn upsert(
    State(state): State<AppState>,
    Path(key): Path<String>,
    payload: Result<Json<ConfigEntry>, JsonRejection>,
) -> ServiceResult<Json<ConfigEntry>> {
    let payload = json_body(payload)?;
    if payload.key != key {
        return Err(AppError::new(ErrorCode::ConfigKeyMismatch)
            .with_detail("path", key)
            .with_detail("body", payload.key)
            .into());
    }
    if key.trim().is_empty() {
        return Err(AppError::with_message(ErrorCode::RequiredField, "key is required").into());
    }

    let entry = app_config::upsert(state.pool(), &key, &payload.value, shared::util::now_millis())
        .await?;
    tracing::info!(key = %entry.key, "Config entry saved");
    Ok(Json(entry))
}
