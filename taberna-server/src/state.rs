//! Application state

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::AdminCredentials;
use crate::booking::BookingCore;
use crate::config::Config;
use crate::db::repository::app_config;
use crate::db::{DbService, RepoResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DbService,
    /// Availability calculator and reservation lifecycle
    pub booking: BookingCore,
    /// Expected Basic credentials for `/admin`
    pub admin: Arc<AdminCredentials>,
    pub environment: Arc<str>,
    pub timezone: Arc<str>,
}

impl AppState {
    /// Open the configured database and wire the booking core
    pub async fn new(config: &Config) -> RepoResult<Self> {
        let db = DbService::new(&config.database_url).await?;
        Self::with_db(db, config).await
    }

    /// Build state over an already opened database (seeds config defaults)
    pub async fn with_db(db: DbService, config: &Config) -> RepoResult<Self> {
        app_config::seed_defaults(&db.pool, shared::util::now_millis()).await?;

        let booking = BookingCore::new(
            db.pool.clone(),
            config.slot_capacity,
            config.slot_interval_minutes,
        );

        Ok(Self {
            db,
            booking,
            admin: Arc::new(AdminCredentials::new(
                &config.admin_username,
                &config.admin_password,
            )),
            environment: config.environment.as_str().into(),
            timezone: config.timezone.as_str().into(),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }
}
