//! Server configuration

use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (`sqlite:taberna.db`, `sqlite::memory:`)
    pub database_url: String,
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP Basic credentials for `/admin`
    pub admin_username: String,
    pub admin_password: String,
    /// Allowed CORS origins; empty disables the CORS layer
    pub cors_origins: Vec<String>,
    /// Seats per slot when no date override exists
    pub slot_capacity: NonZeroU32,
    /// Spacing of generated slots inside a service window
    pub slot_interval_minutes: u16,
    /// IANA zone reported alongside schedule and availability
    pub timezone: String,
    pub request_timeout: Duration,
    /// Daily-rolling log files go here when set
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup` (env var name -> value)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".into());

        let slot_capacity: u32 = parse_or(&lookup, "RESERVATION_SLOT_CAPACITY", 10)?;
        let slot_capacity = NonZeroU32::new(slot_capacity)
            .ok_or("RESERVATION_SLOT_CAPACITY must be at least 1")?;

        let slot_interval_minutes: u16 = parse_or(&lookup, "SLOT_INTERVAL_MINUTES", 30)?;
        if !(5..=240).contains(&slot_interval_minutes) {
            return Err(format!(
                "SLOT_INTERVAL_MINUTES must be between 5 and 240, got {slot_interval_minutes}"
            )
            .into());
        }

        let timeout_ms: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_MS", 30_000)?;

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| "sqlite:taberna.db".into()),
            http_port: parse_or(&lookup, "HTTP_PORT", 8080)?,
            admin_username: require_secret(&lookup, "ADMIN_USERNAME", &environment)?,
            admin_password: require_secret(&lookup, "ADMIN_PASSWORD", &environment)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            slot_capacity,
            slot_interval_minutes,
            timezone: lookup("TIMEZONE").unwrap_or_else(|| "Europe/Madrid".into()),
            request_timeout: Duration::from_millis(timeout_ms),
            log_dir: lookup("LOG_DIR").filter(|s| !s.is_empty()),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// Parse an optional variable, falling back to `default` when unset.
/// A set but unparsable value is an error.
fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> Result<T, BoxError> {
    match lookup(name).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} has an invalid value: {raw}").into()),
        None => Ok(default),
    }
}

/// Require a secret: must be set and non-empty outside development.
fn require_secret(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    environment: &str,
) -> Result<String, BoxError> {
    let val = match lookup(name) {
        Some(v) => v,
        None => {
            if environment != "development" {
                return Err(format!("{name} must be set in {environment} environment").into());
            }
            format!("dev-{name}-not-for-production")
        }
    };
    if val.is_empty() && environment != "development" {
        return Err(format!("{name} must not be empty in {environment} environment").into());
    }
    Ok(val)
}
