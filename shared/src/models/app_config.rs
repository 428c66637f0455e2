//! App Config Models

use serde::{Deserialize, Serialize};

/// Toggles public reservation intake on the site
pub const KEY_RESERVATIONS_ACTIVE: &str = "reserva-activa";
pub const KEY_CONTACT_PHONE: &str = "telefono-contacto";
pub const KEY_CONTACT_EMAIL: &str = "mail-contacto";

/// Seeded at startup when absent
pub const DEFAULT_ENTRIES: [(&str, &str); 3] = [
    (KEY_RESERVATIONS_ACTIVE, "false"),
    (KEY_CONTACT_PHONE, ""),
    (KEY_CONTACT_EMAIL, "@"),
];

/// Key/value entry (row in `app_config`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// `GET /admin/config` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigListResponse {
    pub items: Vec<ConfigEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicFeatures {
    pub reservations_enabled: bool,
    pub menu_enabled: bool,
    pub projects_contact_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLimits {
    pub max_message_length: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicContact {
    pub phone: String,
    pub email: String,
}

/// `GET /api/v1/config` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicConfig {
    pub environment: String,
    pub features: PublicFeatures,
    pub limits: PublicLimits,
    pub contact: PublicContact,
}

/// Interpret a stored flag value
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on" | "si" | "sí"
    )
}
