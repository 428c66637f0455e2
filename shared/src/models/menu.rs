//! Menu Models
//!
//! Prices are stored as integer cents and exposed as euros.

use serde::{Deserialize, Serialize};

use crate::util::{FOOD_PREFIX, WINE_PREFIX, cents_to_eur, public_id};

/// Menu item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum MenuItemType {
    Food,
    Wine,
}

impl MenuItemType {
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Food => FOOD_PREFIX,
            Self::Wine => WINE_PREFIX,
        }
    }

    /// Resolve a public id (`food_3`, `wine_8`) into kind and row id
    pub fn parse_public_id(public: &str) -> Option<(Self, i64)> {
        [Self::Food, Self::Wine].into_iter().find_map(|kind| {
            crate::util::parse_public_id(kind.id_prefix(), public).map(|id| (kind, id))
        })
    }
}

/// Menu item entity (row in `menu_items`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub kind: MenuItemType,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price_cents: Option<i64>,
    pub region: Option<String>,
    pub glass_price_cents: Option<i64>,
    pub bottle_price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub updated_at: i64,
}

/// Public food entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItemView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<MenuItem> for FoodItemView {
    fn from(item: MenuItem) -> Self {
        Self {
            id: public_id(FOOD_PREFIX, item.id),
            name: item.name,
            description: item.description,
            category: item.category,
            price: cents_to_eur(item.price_cents),
            image_url: item.image_url,
            is_active: item.is_active,
        }
    }
}

/// Public wine entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineItemView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub glass_price: Option<f64>,
    pub bottle_price: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: bool,
}

impl From<MenuItem> for WineItemView {
    fn from(item: MenuItem) -> Self {
        Self {
            id: public_id(WINE_PREFIX, item.id),
            name: item.name,
            description: item.description,
            category: item.category,
            region: item.region,
            glass_price: cents_to_eur(item.glass_price_cents),
            bottle_price: cents_to_eur(item.bottle_price_cents),
            image_url: item.image_url,
            is_active: item.is_active,
        }
    }
}

/// `GET /api/v1/menu` response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub id: String,
    /// Newest `updated_at` across active items (millis), 0 when empty
    pub updated_at: i64,
    pub currency: String,
    pub food: Vec<FoodItemView>,
    pub wines: Vec<WineItemView>,
}

/// Create food payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

/// Create wine payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineCreate {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub region: Option<String>,
    pub glass_price: Option<f64>,
    pub bottle_price: Option<f64>,
    pub image_url: Option<String>,
}

/// Partial update for either kind. Fields that do not apply to the
/// item's kind are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub region: Option<String>,
    pub glass_price: Option<f64>,
    pub bottle_price: Option<f64>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Id returned after creating an item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreated {
    pub id: String,
}
