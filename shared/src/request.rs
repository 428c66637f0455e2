//! Request types for the shared crate

/// Limit/offset query parameters for admin listings
#[derive(Debug, Clone, serde::Deserialize)]
pub struct LimitOffsetQuery {
    /// Items to return (default: 100)
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Items to skip (default: 0)
    #[serde(default)]
    pub offset: i64,
}

/// Upper bound accepted for `limit`
pub const MAX_LIMIT: i64 = 500;

fn default_limit() -> i64 {
    100
}

impl Default for LimitOffsetQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl LimitOffsetQuery {
    /// Whether both values are inside the accepted bounds
    pub fn is_valid(&self) -> bool {
        (1..=MAX_LIMIT).contains(&self.limit) && self.offset >= 0
    }
}

/// Date range query (`from` / `to`, both inclusive, `YYYY-MM-DD`)
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct DateRangeQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}
