/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Public id prefixes
pub const RESERVATION_PREFIX: &str = "resv";
pub const FOOD_PREFIX: &str = "food";
pub const WINE_PREFIX: &str = "wine";
pub const LEAD_PREFIX: &str = "lead";
pub const EVENT_PREFIX: &str = "evt";

/// Render a row id as its public form, e.g. `resv_12`.
pub fn public_id(prefix: &str, id: i64) -> String {
    format!("{prefix}_{id}")
}

/// Parse a public id back into the row id. Returns `None` for a foreign
/// prefix or a non-numeric suffix.
pub fn parse_public_id(prefix: &str, public: &str) -> Option<i64> {
    let rest = public.strip_prefix(prefix)?.strip_prefix('_')?;
    rest.parse().ok().filter(|id: &i64| *id > 0)
}

/// Cents to euros
pub fn cents_to_eur(value: Option<i64>) -> Option<f64> {
    value.map(|cents| cents as f64 / 100.0)
}

/// Euros to cents, rounded to the nearest cent
pub fn eur_to_cents(value: Option<f64>) -> Option<i64> {
    value.map(|eur| (eur * 100.0).round() as i64)
}
