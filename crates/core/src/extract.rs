//! Pattern extraction over raw, undecoded payload strings
//!
//! Filtering and name resolution run over potentially unbounded history, so
//! they must not pay for a full JSON decode of every row. These extractors
//! pull a single string field out of the stored JSON text with a regular
//! expression. They only match string values written with the compact or
//! default separators (`"key":"v"` / `"key": "v"`), which is what the
//! recorder writes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Which field to pull out of a raw payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `"entity_id"`
    EntityId,
    /// `"domain"`
    Domain,
    /// `"friendly_name"`
    FriendlyName,
    /// `"icon"`
    Icon,
}

static ENTITY_ID_JSON_EXTRACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""entity_id": ?"([^"]+)""#).expect("valid entity_id pattern"));
static DOMAIN_JSON_EXTRACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""domain": ?"([^"]+)""#).expect("valid domain pattern"));
static FRIENDLY_NAME_JSON_EXTRACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""friendly_name": ?"([^"]+)""#).expect("valid friendly_name pattern")
});
static ICON_JSON_EXTRACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""icon": ?"([^"]+)""#).expect("valid icon pattern"));

impl Field {
    fn pattern(self) -> &'static Regex {
        match self {
            Field::EntityId => &ENTITY_ID_JSON_EXTRACT,
            Field::Domain => &DOMAIN_JSON_EXTRACT,
            Field::FriendlyName => &FRIENDLY_NAME_JSON_EXTRACT,
            Field::Icon => &ICON_JSON_EXTRACT,
        }
    }
}

/// Extract the first string value of `field` from a raw JSON payload.
///
/// Returns a slice into `raw`; nothing is unescaped.
pub fn extract(raw: &str, field: Field) -> Option<&str> {
    field
        .pattern()
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
