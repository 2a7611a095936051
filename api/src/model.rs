use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// One row of the hotel dataset. Columns beyond the ones the recommender
/// filters on are kept as-is so responses echo the full row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub place: String,
    pub price_per_night: f64,
    pub rating: f64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}
