use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::HotelRecord;

/// Body of `POST /predict-flight`. Categorical fields may be absent;
/// numeric fields accept numbers or numeric strings and are checked by the
/// encoder.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FlightQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub agency: Option<String>,
    #[serde(rename = "flightType")]
    pub flight_type: Option<String>,
    pub distance: Option<Value>,
    pub day: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
}

/// Body of `POST /recommend-hotels`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HotelQuery {
    pub place: Option<String>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommended_hotels: Vec<HotelRecord>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub features: usize,
    pub hotels: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}
