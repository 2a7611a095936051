//! Turns a flight query into the dense feature vector the regressor expects.
//!
//! Each categorical field contributes at most one indicator, at the position
//! of `<field>_<value>` in the schema. Values the schema does not know (and
//! absent fields) contribute nothing, so every unseen category of a field
//! encodes identically. `distance` and `day` are standardized and written to
//! their own columns; indicators are never scaled.

use serde_json::Value;

use crate::artifacts::{FeatureSchema, StandardScaler};
use crate::error::ApiError;
use crate::schema::FlightQuery;

pub fn encode(
    schema: &FeatureSchema,
    scaler: &StandardScaler,
    query: &FlightQuery,
) -> Result<Vec<f64>, ApiError> {
    let distance = numeric(query.distance.as_ref(), "distance")?;
    let day = numeric(query.day.as_ref(), "day")?;

    let mut features = vec![0.0; schema.len()];

    let categories = [
        ("from", query.from.as_deref()),
        ("to", query.to.as_deref()),
        ("agency", query.agency.as_deref()),
        ("flightType", query.flight_type.as_deref()),
    ];
    for (field, value) in categories {
        let Some(value) = value else { continue };
        if let Some(idx) = schema.position(&format!("{field}_{value}")) {
            features[idx] = 1.0;
        }
    }

    for (idx, value) in schema
        .numeric_positions()
        .into_iter()
        .zip(scaler.transform([distance, day]))
    {
        features[idx] = value;
    }

    Ok(features)
}

fn numeric(value: Option<&Value>, field: &str) -> Result<f64, ApiError> {
    let parsed = match value {
        None | Some(Value::Null) => return Err(ApiError::input(format!("{field} is required"))),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::input(format!("{field} must be numeric")))
}
