use crate::artifacts::ArtifactStore;
use crate::encoder::encode;
use crate::error::ApiError;
use crate::schema::FlightQuery;

/// Runs the model over an encoded vector and rounds to cents.
pub fn predict_encoded(store: &ArtifactStore, features: &[f64]) -> Result<f64, ApiError> {
    let expected = store.schema().len();
    if features.len() != expected {
        return Err(ApiError::EncodingInvariant {
            expected,
            actual: features.len(),
        });
    }

    let raw = store.model().predict(features)?;
    Ok(round_cents(raw))
}

pub fn predict_price(store: &ArtifactStore, query: &FlightQuery) -> Result<f64, ApiError> {
    let features = encode(store.schema(), store.scaler(), query)?;
    predict_encoded(store, &features)
}

/// Exact halves go to the even cent.
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
