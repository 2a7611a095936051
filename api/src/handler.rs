use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::app::AppState;
use crate::error::ApiError;
use crate::predictor::predict_price;
use crate::recommender::recommend;
use crate::schema::{
    FlightQuery, HealthResponse, HotelQuery, PredictionResponse, RecommendationResponse,
};

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "Voyage Analytics API running",
        features: state.artifacts.schema().len(),
        hotels: state.hotels.len(),
        loaded_at: state.artifacts.loaded_at(),
    })
}

pub async fn predict_flight(
    State(state): State<AppState>,
    payload: Result<Json<FlightQuery>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(query) = payload.map_err(|e| ApiError::input(e.body_text()))?;

    let predicted_price = predict_price(&state.artifacts, &query)?;
    tracing::debug!(
        from = ?query.from,
        to = ?query.to,
        predicted_price,
        "predicted flight price"
    );

    Ok(Json(PredictionResponse { predicted_price }))
}

pub async fn recommend_hotels(
    State(state): State<AppState>,
    payload: Result<Json<HotelQuery>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(query) = payload.map_err(|e| ApiError::input(e.body_text()))?;

    let recommended_hotels = recommend(&state.hotels, &query)?;
    Ok(Json(RecommendationResponse { recommended_hotels }))
}
