use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::artifacts::ArtifactStore;
use crate::catalog::HotelCatalog;
use crate::handler::{health, predict_flight, recommend_hotels};

/// Read-only state built once at startup and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
    pub hotels: Arc<HotelCatalog>,
}

impl AppState {
    pub fn new(artifacts: ArtifactStore, hotels: HotelCatalog) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
            hotels: Arc::new(hotels),
        }
    }
}

pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health))
        .route("/predict-flight", post(predict_flight))
        .route("/recommend-hotels", post(recommend_hotels))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
