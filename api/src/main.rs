pub mod app;
pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod encoder;
pub mod error;
pub mod handler;
pub mod model;
pub mod predictor;
pub mod recommender;
pub mod regressor;
pub mod schema;

#[cfg(test)]
mod fixtures;

use crate::app::AppState;
use crate::artifacts::ArtifactStore;
use crate::catalog::HotelCatalog;
use crate::config::Config;
use std::error::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "voyage_api=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Nothing is served unless every artifact loads.
    let artifacts = ArtifactStore::load(
        &config.model_path,
        &config.scaler_path,
        &config.feature_names_path,
    )?;
    let hotels = HotelCatalog::load(&config.hotels_path)?;

    let state = AppState::new(artifacts, hotels);
    let app = app::create_router(state);

    let addr = config.addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("voyage-api v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, app).await?;

    Ok(())
}
