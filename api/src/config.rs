use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::StartupError;

/// Runtime settings read once from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    pub feature_names_path: PathBuf,
    pub hotels_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StartupError> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var_or("PORT", "5000");
        let port = port
            .parse::<u16>()
            .map_err(|_| StartupError::Config(format!("PORT must be a valid number, got {port:?}")))?;

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            model_path: var_or("MODEL_PATH", "model/flight_price_model.json").into(),
            scaler_path: var_or("SCALER_PATH", "model/scaler.json").into(),
            feature_names_path: var_or("FEATURE_NAMES_PATH", "model/feature_names.json").into(),
            hotels_path: var_or("HOTELS_PATH", "data/hotels.csv").into(),
        })
    }

    pub fn addr(&self) -> Result<SocketAddr, StartupError> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|_| StartupError::Config(format!("invalid HOST:PORT {}:{}", self.host, self.port)))
    }
}
