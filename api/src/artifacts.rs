//! Training artifacts: the regressor, the numeric scaler and the ordered
//! feature names the regressor was fitted on.
//!
//! Everything here is loaded once before the server binds and is read-only
//! afterwards, so handlers share it behind an `Arc` without locking.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StartupError;
use crate::regressor::TrainedModel;

/// Raw numeric columns, in the order the scaler was fitted on.
pub const NUMERIC_COLUMNS: [&str; 2] = ["distance", "day"];

/// Ordered column names produced by one-hot encoding at training time.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
    numeric: [usize; 2],
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Result<Self, String> {
        if names.is_empty() {
            return Err("feature schema is empty".into());
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(format!("duplicate feature column {name:?}"));
            }
        }
        let mut numeric = [0; 2];
        for (slot, column) in numeric.iter_mut().zip(NUMERIC_COLUMNS) {
            *slot = *index
                .get(column)
                .ok_or_else(|| format!("feature schema lacks numeric column {column:?}"))?;
        }

        Ok(Self {
            names,
            index,
            numeric,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.index.get(column).copied()
    }

    /// Positions of `NUMERIC_COLUMNS`, in the same order.
    pub fn numeric_positions(&self) -> [usize; 2] {
        self.numeric
    }
}

/// Standardization parameters: `(x - mean) / scale` per column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub columns: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), String> {
        if self.columns != NUMERIC_COLUMNS {
            return Err(format!(
                "scaler fitted on {:?}, expected {:?}",
                self.columns, NUMERIC_COLUMNS
            ));
        }
        if self.mean.len() != self.columns.len() || self.scale.len() != self.columns.len() {
            return Err("scaler parameter lengths differ from its columns".into());
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err("scaler mean is not finite".into());
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err("scaler scale must be finite and non-zero".into());
        }
        Ok(())
    }

    /// Scales `values`, which must be given in `columns` order.
    pub fn transform(&self, values: [f64; 2]) -> [f64; 2] {
        let mut out = values;
        for (i, v) in out.iter_mut().enumerate() {
            *v = (*v - self.mean[i]) / self.scale[i];
        }
        out
    }
}

#[derive(Debug)]
pub struct ArtifactStore {
    model: TrainedModel,
    scaler: StandardScaler,
    schema: FeatureSchema,
    loaded_at: DateTime<Utc>,
}

impl ArtifactStore {
    /// Checks that the three artifacts agree with each other.
    pub fn new(
        model: TrainedModel,
        scaler: StandardScaler,
        schema: FeatureSchema,
    ) -> Result<Self, String> {
        model.validate()?;
        scaler.validate()?;
        if model.n_features() != schema.len() {
            return Err(format!(
                "model consumes {} features but the schema lists {}",
                model.n_features(),
                schema.len()
            ));
        }

        Ok(Self {
            model,
            scaler,
            schema,
            loaded_at: Utc::now(),
        })
    }

    pub fn load(
        model_path: &Path,
        scaler_path: &Path,
        feature_names_path: &Path,
    ) -> Result<Self, StartupError> {
        let model: TrainedModel = read_json(model_path)?;
        model
            .validate()
            .map_err(|reason| StartupError::invalid(model_path, reason))?;

        let scaler: StandardScaler = read_json(scaler_path)?;
        scaler
            .validate()
            .map_err(|reason| StartupError::invalid(scaler_path, reason))?;

        let names: Vec<String> = read_json(feature_names_path)?;
        let schema = FeatureSchema::new(names)
            .map_err(|reason| StartupError::invalid(feature_names_path, reason))?;

        let store = Self::new(model, scaler, schema)
            .map_err(|reason| StartupError::invalid(model_path, reason))?;

        tracing::info!(
            features = store.schema.len(),
            model = %model_path.display(),
            "loaded training artifacts"
        );
        Ok(store)
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StartupError> {
    let file = File::open(path).map_err(|source| StartupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| StartupError::Json {
        path: path.to_path_buf(),
        source,
    })
}
