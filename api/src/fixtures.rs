//! Small in-memory artifacts shared by the unit tests.

use std::collections::BTreeMap;

use crate::artifacts::{ArtifactStore, FeatureSchema, StandardScaler};
use crate::catalog::HotelCatalog;
use crate::model::HotelRecord;
use crate::regressor::{LinearModel, TrainedModel};

const COLUMNS: [(&str, f64); 14] = [
    ("from_Recife (PE)", 10.0),
    ("from_Sao Paulo (SP)", 15.0),
    ("from_Florianopolis (SC)", 12.0),
    ("to_Recife (PE)", 18.0),
    ("to_Sao Paulo (SP)", 20.0),
    ("to_Florianopolis (SC)", 25.0),
    ("agency_CloudFy", 5.0),
    ("agency_FlyingDrops", 3.0),
    ("agency_Rainbow", 0.0),
    ("flightType_economic", 0.0),
    ("flightType_premium", 150.0),
    ("flightType_firstClass", 300.0),
    ("distance", 100.0),
    ("day", -2.0),
];

pub fn schema() -> FeatureSchema {
    FeatureSchema::new(COLUMNS.iter().map(|(name, _)| name.to_string()).collect()).unwrap()
}

pub fn scaler() -> StandardScaler {
    StandardScaler {
        columns: vec!["distance".into(), "day".into()],
        mean: vec![1000.0, 15.0],
        scale: vec![500.0, 8.0],
    }
}

pub fn model() -> TrainedModel {
    TrainedModel::Linear(LinearModel {
        intercept: 500.0,
        coefficients: COLUMNS.iter().map(|(_, coef)| *coef).collect(),
    })
}

pub fn store() -> ArtifactStore {
    ArtifactStore::new(model(), scaler(), schema()).unwrap()
}

pub fn hotel(name: &str, place: &str, price_per_night: f64, rating: f64) -> HotelRecord {
    HotelRecord {
        name: Some(name.to_string()),
        place: place.to_string(),
        price_per_night,
        rating,
        extra: BTreeMap::new(),
    }
}

pub fn catalog() -> HotelCatalog {
    HotelCatalog::new(vec![
        hotel("Ocean View", "Florianopolis (SC)", 400.0, 4.0),
        hotel("Lagoa Inn", "Florianopolis (SC)", 450.0, 4.0),
        hotel("Ilha Palace", "Florianopolis (SC)", 550.0, 5.0),
        hotel("Boa Viagem", "Recife (PE)", 300.0, 4.5),
    ])
}
