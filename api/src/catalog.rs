//! In-memory hotel table loaded from CSV at startup.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::StartupError;
use crate::model::HotelRecord;

#[derive(Debug)]
pub struct HotelCatalog {
    hotels: Vec<HotelRecord>,
}

impl HotelCatalog {
    pub fn new(hotels: Vec<HotelRecord>) -> Self {
        Self { hotels }
    }

    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let file = File::open(path).map_err(|source| StartupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let hotels = parse_hotels(BufReader::new(file), path)?;
        tracing::info!(hotels = hotels.len(), path = %path.display(), "loaded hotel catalog");
        Ok(Self::new(hotels))
    }

    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    /// Hotels whose `place` matches exactly (case-sensitive).
    pub fn in_place<'a>(&'a self, place: &'a str) -> impl Iterator<Item = &'a HotelRecord> + 'a {
        self.hotels.iter().filter(move |h| h.place == place)
    }
}

pub fn within_price(hotel: &HotelRecord, max_price: f64) -> bool {
    hotel.price_per_night <= max_price
}

pub fn at_least_rated(hotel: &HotelRecord, min_rating: f64) -> bool {
    hotel.rating >= min_rating
}

fn parse_hotels<R: Read>(reader: R, path: &Path) -> Result<Vec<HotelRecord>, StartupError> {
    let csv_error = |source| StartupError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StartupError::invalid(path, format!("missing column {name:?}")))
    };
    let place_idx = column("place")?;
    let price_idx = column("price_per_night")?;
    let rating_idx = column("rating")?;
    let name_idx = headers.iter().position(|h| h == "name");

    let mut hotels = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        let line = row + 2;

        let number = |idx: usize, name: &str| -> Result<f64, StartupError> {
            let raw = record.get(idx).unwrap_or_default().trim();
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    StartupError::invalid(path, format!("line {line}: {name} {raw:?} is not a number"))
                })
        };

        let mut extra = BTreeMap::new();
        for (idx, (header, value)) in headers.iter().zip(record.iter()).enumerate() {
            if ![place_idx, price_idx, rating_idx].contains(&idx) && Some(idx) != name_idx {
                extra.insert(header.to_string(), cell_value(value));
            }
        }

        hotels.push(HotelRecord {
            name: name_idx.and_then(|idx| record.get(idx)).map(str::to_string),
            place: record.get(place_idx).unwrap_or_default().to_string(),
            price_per_night: number(price_idx, "price_per_night")?,
            rating: number(rating_idx, "rating")?,
            extra,
        });
    }

    Ok(hotels)
}

/// Integers and finite floats stay numeric, blank cells become null.
fn cell_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    match trimmed.parse::<f64>() {
        Ok(float) if float.is_finite() => Value::from(float),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_rows_and_keeps_extra_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hotel_id,name,place,price_per_night,rating").unwrap();
        writeln!(file, "h1,Hotel A,Recife (PE),310.5,4.5").unwrap();
        writeln!(file, "h2,Hotel K,Natal (RN),120,3").unwrap();

        let catalog = HotelCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);

        let first = catalog.in_place("Recife (PE)").next().unwrap();
        assert_eq!(first.name.as_deref(), Some("Hotel A"));
        assert_eq!(first.place, "Recife (PE)");
        assert_eq!(first.price_per_night, 310.5);
        assert_eq!(first.rating, 4.5);
        assert_eq!(first.extra.get("hotel_id"), Some(&Value::from("h1")));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn extra_columns_keep_numeric_types() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "travelCode,name,place,price_per_night,rating,days,total,notes").unwrap();
        writeln!(file, "13,Hotel A,Recife (PE),310.5,4.5,3,931.5,").unwrap();

        let catalog = HotelCatalog::load(file.path()).unwrap();
        let row = catalog.in_place("Recife (PE)").next().unwrap();
        assert_eq!(row.extra["travelCode"], Value::from(13));
        assert_eq!(row.extra["days"], Value::from(3));
        assert_eq!(row.extra["total"], Value::from(931.5));
        assert_eq!(row.extra["notes"], Value::Null);

        let json = serde_json::to_value(row).unwrap();
        assert_eq!(json["travelCode"], 13);
        assert_eq!(json["total"], 931.5);
        assert_eq!(json["name"], "Hotel A");
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,place,rating").unwrap();
        writeln!(file, "Hotel A,Recife (PE),4").unwrap();

        let err = HotelCatalog::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("price_per_night"));
    }

    #[test]
    fn non_numeric_price_is_fatal() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,place,price_per_night,rating").unwrap();
        writeln!(file, "Hotel A,Recife (PE),cheap,4").unwrap();

        let err = HotelCatalog::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn place_match_is_case_sensitive() {
        let catalog = HotelCatalog::new(vec![HotelRecord {
            name: None,
            place: "Natal (RN)".into(),
            price_per_night: 100.0,
            rating: 4.0,
            extra: BTreeMap::new(),
        }]);
        assert_eq!(catalog.in_place("Natal (RN)").count(), 1);
        assert_eq!(catalog.in_place("natal (rn)").count(), 0);
    }
}
