use std::cmp::Ordering;

use crate::catalog::{at_least_rated, within_price, HotelCatalog};
use crate::error::ApiError;
use crate::model::HotelRecord;
use crate::schema::HotelQuery;

pub const DEFAULT_MAX_PRICE: f64 = 5000.0;
pub const DEFAULT_MIN_RATING: f64 = 3.0;
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Best-rated hotels in `query.place` within budget, cheapest first among
/// equal ratings. No match is an empty list, not an error.
pub fn recommend(catalog: &HotelCatalog, query: &HotelQuery) -> Result<Vec<HotelRecord>, ApiError> {
    let place = match query.place.as_deref() {
        Some(place) if !place.is_empty() => place,
        _ => return Err(ApiError::input("place is required")),
    };
    let max_price = query.max_price.unwrap_or(DEFAULT_MAX_PRICE);
    let min_rating = query.min_rating.unwrap_or(DEFAULT_MIN_RATING);

    let mut matches: Vec<&HotelRecord> = catalog
        .in_place(place)
        .filter(|h| within_price(h, max_price) && at_least_rated(h, min_rating))
        .collect();

    matches.sort_by(|a, b| rank(a, b));
    matches.truncate(MAX_RECOMMENDATIONS);

    tracing::debug!(place, max_price, min_rating, found = matches.len(), "recommended hotels");
    Ok(matches.into_iter().cloned().collect())
}

/// Rating descending, then price ascending.
fn rank(a: &HotelRecord, b: &HotelRecord) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| a.price_per_night.total_cmp(&b.price_per_night))
}
