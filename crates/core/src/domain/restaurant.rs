use crate::geo::Location;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub rating_count: Option<u32>,
    pub address: String,
    pub location: Location,
    /// `None` when the upstream said nothing about opening hours.
    pub is_open_now: Option<bool>,
    pub photo_refs: Vec<PhotoRef>,
}

/// Upstream photo resource. `name` is opaque and is handed back to the media
/// endpoint exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub name: String,
    pub height_px: Option<u32>,
    pub width_px: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    pub records: Vec<RestaurantRecord>,
    pub is_fallback_data: bool,
}

/// Stable sort by rating, highest first. Equal ratings keep their input order.
pub fn rank_by_rating(records: &mut [RestaurantRecord]) {
    records.sort_by(|a, b| b.rating.total_cmp(&a.rating));
}

#[cfg(test)]
pub(crate) fn record(id: &str, rating: f64) -> RestaurantRecord {
    RestaurantRecord {
        id: id.to_string(),
        name: format!("Place {id}"),
        rating,
        rating_count: Some(10),
        address: String::new(),
        location: Location::new(1.0, 2.0),
        is_open_now: Some(true),
        photo_refs: Vec::new(),
    }
}
