//! JSON shape the browser front end consumes. Field names predate the
//! normalized record and are kept for compatibility.

use crate::domain::restaurant::{PhotoRef, RestaurantRecord, SearchResultSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyRestaurant {
    pub id: String,
    pub name: String,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u32>,
    pub vicinity: String,
    pub geometry: Geometry,
    pub opening_hours: OpeningHours,
    pub photos: Vec<LegacyPhoto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub open_now: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyPhoto {
    pub photo_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<LegacyRestaurant>,
    #[serde(rename = "isMock")]
    pub is_mock: bool,
}

impl From<&PhotoRef> for LegacyPhoto {
    fn from(photo: &PhotoRef) -> Self {
        Self {
            photo_reference: photo.name.clone(),
            height: photo.height_px,
            width: photo.width_px,
        }
    }
}

impl From<&RestaurantRecord> for LegacyRestaurant {
    fn from(record: &RestaurantRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            rating: record.rating,
            user_ratings_total: record.rating_count,
            vicinity: record.address.clone(),
            geometry: Geometry {
                location: LatLng {
                    lat: record.location.latitude,
                    lng: record.location.longitude,
                },
            },
            opening_hours: OpeningHours {
                open_now: record.is_open_now.unwrap_or(false),
            },
            photos: record.photo_refs.iter().map(LegacyPhoto::from).collect(),
        }
    }
}

impl From<&SearchResultSet> for SearchResponse {
    fn from(set: &SearchResultSet) -> Self {
        Self {
            results: set.records.iter().map(LegacyRestaurant::from).collect(),
            is_mock: set.is_fallback_data,
        }
    }
}
