//! Wire types for the Places API (New) text search endpoint.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextRequest {
    pub text_query: String,
    pub min_rating: f64,
    pub max_result_count: u32,
    pub location_restriction: LocationRestriction,
    pub open_now: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRestriction {
    pub rectangle: Rectangle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub low: LatLngLiteral,
    pub high: LatLngLiteral,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngLiteral {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchTextResponse {
    #[serde(default)]
    pub places: Vec<Place>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub display_name: Option<LocalizedText>,
    pub rating: Option<f64>,
    pub user_rating_count: Option<u32>,
    pub formatted_address: Option<String>,
    pub location: Option<LatLngLiteral>,
    pub regular_opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocalizedText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub name: String,
    pub height_px: Option<u32>,
    pub width_px: Option<u32>,
}

/// Google error envelope: `{"error": {"code": 400, "message": "...", "status": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<ErrorBody>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}
