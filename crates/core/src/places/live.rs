use crate::config::Settings;
use crate::domain::restaurant::{PhotoRef, RestaurantRecord, SearchResultSet};
use crate::error::GourmetError;
use crate::geo::{BoundingBox, Location};
use crate::places::types::{
    ErrorEnvelope, LatLngLiteral, LocationRestriction, Place, Rectangle, SearchTextRequest,
    SearchTextResponse,
};
use crate::places::{SearchBackend, MAX_RESULT_COUNT, MIN_RATING, TEXT_QUERY};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};

const SEARCH_TEXT_PATH: &str = "/v1/places:searchText";
const FIELD_MASK: &str = "places.id,places.displayName,places.rating,places.userRatingCount,places.formattedAddress,places.location,places.regularOpeningHours,places.photos";
const DEFAULT_ERROR_MESSAGE: &str = "Failed to fetch from Google Places API";
const UNKNOWN_NAME: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct LivePlacesBackend {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl LivePlacesBackend {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_google_places_api_key()?.to_string();

        Ok(Self {
            http: settings.http_client()?,
            api_key,
            base_url: settings.places_base_url.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), SEARCH_TEXT_PATH)
    }

    fn headers(&self) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Goog-Api-Key",
            HeaderValue::from_str(&self.api_key).context("api key is not a valid header value")?,
        );
        headers.insert("X-Goog-FieldMask", HeaderValue::from_static(FIELD_MASK));
        Ok(headers)
    }
}

pub fn search_request(bbox: &BoundingBox) -> SearchTextRequest {
    SearchTextRequest {
        text_query: TEXT_QUERY.to_string(),
        min_rating: MIN_RATING,
        max_result_count: MAX_RESULT_COUNT,
        location_restriction: LocationRestriction {
            rectangle: Rectangle {
                low: LatLngLiteral {
                    latitude: bbox.south,
                    longitude: bbox.west,
                },
                high: LatLngLiteral {
                    latitude: bbox.north,
                    longitude: bbox.east,
                },
            },
        },
        open_now: false,
    }
}

/// Maps one upstream place into the normalized record.
pub fn normalize_place(place: Place) -> Result<RestaurantRecord, GourmetError> {
    let Some(location) = place.location else {
        return Err(GourmetError::upstream(
            None,
            format!("place {} has no location", place.id),
        ));
    };

    let name = place
        .display_name
        .and_then(|n| n.text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());

    let is_open_now = place
        .regular_opening_hours
        .and_then(|h| h.open_now)
        .unwrap_or(false);

    let photo_refs = place
        .photos
        .into_iter()
        .map(|p| PhotoRef {
            name: p.name,
            height_px: p.height_px,
            width_px: p.width_px,
        })
        .collect();

    Ok(RestaurantRecord {
        id: place.id,
        name,
        rating: place.rating.unwrap_or(0.0),
        rating_count: place.user_rating_count,
        address: place.formatted_address.unwrap_or_default(),
        location: Location::new(location.latitude, location.longitude),
        is_open_now: Some(is_open_now),
        photo_refs,
    })
}

fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[async_trait::async_trait]
impl SearchBackend for LivePlacesBackend {
    fn name(&self) -> &'static str {
        "google_places"
    }

    async fn search(&self, bbox: &BoundingBox) -> Result<SearchResultSet, GourmetError> {
        let res = self
            .http
            .post(self.url())
            .headers(self.headers()?)
            .json(&search_request(bbox))
            .send()
            .await
            .context("places search request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read places search response")?;

        if !status.is_success() {
            return Err(GourmetError::upstream(
                Some(status.as_u16()),
                upstream_error_message(&text),
            ));
        }

        let parsed = serde_json::from_str::<SearchTextResponse>(&text)
            .with_context(|| format!("places search response is not valid JSON: {text}"))?;

        let records = parsed
            .places
            .into_iter()
            .map(normalize_place)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = records.len(), "places search returned");

        Ok(SearchResultSet {
            records,
            is_fallback_data: false,
        })
    }
}
