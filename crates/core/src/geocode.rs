use crate::config::Settings;
use crate::error::GourmetError;
use crate::geo::Location;
use anyhow::Context;
use serde::Deserialize;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";
const STATUS_OK: &str = "OK";

pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const MISSING_API_KEY: &str = "Server configuration error: Missing API Key";
const DEFAULT_ERROR_MESSAGE: &str = "Failed to geocode address";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Address to coordinates through the Geocoding API. Unlike search there is no
/// fallback: a missing credential is an error.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeocodeClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            http: settings.http_client()?,
            api_key: settings.google_places_api_key.clone(),
            base_url: settings.geocode_base_url.clone(),
        })
    }

    /// Returns the first candidate's location; ambiguous addresses are not
    /// disambiguated.
    pub async fn geocode(&self, address: &str) -> Result<Location, GourmetError> {
        if address.is_empty() {
            return Err(GourmetError::InvalidInput(ADDRESS_REQUIRED.to_string()));
        }
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(GourmetError::Configuration(MISSING_API_KEY.to_string()));
        };

        let url = format!("{}{}", self.base_url.trim_end_matches('/'), GEOCODE_PATH);
        let res = self
            .http
            .get(url)
            .query(&[("address", address), ("key", api_key)])
            .send()
            .await
            .context("geocode request failed")?;

        // The Geocoding API reports failures in the body, not the HTTP status.
        let text = res
            .text()
            .await
            .context("failed to read geocode response")?;
        let parsed = serde_json::from_str::<GeocodeResponse>(&text)
            .with_context(|| format!("geocode response is not valid JSON: {text}"))?;

        if parsed.status != STATUS_OK {
            let message = parsed
                .error_message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            return Err(GourmetError::upstream(None, message));
        }

        let first = parsed
            .results
            .into_iter()
            .next()
            .context("geocode status OK but no results returned")?;

        Ok(Location::new(
            first.geometry.location.lat,
            first.geometry.location.lng,
        ))
    }
}
