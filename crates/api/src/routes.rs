use crate::error::{ApiError, PhotoError};
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use gourmet_core::config::Settings;
use gourmet_core::domain::legacy::SearchResponse;
use gourmet_core::geocode::GeocodeClient;
use gourmet_core::photo::{PhotoClient, CACHE_CONTROL};
use gourmet_core::places::{backend_from_settings, SearchBackend};
use gourmet_core::search::{find_restaurants, SearchQuery};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn SearchBackend>,
    pub geocoder: GeocodeClient,
    pub photos: PhotoClient,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Ok(Self {
            backend: backend_from_settings(settings)?,
            geocoder: GeocodeClient::from_settings(settings)?,
            photos: PhotoClient::from_settings(settings)?,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/geocode", get(geocode))
        .route("/api/restaurants", get(restaurants))
        .route("/api/photo", get(photo))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

type Params = Query<HashMap<String, String>>;

#[derive(Debug, Serialize)]
struct GeocodeBody {
    lat: f64,
    lng: f64,
}

async fn geocode(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<GeocodeBody>, ApiError> {
    let address = params.get("address").map(String::as_str).unwrap_or_default();

    let location = state
        .geocoder
        .geocode(address)
        .await
        .map_err(ApiError::from_geocode)?;

    Ok(Json(GeocodeBody {
        lat: location.latitude,
        lng: location.longitude,
    }))
}

async fn restaurants(
    State(state): State<AppState>,
    Query(params): Params,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = SearchQuery::from_raw(
        params.get("lat").map(String::as_str),
        params.get("lng").map(String::as_str),
        params.get("radius").map(String::as_str),
    )
    .map_err(ApiError::from_search)?;

    let result = find_restaurants(state.backend.as_ref(), query)
        .await
        .map_err(ApiError::from_search)?;

    tracing::info!(
        backend = state.backend.name(),
        count = result.records.len(),
        is_fallback = result.is_fallback_data,
        radius_miles = query.radius_miles,
        "restaurant search served"
    );

    Ok(Json(SearchResponse::from(&result)))
}

async fn photo(State(state): State<AppState>, Query(params): Params) -> Result<Response, PhotoError> {
    let name = params.get("name").map(String::as_str).unwrap_or_default();

    let photo = state.photos.fetch(name).await?;

    // Bytes are relayed as they arrive; dropping the response body on client
    // disconnect tears down the upstream connection.
    Ok((
        [
            (header::CONTENT_TYPE, photo.content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
        ],
        Body::from_stream(photo.response.bytes_stream()),
    )
        .into_response())
}
