use crate::config::Settings;
use crate::domain::restaurant::SearchResultSet;
use crate::error::GourmetError;
use crate::geo::BoundingBox;
use std::sync::Arc;

pub mod fallback;
pub mod live;
pub mod types;

pub use fallback::FallbackBackend;
pub use live::LivePlacesBackend;

pub const TEXT_QUERY: &str = "restaurant";
pub const MIN_RATING: f64 = 4.5;
pub const MAX_RESULT_COUNT: u32 = 20;

#[async_trait::async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, bbox: &BoundingBox) -> Result<SearchResultSet, GourmetError>;
}

/// Picks the live backend when a credential is configured, otherwise the
/// fixed demo data.
pub fn backend_from_settings(settings: &Settings) -> anyhow::Result<Arc<dyn SearchBackend>> {
    if settings.google_places_api_key.is_some() {
        Ok(Arc::new(LivePlacesBackend::from_settings(settings)?))
    } else {
        tracing::warn!("GOOGLE_PLACES_API_KEY not set; restaurant search will serve fallback data");
        Ok(Arc::new(FallbackBackend::from_settings(settings)))
    }
}
