use crate::config::Settings;
use crate::domain::restaurant::{RestaurantRecord, SearchResultSet};
use crate::error::GourmetError;
use crate::geo::{BoundingBox, Location};
use crate::places::SearchBackend;
use std::time::Duration;

/// Demo backend used when no places credential is configured. The delay keeps
/// loading states visible in the front end.
#[derive(Debug, Clone)]
pub struct FallbackBackend {
    delay: Duration,
}

impl FallbackBackend {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.fallback_delay)
    }
}

pub fn fallback_records() -> Vec<RestaurantRecord> {
    let entry = |id: &str, name: &str, rating: f64, count: u32, address: &str, open: bool| {
        RestaurantRecord {
            id: id.to_string(),
            name: name.to_string(),
            rating,
            rating_count: Some(count),
            address: address.to_string(),
            location: Location::new(0.0, 0.0),
            is_open_now: Some(open),
            photo_refs: Vec::new(),
        }
    };

    vec![
        entry("mock-1", "The Golden Spoon", 4.8, 124, "123 Main St, Anytown", true),
        entry("mock-2", "Sushi Master", 4.6, 89, "456 Oak Ave, Anytown", false),
        entry("mock-3", "Burger King (But Better)", 4.9, 2300, "789 Pine Ln, Anytown", true),
    ]
}

#[async_trait::async_trait]
impl SearchBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn search(&self, _bbox: &BoundingBox) -> Result<SearchResultSet, GourmetError> {
        tracing::warn!("no places API key configured; returning fallback data");
        tokio::time::sleep(self.delay).await;

        Ok(SearchResultSet {
            records: fallback_records(),
            is_fallback_data: true,
        })
    }
}
