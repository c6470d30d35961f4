use crate::domain::restaurant::{rank_by_rating, SearchResultSet};
use crate::error::GourmetError;
use crate::geo::{bounding_box, Location};
use crate::places::SearchBackend;

pub const DEFAULT_RADIUS_MILES: f64 = 1.0;
pub const MISSING_COORDINATES: &str = "Latitude and Longitude are required";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchQuery {
    pub location: Location,
    pub radius_miles: f64,
}

impl SearchQuery {
    /// A coordinate that is NaN or exactly zero counts as missing, so anything
    /// on the equator or the prime meridian is rejected.
    pub fn new(location: Location, radius_miles: f64) -> Result<Self, GourmetError> {
        if !is_truthy(location.latitude) || !is_truthy(location.longitude) {
            return Err(GourmetError::InvalidInput(MISSING_COORDINATES.to_string()));
        }
        Ok(Self {
            location,
            radius_miles,
        })
    }

    /// Parses raw query-string values. Absent or unparseable coordinates are
    /// missing; an absent or unparseable radius means one mile.
    pub fn from_raw(
        lat: Option<&str>,
        lng: Option<&str>,
        radius: Option<&str>,
    ) -> Result<Self, GourmetError> {
        let (Some(latitude), Some(longitude)) = (parse_coordinate(lat), parse_coordinate(lng))
        else {
            return Err(GourmetError::InvalidInput(MISSING_COORDINATES.to_string()));
        };

        let radius_miles = radius
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>().unwrap_or_else(|_| {
                    tracing::debug!(radius = s, "unparseable radius; using default");
                    DEFAULT_RADIUS_MILES
                })
            })
            .unwrap_or(DEFAULT_RADIUS_MILES);

        Self::new(Location::new(latitude, longitude), radius_miles)
    }
}

fn is_truthy(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Bounding box, one backend call, then ranking. Fallback data keeps its fixed
/// order.
pub async fn find_restaurants(
    backend: &dyn SearchBackend,
    query: SearchQuery,
) -> Result<SearchResultSet, GourmetError> {
    let bbox = bounding_box(query.location, query.radius_miles);
    tracing::debug!(
        backend = backend.name(),
        south = bbox.south,
        north = bbox.north,
        west = bbox.west,
        east = bbox.east,
        "searching restaurants"
    );

    let mut result = backend.search(&bbox).await?;
    if !result.is_fallback_data {
        rank_by_rating(&mut result.records);
    }
    Ok(result)
}
