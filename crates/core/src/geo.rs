use serde::{Deserialize, Serialize};

pub const METERS_PER_MILE: f64 = 1609.34;
// Rough length of one degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_within_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

/// Rectangle approximating a circle of `radius_miles` around `center`.
///
/// The longitude span is scaled by `cos(latitude)`. Nothing is clamped: at the
/// poles the cosine vanishes and the span blows up, and boxes that cross the
/// antimeridian are returned with `east > 180` or `west < -180`.
pub fn bounding_box(center: Location, radius_miles: f64) -> BoundingBox {
    let meters = radius_miles * METERS_PER_MILE;
    let lat_delta = meters / METERS_PER_DEGREE;
    let lng_delta = meters / (METERS_PER_DEGREE * center.latitude.to_radians().cos());

    BoundingBox {
        south: center.latitude - lat_delta,
        north: center.latitude + lat_delta,
        west: center.longitude - lng_delta,
        east: center.longitude + lng_delta,
    }
}
