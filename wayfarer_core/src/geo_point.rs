use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::errors::InvalidCoordinates;

/// Device position used whenever the location source cannot answer.
pub const FALLBACK_POSITION: GeoPoint = GeoPoint {
    lat: 6.4487424,
    lng: 3.4504704,
};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.lat, raw.lng)
    }
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinates> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinates::Latitude(lat));
        }

        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinates::Longitude(lng));
        }

        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// `"lat,lng"`, the form most web mapping services accept as a query value.
    pub fn to_query_value(&self) -> String {
        let point: geo_types::Point = self.into();
        format!("{},{}", point.y(), point.x())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

impl From<&GeoPoint> for geo_types::Point<f64> {
    fn from(point: &GeoPoint) -> Self {
        geo_types::Point::new(point.lng, point.lat)
    }
}

impl From<GeoPoint> for geo_types::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        (&point).into()
    }
}

impl TryFrom<geo_types::Point<f64>> for GeoPoint {
    type Error = InvalidCoordinates;

    fn try_from(point: geo_types::Point<f64>) -> Result<Self, Self::Error> {
        GeoPoint::new(point.y(), point.x())
    }
}

/// A point together with the instant it was captured.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestampedPoint {
    point: GeoPoint,
    captured_at: Timestamp,
}

impl TimestampedPoint {
    pub fn new(point: GeoPoint, captured_at: Timestamp) -> Self {
        Self { point, captured_at }
    }

    pub fn now(point: GeoPoint) -> Self {
        Self::new(point, Timestamp::now())
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }
}
