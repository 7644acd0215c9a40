use jiff::SignedDuration;
use serde::Deserialize;
use wayfarer_core::{
    geo_point::GeoPoint,
    services::{
        geocoding::{AddressComponent, GeocodeResult},
        places::PlaceSuggestion,
        routing::Route,
    },
};

use crate::google_maps_error::GoogleMapsError;

pub const STATUS_OK: &str = "OK";
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";

#[derive(Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl TryFrom<LatLng> for GeoPoint {
    type Error = GoogleMapsError;

    fn try_from(value: LatLng) -> Result<Self, Self::Error> {
        Ok(GeoPoint::new(value.lat, value.lng)?)
    }
}

#[derive(Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResultBody>,
}

#[derive(Deserialize)]
pub struct GeocodeResultBody {
    pub formatted_address: String,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub geometry: Geometry,
}

#[derive(Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

impl GeocodeResponse {
    /// `ZERO_RESULTS` is an empty answer, not an error.
    pub fn into_results(self) -> Result<Vec<GeocodeResult>, GoogleMapsError> {
        match self.status.as_str() {
            STATUS_OK => self
                .results
                .into_iter()
                .map(|result| {
                    Ok(GeocodeResult {
                        formatted_address: result.formatted_address,
                        address_components: result.address_components,
                        location: result.geometry.location.try_into()?,
                    })
                })
                .collect(),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            _ => Err(status_error(self.status, self.error_message)),
        }
    }
}

#[derive(Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub routes: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    summary: Option<String>,
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
    overview_polyline: Option<Polyline>,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    distance: Option<TextValue>,
    duration: Option<TextValue>,
    start_address: Option<String>,
    end_address: Option<String>,
}

#[derive(Deserialize)]
struct TextValue {
    value: f64,
}

#[derive(Deserialize)]
struct Polyline {
    points: String,
}

impl DirectionsResponse {
    /// First route; the service's own JSON is kept as the route payload.
    pub fn into_route(self) -> Result<Route, GoogleMapsError> {
        match self.status.as_str() {
            STATUS_OK => {}
            STATUS_ZERO_RESULTS | STATUS_NOT_FOUND => return Err(GoogleMapsError::NoResults),
            _ => return Err(status_error(self.status, self.error_message)),
        }

        let payload = self
            .routes
            .into_iter()
            .next()
            .ok_or(GoogleMapsError::NoResults)?;
        let route: DirectionsRoute = serde_json::from_value(payload.clone())?;

        let distance_meters = sum_values(route.legs.iter().map(|leg| leg.distance.as_ref()));
        let duration = sum_values(route.legs.iter().map(|leg| leg.duration.as_ref()))
            .map(SignedDuration::from_secs_f64);

        Ok(Route {
            summary: route.summary.filter(|summary| !summary.is_empty()),
            start_address: route.legs.first().and_then(|leg| leg.start_address.clone()),
            end_address: route.legs.last().and_then(|leg| leg.end_address.clone()),
            distance_meters,
            duration,
            overview_polyline: route.overview_polyline.map(|polyline| polyline.points),
            payload,
        })
    }
}

fn sum_values<'a>(values: impl Iterator<Item = Option<&'a TextValue>>) -> Option<f64> {
    values.fold(None, |total, value| match value {
        Some(value) => Some(total.unwrap_or(0.0) + value.value),
        None => total,
    })
}

#[derive(Deserialize)]
pub struct AutocompleteResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub predictions: Vec<PlaceSuggestion>,
}

impl AutocompleteResponse {
    pub fn into_suggestions(self) -> Result<Vec<PlaceSuggestion>, GoogleMapsError> {
        match self.status.as_str() {
            STATUS_OK => Ok(self.predictions),
            STATUS_ZERO_RESULTS => Ok(Vec::new()),
            _ => Err(status_error(self.status, self.error_message)),
        }
    }
}

#[derive(Deserialize)]
pub struct GeolocateResponse {
    pub location: LatLng,
    pub accuracy: Option<f64>,
}

#[derive(Deserialize)]
pub struct GeolocateErrorResponse {
    pub error: GeolocateErrorBody,
}

#[derive(Deserialize)]
pub struct GeolocateErrorBody {
    pub message: String,
}

fn status_error(status: String, message: Option<String>) -> GoogleMapsError {
    GoogleMapsError::Status {
        status,
        message: message.unwrap_or_default(),
    }
}
