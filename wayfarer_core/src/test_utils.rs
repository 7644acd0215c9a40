use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use tokio::sync::{oneshot, watch};

use crate::{
    errors::{GeolocationError, ServiceError},
    geo_point::GeoPoint,
    services::{
        geocoding::{AddressComponent, GeocodeResult, Geocoder},
        geolocation::GeolocationSource,
        places::{LocationBias, PlaceSearch, PlaceSuggestion},
        routing::{Route, RouteRequest, RoutingService},
    },
};

pub fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap()
}

pub fn geocode_result(formatted: &str, components: &[&str], location: GeoPoint) -> GeocodeResult {
    GeocodeResult {
        formatted_address: formatted.to_string(),
        address_components: components
            .iter()
            .map(|name| AddressComponent {
                long_name: name.to_string(),
                short_name: name.to_string(),
                types: vec![],
            })
            .collect(),
        location,
    }
}

pub fn route(summary: &str) -> Route {
    Route {
        summary: Some(summary.to_string()),
        start_address: None,
        end_address: None,
        distance_meters: Some(1200.0),
        duration: None,
        overview_polyline: None,
        payload: serde_json::json!({ "summary": summary }),
    }
}

pub struct CountingLocation {
    result: Result<GeoPoint, GeolocationError>,
    pub calls: AtomicUsize,
}

impl CountingLocation {
    pub fn at(point: GeoPoint) -> Self {
        Self {
            result: Ok(point),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: GeolocationError) -> Self {
        Self {
            result: Err(error),
            calls: AtomicUsize::new(0),
        }
    }
}

impl GeolocationSource for CountingLocation {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapsCall {
    ReverseGeocode(GeoPoint),
    Geocode(String),
    Route(RouteRequest),
    Autocomplete(String),
}

type GeocodeResponse = Result<Vec<GeocodeResult>, ServiceError>;

/// In-memory mapping service. Unknown lookups answer with no results.
pub struct FakeMaps {
    points: Mutex<Vec<(GeoPoint, GeocodeResponse)>>,
    addresses: Mutex<HashMap<String, GeocodeResponse>>,
    routes: Mutex<HashMap<String, Route>>,
    held_routes: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    suggestions: Mutex<Vec<PlaceSuggestion>>,
    last_bias: Mutex<Option<LocationBias>>,
    calls: Mutex<Vec<MapsCall>>,
    route_calls: watch::Sender<usize>,
}

impl Default for FakeMaps {
    fn default() -> Self {
        Self {
            points: Mutex::default(),
            addresses: Mutex::default(),
            routes: Mutex::default(),
            held_routes: Mutex::default(),
            suggestions: Mutex::default(),
            last_bias: Mutex::default(),
            calls: Mutex::default(),
            route_calls: watch::channel(0).0,
        }
    }
}

impl FakeMaps {
    pub fn add_point(&self, point: GeoPoint, results: Vec<GeocodeResult>) {
        self.points.lock().push((point, Ok(results)));
    }

    pub fn fail_point(&self, point: GeoPoint, error: ServiceError) {
        self.points.lock().insert(0, (point, Err(error)));
    }

    pub fn add_address(&self, address: &str, results: Vec<GeocodeResult>) {
        self.addresses.lock().insert(address.to_string(), Ok(results));
    }

    pub fn fail_address(&self, address: &str, error: ServiceError) {
        self.addresses.lock().insert(address.to_string(), Err(error));
    }

    pub fn add_route(&self, destination: &str, route: Route) {
        self.routes.lock().insert(destination.to_string(), route);
    }

    /// Routing to `destination` blocks until the returned sender fires.
    pub fn hold_route(&self, destination: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held_routes.lock().insert(destination.to_string(), rx);
        tx
    }

    pub async fn wait_for_route_calls(&self, count: usize) {
        let mut rx = self.route_calls.subscribe();
        let _ = rx.wait_for(|calls| *calls >= count).await;
    }

    pub fn set_suggestions(&self, suggestions: Vec<PlaceSuggestion>) {
        *self.suggestions.lock() = suggestions;
    }

    pub fn last_bias(&self) -> Option<LocationBias> {
        *self.last_bias.lock()
    }

    pub fn calls(&self) -> Vec<MapsCall> {
        self.calls.lock().clone()
    }
}

impl Geocoder for FakeMaps {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Vec<GeocodeResult>, ServiceError> {
        self.calls.lock().push(MapsCall::ReverseGeocode(point));
        self.points
            .lock()
            .iter()
            .find(|(known, _)| *known == point)
            .map(|(_, response)| response.clone())
            .unwrap_or(Ok(vec![]))
    }

    async fn geocode_address(&self, address: &str) -> Result<Vec<GeocodeResult>, ServiceError> {
        self.calls.lock().push(MapsCall::Geocode(address.to_string()));
        self.addresses
            .lock()
            .get(address)
            .cloned()
            .unwrap_or(Ok(vec![]))
    }
}

impl RoutingService for FakeMaps {
    async fn route(&self, request: &RouteRequest) -> Result<Route, ServiceError> {
        self.calls.lock().push(MapsCall::Route(request.clone()));
        self.route_calls.send_modify(|calls| *calls += 1);

        let held = self.held_routes.lock().remove(&request.destination);
        if let Some(rx) = held {
            let _ = rx.await;
        }

        self.routes
            .lock()
            .get(&request.destination)
            .cloned()
            .ok_or(ServiceError::NotFound)
    }
}

impl PlaceSearch for FakeMaps {
    async fn autocomplete(
        &self,
        input: &str,
        bias: Option<LocationBias>,
    ) -> Result<Vec<PlaceSuggestion>, ServiceError> {
        self.calls.lock().push(MapsCall::Autocomplete(input.to_string()));
        *self.last_bias.lock() = bias;
        Ok(self.suggestions.lock().clone())
    }
}
