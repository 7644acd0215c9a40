use std::collections::HashMap;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use wayfarer_core::{
    errors::ServiceError,
    geo_point::GeoPoint,
    services::{
        geocoding::{AddressComponent, GeocodeResult, Geocoder},
        places::{LocationBias, PlaceSearch, PlaceSuggestion},
        routing::{Route, RouteRequest, RoutingService},
    },
};

pub fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).unwrap()
}

pub fn route_to(destination: &str) -> Route {
    Route {
        summary: Some(format!("to {destination}")),
        start_address: None,
        end_address: Some(destination.to_string()),
        distance_meters: None,
        duration: None,
        overview_polyline: None,
        payload: serde_json::json!({ "legs": [{ "end_address": destination }] }),
    }
}

/// Names every coordinate after itself and routes anywhere.
#[derive(Default)]
pub struct EchoMaps {
    pub route_requests: Mutex<Vec<RouteRequest>>,
    held: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl EchoMaps {
    pub fn address_of(point: GeoPoint) -> String {
        format!("{:.2} {:.2}", point.lat(), point.lng())
    }

    pub fn hold_route(&self, destination: GeoPoint) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.held.lock().insert(Self::address_of(destination), rx);
        tx
    }
}

impl Geocoder for EchoMaps {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Vec<GeocodeResult>, ServiceError> {
        let address = Self::address_of(point);
        Ok(vec![GeocodeResult {
            formatted_address: address.clone(),
            address_components: vec![AddressComponent {
                long_name: address.clone(),
                short_name: address,
                types: vec![],
            }],
            location: point,
        }])
    }

    async fn geocode_address(&self, _address: &str) -> Result<Vec<GeocodeResult>, ServiceError> {
        Ok(vec![])
    }
}

impl RoutingService for EchoMaps {
    async fn route(&self, request: &RouteRequest) -> Result<Route, ServiceError> {
        self.route_requests.lock().push(request.clone());
        let held = self.held.lock().remove(&request.destination);
        if let Some(rx) = held {
            let _ = rx.await;
        }
        Ok(route_to(&request.destination))
    }
}

impl PlaceSearch for EchoMaps {
    async fn autocomplete(
        &self,
        _input: &str,
        _bias: Option<LocationBias>,
    ) -> Result<Vec<PlaceSuggestion>, ServiceError> {
        Ok(vec![])
    }
}
