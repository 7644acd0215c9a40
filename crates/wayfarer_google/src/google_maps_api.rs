use serde::de::DeserializeOwned;
use tracing::debug;
use wayfarer_core::{
    errors::ServiceError,
    geo_point::GeoPoint,
    services::{
        geocoding::{GeocodeResult, Geocoder},
        places::{LocationBias, PlaceSearch, PlaceSuggestion},
        routing::{Route, RouteRequest, RoutingService},
    },
};

use crate::{
    google_maps_error::GoogleMapsError,
    responses::{AutocompleteResponse, DirectionsResponse, GeocodeResponse},
};

pub const GOOGLE_MAPS_API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const GOOGLE_MAPS_BASE_URL_ENV_VAR: &str = "GOOGLE_MAPS_BASE_URL";

pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com";
pub const GEOCODE_API_PATH: &str = "/maps/api/geocode/json";
pub const DIRECTIONS_API_PATH: &str = "/maps/api/directions/json";
pub const AUTOCOMPLETE_API_PATH: &str = "/maps/api/place/autocomplete/json";

#[derive(Clone)]
pub struct GoogleMapsClientParams {
    pub api_key: String,
    pub base_url: String,
    /// Language of returned addresses, e.g. "en"
    pub language: Option<String>,
}

impl GoogleMapsClientParams {
    /// `None` when no API key is configured.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(GOOGLE_MAPS_API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.is_empty())?;

        Some(Self {
            api_key,
            base_url: std::env::var(GOOGLE_MAPS_BASE_URL_ENV_VAR)
                .unwrap_or_else(|_| GOOGLE_MAPS_BASE_URL.to_string()),
            language: None,
        })
    }
}

/// Geocoding, Directions and Places Autocomplete web services.
pub struct GoogleMapsClient {
    params: GoogleMapsClientParams,
    client: reqwest::Client,
}

impl GoogleMapsClient {
    pub fn new(params: GoogleMapsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub async fn fetch_reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> Result<Vec<GeocodeResult>, GoogleMapsError> {
        let response: GeocodeResponse = self
            .get(GEOCODE_API_PATH, &[("latlng", point.to_query_value())])
            .await?;

        response.into_results()
    }

    pub async fn fetch_geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, GoogleMapsError> {
        let response: GeocodeResponse = self
            .get(GEOCODE_API_PATH, &[("address", address.to_string())])
            .await?;

        response.into_results()
    }

    pub async fn fetch_directions(&self, request: &RouteRequest) -> Result<Route, GoogleMapsError> {
        let response: DirectionsResponse = self
            .get(
                DIRECTIONS_API_PATH,
                &[
                    ("origin", request.origin.clone()),
                    ("destination", request.destination.clone()),
                    ("mode", request.mode.to_string()),
                ],
            )
            .await?;

        response.into_route()
    }

    pub async fn fetch_autocomplete(
        &self,
        input: &str,
        bias: Option<LocationBias>,
    ) -> Result<Vec<PlaceSuggestion>, GoogleMapsError> {
        let mut query = vec![("input", input.to_string())];
        if let Some(bias) = bias {
            query.push(("location", bias.center.to_query_value()));
            query.push(("radius", format!("{}", bias.radius_meters.round() as u64)));
        }

        let response: AutocompleteResponse = self.get(AUTOCOMPLETE_API_PATH, &query).await?;

        response.into_suggestions()
    }

    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, GoogleMapsError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.params.base_url, path);
        debug!("GoogleMapsApi: GET {}", path);

        let mut request = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", &self.params.api_key)]);

        if let Some(language) = &self.params.language {
            request = request.query(&[("language", language)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GoogleMapsError::Api { status, message });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl Geocoder for GoogleMapsClient {
    async fn reverse_geocode(&self, point: GeoPoint) -> Result<Vec<GeocodeResult>, ServiceError> {
        Ok(self.fetch_reverse_geocode(point).await?)
    }

    async fn geocode_address(&self, address: &str) -> Result<Vec<GeocodeResult>, ServiceError> {
        Ok(self.fetch_geocode(address).await?)
    }
}

impl RoutingService for GoogleMapsClient {
    async fn route(&self, request: &RouteRequest) -> Result<Route, ServiceError> {
        Ok(self.fetch_directions(request).await?)
    }
}

impl PlaceSearch for GoogleMapsClient {
    async fn autocomplete(
        &self,
        input: &str,
        bias: Option<LocationBias>,
    ) -> Result<Vec<PlaceSuggestion>, ServiceError> {
        Ok(self.fetch_autocomplete(input, bias).await?)
    }
}
