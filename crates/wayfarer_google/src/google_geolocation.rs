use serde::Serialize;
use tracing::debug;
use wayfarer_core::{
    errors::GeolocationError, geo_point::GeoPoint, services::geolocation::GeolocationSource,
};

use crate::{
    google_maps_error::GoogleMapsError,
    responses::{GeolocateErrorResponse, GeolocateResponse},
};

pub const GOOGLE_GEOLOCATION_URL_ENV_VAR: &str = "GOOGLE_GEOLOCATION_URL";
pub const GOOGLE_GEOLOCATION_URL: &str = "https://www.googleapis.com/geolocation/v1/geolocate";

#[derive(Clone)]
pub struct GoogleGeolocationParams {
    pub api_key: String,
    pub url: String,
}

impl GoogleGeolocationParams {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            url: std::env::var(GOOGLE_GEOLOCATION_URL_ENV_VAR)
                .unwrap_or_else(|_| GOOGLE_GEOLOCATION_URL.to_string()),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeolocateRequestBody {
    consider_ip: bool,
}

/// Locates the host from its network (IP based) through the Geolocation API.
pub struct GoogleGeolocation {
    params: GoogleGeolocationParams,
    client: reqwest::Client,
}

impl GoogleGeolocation {
    pub fn new(params: GoogleGeolocationParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub async fn geolocate(&self) -> Result<GeoPoint, GoogleMapsError> {
        let response = self
            .client
            .post(&self.params.url)
            .query(&[("key", &self.params.api_key)])
            .json(&GeolocateRequestBody { consider_ip: true })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<GeolocateErrorResponse>(&body)
                .map(|error| error.error.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
            return Err(GoogleMapsError::Api { status, message });
        }

        let located: GeolocateResponse = response.json().await?;
        debug!(
            "GoogleGeolocation: located within {:?} m",
            located.accuracy
        );

        located.location.try_into()
    }
}

impl GeolocationSource for GoogleGeolocation {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        self.geolocate().await.map_err(geolocation_error)
    }
}

fn geolocation_error(error: GoogleMapsError) -> GeolocationError {
    match error {
        GoogleMapsError::Api { status: 404, .. } => GeolocationError::Unavailable,
        GoogleMapsError::Api { status: 403, .. } => GeolocationError::PermissionDenied,
        other => GeolocationError::Failed(other.to_string()),
    }
}
