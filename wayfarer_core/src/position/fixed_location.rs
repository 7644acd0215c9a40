use crate::{errors::GeolocationError, geo_point::GeoPoint, services::geolocation::GeolocationSource};

/// Reports the same position on every call, for emulated devices.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub GeoPoint);

impl GeolocationSource for FixedLocation {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        Ok(self.0)
    }
}

/// A host without a location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

impl GeolocationSource for NoGeolocation {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        Err(GeolocationError::Unavailable)
    }
}
