use wayfarer_core::{
    errors::GeolocationError,
    geo_point::GeoPoint,
    position::fixed_location::{FixedLocation, NoGeolocation},
    services::geolocation::GeolocationSource,
};
use wayfarer_google::GoogleGeolocation;

/// The location capability picked from the command line.
pub enum DeviceLocation {
    Fixed(FixedLocation),
    Network(GoogleGeolocation),
    Absent(NoGeolocation),
}

impl GeolocationSource for DeviceLocation {
    async fn current_position(&self) -> Result<GeoPoint, GeolocationError> {
        match self {
            DeviceLocation::Fixed(source) => source.current_position().await,
            DeviceLocation::Network(source) => source.current_position().await,
            DeviceLocation::Absent(source) => source.current_position().await,
        }
    }
}

impl std::fmt::Display for DeviceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceLocation::Fixed(FixedLocation(point)) => write!(f, "fixed at {point}"),
            DeviceLocation::Network(_) => write!(f, "network geolocation"),
            DeviceLocation::Absent(_) => write!(f, "no geolocation"),
        }
    }
}
