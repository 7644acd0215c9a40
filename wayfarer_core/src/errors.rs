use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidCoordinates {
    #[error("Latitude {0} is outside [-90, 90]")]
    Latitude(f64),

    #[error("Longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Permission to read the device location was denied")]
    PermissionDenied,

    #[error("Device location is unavailable")]
    Unavailable,

    #[error("Geolocation failed: {0}")]
    Failed(String),
}

/// Failure of a call into an external mapping service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Service rejected the request: {status} - {message}")]
    Rejected { status: String, message: String },

    #[error("Nothing found")]
    NotFound,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectionsError {
    #[error("No address found for the origin")]
    OriginNotFound,

    #[error("No address found for the destination")]
    DestinationNotFound,

    #[error("Geocoding failed: {0}")]
    Geocode(#[source] ServiceError),

    #[error("Routing failed: {0}")]
    Routing(#[source] ServiceError),
}
