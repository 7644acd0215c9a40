use thiserror::Error;
use wayfarer_core::errors::{InvalidCoordinates, ServiceError};

#[derive(Debug, Error)]
pub enum GoogleMapsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Request not served: {status} - {message}")]
    Status { status: String, message: String },

    #[error("No results")]
    NoResults,

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Invalid coordinates in response: {0}")]
    InvalidCoordinates(#[from] InvalidCoordinates),
}

impl From<GoogleMapsError> for ServiceError {
    fn from(error: GoogleMapsError) -> Self {
        match error {
            GoogleMapsError::Request(err) => ServiceError::Transport(err.to_string()),
            GoogleMapsError::Api { status, message } => ServiceError::Rejected {
                status: status.to_string(),
                message,
            },
            GoogleMapsError::Status { status, message } => {
                ServiceError::Rejected { status, message }
            }
            GoogleMapsError::NoResults => ServiceError::NotFound,
            GoogleMapsError::Deserialize(err) => ServiceError::InvalidResponse(err.to_string()),
            GoogleMapsError::InvalidCoordinates(err) => {
                ServiceError::InvalidResponse(err.to_string())
            }
        }
    }
}
