use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{errors::ServiceError, geo_point::GeoPoint};

/// Weights suggestions towards places within `radius_meters` of `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationBias {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub description: String,
}

/// What the search widget emits when the user picks a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSelection {
    pub address: String,
}

impl From<PlaceSuggestion> for PlaceSelection {
    fn from(suggestion: PlaceSuggestion) -> Self {
        Self {
            address: suggestion.description,
        }
    }
}

pub trait PlaceSearch: Send + Sync + 'static {
    fn autocomplete(
        &self,
        input: &str,
        bias: Option<LocationBias>,
    ) -> impl Future<Output = Result<Vec<PlaceSuggestion>, ServiceError>> + Send;
}
