use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{errors::ServiceError, geo_point::GeoPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub address_components: Vec<AddressComponent>,
    pub location: GeoPoint,
}

impl GeocodeResult {
    /// Long names of the address components, in order, joined with `", "`.
    pub fn component_address(&self) -> String {
        self.address_components
            .iter()
            .map(|component| component.long_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Results are ordered by the service's own ranking; an empty list means nothing matched.
pub trait Geocoder: Send + Sync + 'static {
    fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> impl Future<Output = Result<Vec<GeocodeResult>, ServiceError>> + Send;

    fn geocode_address(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<Vec<GeocodeResult>, ServiceError>> + Send;
}
