use std::future::Future;

use crate::{errors::GeolocationError, geo_point::GeoPoint};

/// The host device's location capability.
pub trait GeolocationSource: Send + Sync + 'static {
    fn current_position(&self) -> impl Future<Output = Result<GeoPoint, GeolocationError>> + Send;
}
