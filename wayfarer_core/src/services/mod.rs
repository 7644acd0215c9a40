pub mod geocoding;
pub mod geolocation;
pub mod places;
pub mod routing;
