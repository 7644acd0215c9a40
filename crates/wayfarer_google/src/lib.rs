pub mod google_geolocation;
pub mod google_maps_api;
pub mod google_maps_error;
mod responses;

pub use google_geolocation::{GoogleGeolocation, GoogleGeolocationParams};
pub use google_maps_api::{GoogleMapsClient, GoogleMapsClientParams};
pub use google_maps_error::GoogleMapsError;
