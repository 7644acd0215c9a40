use std::{fmt::Display, future::Future};

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelMode::Driving => write!(f, "driving"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub mode: TravelMode,
}

/// A route returned by the routing service.
///
/// The typed fields are the subset the session displays; `payload` is the
/// service's own route object, kept untouched for renderers that draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub summary: Option<String>,
    pub start_address: Option<String>,
    pub end_address: Option<String>,
    /// Total over all legs, in meters
    pub distance_meters: Option<f64>,
    pub duration: Option<SignedDuration>,
    pub overview_polyline: Option<String>,
    pub payload: serde_json::Value,
}

pub trait RoutingService: Send + Sync + 'static {
    fn route(
        &self,
        request: &RouteRequest,
    ) -> impl Future<Output = Result<Route, ServiceError>> + Send;
}
