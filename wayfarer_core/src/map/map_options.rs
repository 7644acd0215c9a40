use std::{sync::Arc, time::Duration};

use crate::{
    geo_point::{FALLBACK_POSITION, GeoPoint},
    position::position_tracker::DEFAULT_REFRESH_INTERVAL,
    search_bar::DEFAULT_SEARCH_RADIUS_METERS,
};

#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Zoom used when the map first appears
    pub default_zoom: f64,
    /// Zoom applied when recentering on a searched place
    pub recenter_zoom: f64,
    pub refresh_interval: Duration,
    pub search_radius_meters: f64,
    pub fallback_position: GeoPoint,
    /// Style rules handed to the map surface as-is
    pub styles: Option<Arc<serde_json::Value>>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            default_zoom: 10.0,
            recenter_zoom: 14.0,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            search_radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
            fallback_position: FALLBACK_POSITION,
            styles: None,
        }
    }
}
