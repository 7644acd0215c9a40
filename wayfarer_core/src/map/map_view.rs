use std::sync::Arc;

use serde::Serialize;

use crate::{
    geo_point::{GeoPoint, TimestampedPoint},
    markers::marker::Marker,
    services::routing::Route,
};

use super::popup::Popup;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: f64,
}

/// Everything a map surface needs to draw the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MapScene {
    pub viewport: Viewport,
    pub styles: Option<Arc<serde_json::Value>>,
    pub markers: Vec<Marker>,
    pub user_marker: Option<TimestampedPoint>,
    pub route: Option<Route>,
    pub popup: Option<Popup>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapView {
    /// Placeholder shown until the map surface and the initial center are both ready.
    Loading,
    Ready(MapScene),
}

impl MapView {
    pub fn scene(&self) -> Option<&MapScene> {
        match self {
            MapView::Loading => None,
            MapView::Ready(scene) => Some(scene),
        }
    }
}
