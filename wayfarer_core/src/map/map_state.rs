use std::sync::Arc;

use tracing::info;

use crate::{
    geo_point::{GeoPoint, TimestampedPoint},
    markers::{
        marker::{Marker, MarkerId},
        marker_store::MarkerStore,
    },
    selection::{Selection, SelectionState},
    services::routing::Route,
};

use super::{
    map_view::{MapScene, MapView, Viewport},
    popup::Popup,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Loading {
        map_loaded: bool,
        initial_center: Option<GeoPoint>,
    },
    Ready {
        viewport: Viewport,
    },
}

/// Synchronous part of the map session: lifecycle, viewport, markers and selection.
///
/// Every interaction is ignored until both the map surface and the initial
/// center are ready.
#[derive(Debug, Clone)]
pub struct MapState {
    phase: Phase,
    default_zoom: f64,
    recenter_zoom: f64,
    markers: MarkerStore,
    selection: SelectionState,
    status: Option<String>,
}

impl MapState {
    pub fn new(default_zoom: f64, recenter_zoom: f64) -> Self {
        Self {
            phase: Phase::Loading {
                map_loaded: false,
                initial_center: None,
            },
            default_zoom,
            recenter_zoom,
            markers: MarkerStore::new(),
            selection: SelectionState::default(),
            status: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready { .. })
    }

    pub fn viewport(&self) -> Option<Viewport> {
        match self.phase {
            Phase::Ready { viewport } => Some(viewport),
            Phase::Loading { .. } => None,
        }
    }

    /// Returns true if this made the map ready.
    pub fn map_loaded(&mut self) -> bool {
        if let Phase::Loading { map_loaded, .. } = &mut self.phase {
            *map_loaded = true;
        }
        self.try_become_ready()
    }

    /// Returns true if this made the map ready. Later calls never move the viewport.
    pub fn initial_center_resolved(&mut self, center: GeoPoint) -> bool {
        if let Phase::Loading { initial_center, .. } = &mut self.phase {
            initial_center.get_or_insert(center);
        }
        self.try_become_ready()
    }

    fn try_become_ready(&mut self) -> bool {
        if let Phase::Loading {
            map_loaded: true,
            initial_center: Some(center),
        } = self.phase
        {
            info!("Map ready, centered on {}", center);
            self.phase = Phase::Ready {
                viewport: Viewport {
                    center,
                    zoom: self.default_zoom,
                },
            };
            return true;
        }
        false
    }

    pub fn click_map(&mut self, point: GeoPoint) -> Option<Marker> {
        if !self.is_ready() {
            return None;
        }
        Some(self.markers.add_marker(point))
    }

    pub fn select_marker(&mut self, id: MarkerId) -> Option<Marker> {
        if !self.is_ready() {
            return None;
        }
        let marker = *self.markers.get(id)?;
        self.selection.select(Selection::Marker(id));
        Some(marker)
    }

    pub fn select_user_position(&mut self, position: TimestampedPoint) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.selection.select(Selection::UserPosition(position));
        true
    }

    pub fn dismiss_popup(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.selection.clear();
        true
    }

    pub fn recenter(&mut self, center: GeoPoint) -> bool {
        match &mut self.phase {
            Phase::Ready { viewport } => {
                viewport.center = center;
                viewport.zoom = self.recenter_zoom;
                true
            }
            Phase::Loading { .. } => false,
        }
    }

    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection.current()
    }

    pub fn set_status(&mut self, status: String) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn view(
        &self,
        user_position: Option<TimestampedPoint>,
        route: Option<Route>,
        styles: Option<Arc<serde_json::Value>>,
    ) -> MapView {
        let Phase::Ready { viewport } = self.phase else {
            return MapView::Loading;
        };

        let popup = self.selection.current().and_then(|selection| match selection {
            Selection::Marker(id) => self.markers.get(id).map(|marker| Popup {
                position: marker.point(),
                added_at: marker.created_at(),
            }),
            Selection::UserPosition(position) => Some(Popup {
                position: position.point(),
                added_at: position.captured_at(),
            }),
        });

        MapView::Ready(MapScene {
            viewport,
            styles,
            markers: self.markers.list().to_vec(),
            user_marker: user_position,
            route,
            popup,
            status: self.status.clone(),
        })
    }
}
