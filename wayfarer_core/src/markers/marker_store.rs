use jiff::Timestamp;

use crate::geo_point::GeoPoint;

use super::marker::{Marker, MarkerId};

/// Markers placed by the user, in click order. Nothing is ever removed.
#[derive(Debug, Default, Clone)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_marker(&mut self, point: GeoPoint) -> Marker {
        self.add_marker_at(point, Timestamp::now())
    }

    /// Timestamps never go backwards, even if the wall clock does.
    pub fn add_marker_at(&mut self, point: GeoPoint, now: Timestamp) -> Marker {
        let created_at = match self.markers.last() {
            Some(last) if last.created_at() > now => last.created_at(),
            _ => now,
        };

        let marker = Marker::new(MarkerId::new(self.markers.len()), point, created_at);
        self.markers.push(marker);
        marker
    }

    pub fn list(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.get())
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
