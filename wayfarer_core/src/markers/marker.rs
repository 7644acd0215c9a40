use jiff::Timestamp;
use serde::Serialize;

use crate::{define_index_newtype, geo_point::GeoPoint};

define_index_newtype!(MarkerId, Marker);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    id: MarkerId,
    point: GeoPoint,
    created_at: Timestamp,
}

impl Marker {
    pub(crate) fn new(id: MarkerId, point: GeoPoint, created_at: Timestamp) -> Self {
        Self {
            id,
            point,
            created_at,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
