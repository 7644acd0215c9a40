use crate::{geo_point::TimestampedPoint, markers::marker::MarkerId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Marker(MarkerId),
    UserPosition(TimestampedPoint),
}

/// The one target shown in the detail popup. Last write wins.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    current: Option<Selection>,
}

impl SelectionState {
    pub fn select(&mut self, target: Selection) {
        self.current = Some(target);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<Selection> {
        self.current
    }
}
