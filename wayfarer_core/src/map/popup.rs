use jiff::{Timestamp, Zoned};

use crate::geo_point::GeoPoint;

/// Info window anchored on the selected marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub position: GeoPoint,
    pub added_at: Timestamp,
}

impl Popup {
    pub const TITLE: &'static str = "Location added";

    pub fn added_at_label(&self, now: &Zoned) -> String {
        format!("Added at {}", format_relative(self.added_at, now))
    }
}

/// Describes `timestamp` in words relative to `now`, e.g. "yesterday at 9:15 AM".
pub fn format_relative(timestamp: Timestamp, now: &Zoned) -> String {
    let then = timestamp.to_zoned(now.time_zone().clone());
    let days = now
        .date()
        .until(then.date())
        .map(|span| span.get_days())
        .unwrap_or(i32::MAX);
    let time = then.strftime("%-I:%M %p");

    match days {
        -6..=-2 => format!("last {} at {}", then.strftime("%A"), time),
        -1 => format!("yesterday at {}", time),
        0 => format!("today at {}", time),
        1 => format!("tomorrow at {}", time),
        2..=6 => format!("{} at {}", then.strftime("%A"), time),
        _ => then.strftime("%m/%d/%Y").to_string(),
    }
}
