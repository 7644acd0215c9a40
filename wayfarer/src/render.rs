use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use jiff::{SignedDuration, Zoned};
use wayfarer_core::{
    MapScene, MapView,
    map::popup::{Popup, format_relative},
    services::{places::PlaceSuggestion, routing::Route},
};

pub fn render_view(view: &MapView, now: &Zoned) -> String {
    match view {
        MapView::Loading => String::from("Loading..."),
        MapView::Ready(scene) => render_scene(scene, now),
    }
}

fn render_scene(scene: &MapScene, now: &Zoned) -> String {
    let mut lines = vec![format!(
        "Map centered on {} at zoom {}",
        scene.viewport.center, scene.viewport.zoom
    )];

    if let Some(styles) = scene.styles.as_ref().and_then(|styles| styles.as_array()) {
        lines.push(format!("Styled with {} rules", styles.len()));
    }

    if let Some(user) = &scene.user_marker {
        lines.push(format!(
            "You are at {} ({})",
            user.point(),
            format_relative(user.captured_at(), now)
        ));
    }

    if scene.markers.is_empty() {
        lines.push(String::from("No markers yet"));
    } else {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["Marker", "Latitude", "Longitude", "Added"]);

        for marker in &scene.markers {
            table.add_row(vec![
                marker.id().to_string(),
                format!("{:.6}", marker.point().lat()),
                format!("{:.6}", marker.point().lng()),
                format_relative(marker.created_at(), now),
            ]);
        }
        lines.push(table.to_string());
    }

    if let Some(route) = &scene.route {
        lines.push(render_route(route));
    }

    if let Some(popup) = &scene.popup {
        lines.push(render_popup(popup, now));
    }

    if let Some(status) = &scene.status {
        lines.push(format!("! {status}"));
    }

    lines.join("\n")
}

fn render_route(route: &Route) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Route", ""]);

    if let Some(summary) = &route.summary {
        table.add_row(vec!["Via", summary.as_str()]);
    }
    if let Some(start) = &route.start_address {
        table.add_row(vec!["From", start.as_str()]);
    }
    if let Some(end) = &route.end_address {
        table.add_row(vec!["To", end.as_str()]);
    }
    if let Some(distance) = route.distance_meters {
        table.add_row(vec!["Distance".to_string(), format_distance(distance)]);
    }
    if let Some(duration) = route.duration {
        table.add_row(vec!["Duration".to_string(), format_duration(duration)]);
    }

    table.to_string()
}

fn render_popup(popup: &Popup, now: &Zoned) -> String {
    format!(
        "[{}] at {}\n{}",
        Popup::TITLE,
        popup.position,
        popup.added_at_label(now)
    )
}

pub fn render_suggestions(suggestions: &[PlaceSuggestion]) -> String {
    if suggestions.is_empty() {
        return String::from("No places found");
    }

    suggestions
        .iter()
        .enumerate()
        .map(|(i, suggestion)| format!("{i}: {}", suggestion.description))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}

fn format_duration(duration: SignedDuration) -> String {
    let minutes = (duration.as_secs() + 30) / 60;
    if minutes < 60 {
        format!("{minutes} min")
    } else {
        format!("{} h {} min", minutes / 60, minutes % 60)
    }
}
