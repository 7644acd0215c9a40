use std::sync::Arc;

use jiff::Zoned;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use wayfarer_core::{
    MapController,
    services::places::{PlaceSelection, PlaceSuggestion},
};
use wayfarer_google::GoogleMapsClient;

use crate::{
    commands::{Command, HELP},
    device_location::DeviceLocation,
    render::{render_suggestions, render_view},
};

pub type Controller = MapController<DeviceLocation, GoogleMapsClient>;

enum Event {
    Line(std::io::Result<Option<String>>),
    Changed,
}

/// Reads commands from stdin until `quit` or end of input.
///
/// The view is printed again whenever the session reports a change, including
/// routes and direction failures that arrive after their command returned.
pub async fn run(controller: Arc<Controller>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut revisions = controller.subscribe();
    let mut suggestions: Vec<PlaceSuggestion> = Vec::new();

    revisions.mark_unchanged();
    println!("{}", render_view(&controller.view(), &Zoned::now()));

    loop {
        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line),
            Ok(()) = revisions.changed() => Event::Changed,
        };

        let line = match event {
            Event::Changed => {
                revisions.mark_unchanged();
                println!("{}", render_view(&controller.view(), &Zoned::now()));
                continue;
            }
            Event::Line(line) => match line? {
                Some(line) => line,
                None => break,
            },
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        handle(&controller, command, &mut suggestions).await;
    }

    Ok(())
}

async fn handle(controller: &Controller, command: Command, suggestions: &mut Vec<PlaceSuggestion>) {
    if !matches!(command, Command::Help | Command::Show) && !controller.is_ready() {
        println!("Loading...");
        return;
    }

    match command {
        Command::Click(point) => {
            if let Some(marker) = controller.click_map(point) {
                println!("Marker {} added at {}", marker.id(), marker.point());
            }
        }
        Command::Marker(id) => match controller.click_marker(id) {
            // The route task keeps running; its result shows up in the next render.
            Some(_) => println!("Marker {id} selected, getting directions..."),
            None => println!("No marker {id}"),
        },
        Command::Me => match controller.click_user_marker() {
            Some(position) => println!("You are at {}", position.point()),
            None => println!("Your position is not known yet"),
        },
        Command::Close => controller.dismiss_popup(),
        Command::Search(input) => {
            *suggestions = controller.suggest_places(&input).await;
            println!("{}", render_suggestions(suggestions));
        }
        Command::Pick(index) => {
            let Some(suggestion) = suggestions.get(index).cloned() else {
                println!("No suggestion {index}");
                return;
            };
            let selection = PlaceSelection::from(suggestion);
            match controller.select_place(&selection).await {
                Some(center) => info!("Recentered on {} at {}", selection.address, center),
                None => println!("Could not find {}", selection.address),
            }
        }
        Command::Show => println!("{}", render_view(&controller.view(), &Zoned::now())),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
}
