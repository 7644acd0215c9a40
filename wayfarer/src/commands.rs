use wayfarer_core::{geo_point::GeoPoint, markers::marker::MarkerId};

use crate::parsers::parse_point;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Drop a marker where the map was clicked
    Click(GeoPoint),
    /// Select a marker and ask for directions to it
    Marker(MarkerId),
    /// Select the user's own position
    Me,
    /// Close the popup
    Close,
    Search(String),
    /// Pick one of the last search suggestions
    Pick(usize),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
click <lat> <lng>   drop a marker
marker <id>         select a marker and get directions to it
me                  select your own position
close               close the popup
search <text>       search for a place
pick <n>            recenter on suggestion n
show                render the map
help                show this help
quit                leave";

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "click" => parse_point(rest).map(Command::Click),
            "marker" => rest
                .parse::<usize>()
                .map(|id| Command::Marker(MarkerId::new(id)))
                .map_err(|_| format!("Invalid marker id {rest:?}")),
            "me" => Ok(Command::Me),
            "close" => Ok(Command::Close),
            "search" if !rest.is_empty() => Ok(Command::Search(rest.to_string())),
            "search" => Err(String::from("Nothing to search for")),
            "pick" => rest
                .parse::<usize>()
                .map(Command::Pick)
                .map_err(|_| format!("Invalid suggestion number {rest:?}")),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command {other:?}, try \"help\"")),
        }
    }
}
