use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use mimalloc::MiMalloc;
use tracing::{error, info};
use wayfarer_core::{
    MapController,
    geo_point::GeoPoint,
    position::fixed_location::{FixedLocation, NoGeolocation},
};
use wayfarer_google::{GoogleGeolocation, GoogleGeolocationParams, GoogleMapsClient};

use crate::{config::Config, device_location::DeviceLocation};

mod commands;
mod config;
mod device_location;
mod parsers;
mod render;
mod session;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    debug: bool,

    /// How often the device position is refreshed (e.g. "3", "3s", "PT5S")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "3s")]
    refresh_interval: Duration,

    /// Emulate the device position instead of asking the network ("lat,lng")
    #[arg(short, long, value_parser = parsers::parse_point, conflicts_with = "no_geolocation")]
    position: Option<GeoPoint>,

    /// Behave as a device without location capability
    #[arg(long)]
    no_geolocation: bool,

    /// JSON file with map style rules
    #[arg(short, long)]
    styles: Option<PathBuf>,

    /// Language of returned addresses
    #[arg(short, long)]
    language: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = Config::load(cli.refresh_interval, cli.styles.as_deref(), cli.language)?;

    let location = match (cli.position, cli.no_geolocation, &config.maps) {
        (Some(point), _, _) => DeviceLocation::Fixed(FixedLocation(point)),
        (None, false, Some(maps)) => DeviceLocation::Network(GoogleGeolocation::new(
            GoogleGeolocationParams::new(maps.api_key.clone()),
        )),
        _ => DeviceLocation::Absent(NoGeolocation),
    };
    info!("Device location: {}", location);

    let maps = GoogleMapsClient::new(config.maps_params());
    let controller = Arc::new(MapController::new(
        config.options.clone(),
        Arc::new(location),
        Arc::new(maps),
    ));

    controller.start().await;
    if config.maps.is_some() {
        controller.map_loaded();
    } else {
        error!("GOOGLE_MAPS_API_KEY is not set, the map cannot load");
    }

    let result = session::run(Arc::clone(&controller)).await;
    controller.shutdown().await;

    result
}
