use std::{fs::File, io::BufReader, path::Path, sync::Arc, time::Duration};

use anyhow::Context;
use wayfarer_core::MapOptions;
use wayfarer_google::{GoogleMapsClientParams, google_maps_api::GOOGLE_MAPS_BASE_URL};

pub struct Config {
    /// `None` without a mapping credential; the map then never loads.
    pub maps: Option<GoogleMapsClientParams>,
    pub options: MapOptions,
}

impl Config {
    pub fn load(
        refresh_interval: Duration,
        styles: Option<&Path>,
        language: Option<String>,
    ) -> anyhow::Result<Self> {
        dotenvy::from_filename("./.env.local").ok();
        dotenvy::dotenv().ok();

        let maps = GoogleMapsClientParams::from_env().map(|params| GoogleMapsClientParams {
            language: language.clone(),
            ..params
        });

        let styles = styles.map(read_styles).transpose()?.map(Arc::new);

        Ok(Self {
            maps,
            options: MapOptions {
                refresh_interval,
                styles,
                ..MapOptions::default()
            },
        })
    }

    /// Client params for services; an unconfigured client is never called while loading.
    pub fn maps_params(&self) -> GoogleMapsClientParams {
        self.maps.clone().unwrap_or_else(|| GoogleMapsClientParams {
            api_key: String::new(),
            base_url: GOOGLE_MAPS_BASE_URL.to_string(),
            language: None,
        })
    }
}

fn read_styles(path: &Path) -> anyhow::Result<serde_json::Value> {
    let file = File::open(path).with_context(|| format!("Opening styles {}", path.display()))?;
    let styles: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Parsing styles {}", path.display()))?;

    if !styles.is_array() {
        anyhow::bail!("Map styles in {} must be a JSON array", path.display());
    }

    Ok(styles)
}
