// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod app;
mod config;
mod map;
mod ui;

use clap::Parser;
use log::{info, warn};
use quake_feed::{FeedMagnitude, FeedPeriod};

use app::QuakeMapApp;
use config::AppConfig;

/// Earthquakes of the past week over tectonic plate boundaries
#[derive(Parser, Debug)]
#[command(name = "quakemap", version, about)]
struct Args {
    /// Basemap shown at startup (GrayScale, WaterColor, Topography, Default)
    #[arg(long)]
    basemap: Option<String>,

    /// USGS feed time window (hour, day, week, month)
    #[arg(long)]
    feed_period: Option<FeedPeriod>,

    /// USGS feed magnitude class (all, 1.0, 2.5, 4.5, significant)
    #[arg(long)]
    feed_magnitude: Option<FeedMagnitude>,

    /// Overwrite the config file with defaults before starting
    #[arg(long)]
    reset_config: bool,
}

impl Args {
    /// Apply command line overrides on top of the loaded configuration
    fn apply(&self, config: &mut AppConfig) {
        if let Some(basemap) = &self.basemap {
            config.default_basemap.clone_from(basemap);
        }
        if let Some(period) = self.feed_period {
            config.earthquake_feed.period = period;
        }
        if let Some(magnitude) = self.feed_magnitude {
            config.earthquake_feed.magnitude = magnitude;
        }
    }
}

fn load_config(reset: bool) -> AppConfig {
    if reset {
        let config = AppConfig::default();
        match config.save() {
            Ok(()) => info!("Configuration reset to defaults"),
            Err(e) => warn!("Failed to write default configuration: {}", e),
        }
        return config;
    }

    match AppConfig::load() {
        Ok(config) => {
            if let Ok(path) = AppConfig::get_config_path() {
                info!("Loaded configuration from {}", path.display());
            }
            config
        }
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting QuakeMap...");
    let mut config = load_config(args.reset_config);
    args.apply(&mut config);

    // Overlay fetches run here while eframe owns the main thread
    let runtime = tokio::runtime::Runtime::new()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_title("QuakeMap"),
        ..Default::default()
    };

    eframe::run_native(
        "QuakeMap",
        options,
        Box::new(move |cc| Ok(Box::new(QuakeMapApp::new(&cc.egui_ctx, &config, &handle)))),
    )?;

    info!("QuakeMap closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let args = Args::parse_from([
            "quakemap",
            "--basemap",
            "Topography",
            "--feed-period",
            "day",
            "--feed-magnitude",
            "2.5",
        ]);
        let mut config = AppConfig::default();
        args.apply(&mut config);

        assert_eq!(config.default_basemap, "Topography");
        assert!(config.earthquakes_url().ends_with("/2.5_day.geojson"));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let args = Args::parse_from(["quakemap"]);
        let mut config = AppConfig::default();
        args.apply(&mut config);
        assert_eq!(config, AppConfig::default());
        assert!(!args.reset_config);
    }

    #[test]
    fn test_invalid_period_rejected() {
        assert!(Args::try_parse_from(["quakemap", "--feed-period", "year"]).is_err());
    }
}
