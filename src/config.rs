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

//! Application configuration management.
//!
//! Preferences are stored in TOML via confy: the initial view, the basemap
//! selected at startup, initial overlay visibility and the feed endpoints.

use log::warn;
use quake_feed::{FeedConfig, UsgsFeed, PLATE_BOUNDARIES_URL};
use serde::{Deserialize, Serialize};

use crate::map::Basemap;

/// confy application name (also the config directory name)
pub const APP_NAME: &str = "quakemap";

/// Initial map center (central California)
pub const DEFAULT_CENTER: (f64, f64) = (36.7783, -119.4179);

/// Web Mercator cannot show the poles; the view center is kept inside this
pub const MAX_CENTER_LATITUDE: f64 = 85.0;

/// Application configuration stored in TOML format
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Configuration schema version for migrations
    #[serde(default = "default_config_version")]
    pub config_version: u32,

    /// Initial map center latitude
    #[serde(default = "default_center_latitude")]
    pub center_latitude: f64,

    /// Initial map center longitude
    #[serde(default = "default_center_longitude")]
    pub center_longitude: f64,

    /// Initial zoom level, clamped to the basemap's zoom range
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,

    /// Basemap selected at startup: "GrayScale", "WaterColor", "Topography" or "Default"
    #[serde(default = "default_basemap")]
    pub default_basemap: String,

    /// Show tectonic plate boundaries on startup
    #[serde(default = "default_true")]
    pub show_tectonic_plates: bool,

    /// Show earthquakes on startup
    #[serde(default = "default_true")]
    pub show_earthquakes: bool,

    /// PB2002 plate boundary GeoJSON
    #[serde(default = "default_plates_url")]
    pub plates_url: String,

    /// Full earthquake feed URL; takes precedence over `earthquake_feed`
    #[serde(default)]
    pub earthquake_url: Option<String>,

    /// USGS summary feed selection
    #[serde(default)]
    pub earthquake_feed: UsgsFeed,
}

// Default value functions for serde
fn default_config_version() -> u32 {
    1
}

fn default_center_latitude() -> f64 {
    DEFAULT_CENTER.0
}

fn default_center_longitude() -> f64 {
    DEFAULT_CENTER.1
}

fn default_zoom() -> f64 {
    5.0
}

fn default_basemap() -> String {
    "Default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_plates_url() -> String {
    PLATE_BOUNDARIES_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_version: default_config_version(),
            center_latitude: default_center_latitude(),
            center_longitude: default_center_longitude(),
            default_zoom: default_zoom(),
            default_basemap: default_basemap(),
            show_tectonic_plates: true,
            show_earthquakes: true,
            plates_url: default_plates_url(),
            earthquake_url: None,
            earthquake_feed: UsgsFeed::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from disk, creating it with defaults on first run
    pub fn load() -> Result<Self, confy::ConfyError> {
        let config: AppConfig = confy::load(APP_NAME, "config")?;
        Ok(config.sanitized())
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, "config", self)
    }

    /// Get the config file path for display to user
    pub fn get_config_path() -> Result<std::path::PathBuf, confy::ConfyError> {
        confy::get_configuration_file_path(APP_NAME, "config")
    }

    /// Clamp hand-edited values into ranges the map can display
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        if !self.center_latitude.is_finite() || !self.center_longitude.is_finite() {
            warn!("Ignoring non-finite map center, using default");
            (self.center_latitude, self.center_longitude) = DEFAULT_CENTER;
        }
        self.center_latitude = self
            .center_latitude
            .clamp(-MAX_CENTER_LATITUDE, MAX_CENTER_LATITUDE);
        self.center_longitude = self.center_longitude.clamp(-180.0, 180.0);

        if !self.default_zoom.is_finite() {
            self.default_zoom = default_zoom();
        }
        self
    }

    /// Basemap selected at startup; unknown names fall back to "Default"
    #[must_use]
    pub fn basemap(&self) -> &'static Basemap {
        Basemap::by_name(&self.default_basemap).unwrap_or_else(|| {
            warn!(
                "Unknown basemap '{}', falling back to {}",
                self.default_basemap,
                Basemap::fallback().name
            );
            Basemap::fallback()
        })
    }

    /// Earthquake feed URL: explicit override or the selected USGS feed
    #[must_use]
    pub fn earthquakes_url(&self) -> String {
        self.earthquake_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.earthquake_feed.url())
    }

    #[must_use]
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            plates_url: self.plates_url.clone(),
            earthquakes_url: self.earthquakes_url(),
        }
    }
}
