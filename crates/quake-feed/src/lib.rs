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

//! Earthquake and tectonic plate overlay data.
//!
//! This library fetches the two GeoJSON feeds behind the map overlays and
//! turns them into styled, render-ready features. It has no GUI dependency;
//! the application only draws what it finds here.
//!
//! - **GeoJSON layer**: serde model of a `FeatureCollection` ([`geojson`])
//! - **Styling layer**: depth colors, magnitude radii and the depth legend ([`style`])
//! - **Feature layer**: earthquake markers with popups ([`quake`]) and plate
//!   boundary lines ([`plates`])
//! - **Fetch layer**: feed endpoints and async retrieval ([`feed`])
//! - **Overlay layer**: write-once layer containers ([`overlay`])
//!
//! # Quick Start
//!
//! ```no_run
//! use quake_feed::{FeedConfig, Overlays};
//!
//! #[tokio::main]
//! async fn main() {
//!     let overlays = Overlays::spawn(
//!         &tokio::runtime::Handle::current(),
//!         &FeedConfig::default(),
//!         || println!("an overlay finished loading"),
//!     );
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     println!(
//!         "{} plate boundaries, {} earthquakes",
//!         overlays.plates.len(),
//!         overlays.earthquakes.len()
//!     );
//! }
//! ```

pub mod feed;
pub mod geojson;
pub mod overlay;
pub mod plates;
pub mod quake;
pub mod style;

use std::sync::Arc;

use log::{error, info, warn};
use tokio::runtime::Handle;

pub use feed::{
    fetch_earthquakes, fetch_plate_boundaries, FeedError, FeedMagnitude, FeedPeriod, UsgsFeed,
    PLATE_BOUNDARIES_URL,
};
pub use overlay::{AlreadyPopulated, OverlayLayer, OverlayState};
pub use plates::PlateBoundary;
pub use quake::{Earthquake, QuakeMarker};
pub use style::{DepthBand, Legend, LegendEntry, MarkerStyle, PLATE_BOUNDARY_STYLE};

/// Display name of the plate boundary overlay.
pub const TECTONIC_PLATES: &str = "Tectonic Plates";

/// Display name of the earthquake overlay.
pub const EARTHQUAKE_DATA: &str = "Earthquake Data";

/// Where the two overlays are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub plates_url: String,
    pub earthquakes_url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            plates_url: PLATE_BOUNDARIES_URL.to_string(),
            earthquakes_url: UsgsFeed::default().url(),
        }
    }
}

/// The two overlay layers of the map.
#[derive(Debug, Clone)]
pub struct Overlays {
    pub plates: OverlayLayer<PlateBoundary>,
    pub earthquakes: OverlayLayer<QuakeMarker>,
}

impl Default for Overlays {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlays {
    /// Two empty, pending overlays.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plates: OverlayLayer::new(TECTONIC_PLATES),
            earthquakes: OverlayLayer::new(EARTHQUAKE_DATA),
        }
    }

    /// Start both fetches on the given runtime and return the pending layers.
    ///
    /// The fetches run independently and may settle in either order, or
    /// never. Each one populates only its own layer and then calls `notify`.
    pub fn spawn<F>(handle: &Handle, config: &FeedConfig, notify: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let overlays = Self::new();
        let notify: Arc<dyn Fn() + Send + Sync> = Arc::new(notify);

        let client = match feed::http_client() {
            Ok(client) => client,
            Err(e) => {
                error!("Cannot fetch overlays: {}", e);
                let message = e.to_string();
                settle(&overlays.plates, Err(FeedError::Client(message.clone())));
                settle(&overlays.earthquakes, Err(FeedError::Client(message)));
                notify();
                return overlays;
            }
        };

        info!("Fetching {} from {}", TECTONIC_PLATES, config.plates_url);
        let layer = overlays.plates.clone();
        let url = config.plates_url.clone();
        let task_client = client.clone();
        let task_notify = Arc::clone(&notify);
        handle.spawn(async move {
            let result = fetch_plate_boundaries(&task_client, &url).await;
            settle(&layer, result);
            task_notify();
        });

        info!("Fetching {} from {}", EARTHQUAKE_DATA, config.earthquakes_url);
        let layer = overlays.earthquakes.clone();
        let url = config.earthquakes_url.clone();
        handle.spawn(async move {
            let result = fetch_earthquakes(&client, &url).await;
            settle(&layer, result);
            notify();
        });

        overlays
    }
}

fn settle<T>(layer: &OverlayLayer<T>, result: Result<Vec<T>, FeedError>) {
    match &result {
        Ok(items) => info!("{} ready with {} features", layer.name(), items.len()),
        Err(e) => error!("{} unavailable: {}", layer.name(), e),
    }

    if let Err(e) = layer.populate(result) {
        warn!("{}", e);
    }
}
