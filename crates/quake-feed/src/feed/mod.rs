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

//! Feed endpoints and the async fetch layer.
//!
//! Each fetch is a single GET with no retry, timeout or backoff. Every failure
//! (transport, HTTP status, undecodable body) comes back as a [`FeedError`].

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geojson::FeatureCollection;
use crate::plates::{boundaries_from_collection, PlateBoundary, PlateProperties};
use crate::quake::{markers_from_collection, QuakeMarker, QuakeProperties};

pub use reqwest::StatusCode;

/// PB2002 plate boundaries (Bird, 2003) as converted by fraxen/tectonicplates.
pub const PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Base of the USGS real-time summary feeds.
pub const USGS_SUMMARY_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

/// Errors that can occur while fetching a feed.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: StatusCode,
    },

    #[error("malformed GeoJSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Magnitude class of a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeedMagnitude {
    #[default]
    #[serde(rename = "all")]
    All,
    #[serde(rename = "1.0")]
    M1_0,
    #[serde(rename = "2.5")]
    M2_5,
    #[serde(rename = "4.5")]
    M4_5,
    #[serde(rename = "significant")]
    Significant,
}

impl FeedMagnitude {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedMagnitude::All => "all",
            FeedMagnitude::M1_0 => "1.0",
            FeedMagnitude::M2_5 => "2.5",
            FeedMagnitude::M4_5 => "4.5",
            FeedMagnitude::Significant => "significant",
        }
    }
}

impl FromStr for FeedMagnitude {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(FeedMagnitude::All),
            "1.0" | "1" => Ok(FeedMagnitude::M1_0),
            "2.5" => Ok(FeedMagnitude::M2_5),
            "4.5" => Ok(FeedMagnitude::M4_5),
            "significant" => Ok(FeedMagnitude::Significant),
            other => Err(format!(
                "unknown magnitude class '{other}' (expected all, 1.0, 2.5, 4.5 or significant)"
            )),
        }
    }
}

impl fmt::Display for FeedMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time window of a USGS summary feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedPeriod {
    Hour,
    Day,
    #[default]
    Week,
    Month,
}

impl FeedPeriod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FeedPeriod::Hour => "hour",
            FeedPeriod::Day => "day",
            FeedPeriod::Week => "week",
            FeedPeriod::Month => "month",
        }
    }
}

impl FromStr for FeedPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hour" => Ok(FeedPeriod::Hour),
            "day" => Ok(FeedPeriod::Day),
            "week" => Ok(FeedPeriod::Week),
            "month" => Ok(FeedPeriod::Month),
            other => Err(format!(
                "unknown period '{other}' (expected hour, day, week or month)"
            )),
        }
    }
}

impl fmt::Display for FeedPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection of one USGS summary feed. Defaults to all events of the past week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsgsFeed {
    #[serde(default)]
    pub magnitude: FeedMagnitude,
    #[serde(default)]
    pub period: FeedPeriod,
}

impl UsgsFeed {
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{}/{}_{}.geojson",
            USGS_SUMMARY_BASE_URL,
            self.magnitude.as_str(),
            self.period.as_str()
        )
    }
}

/// Build the HTTP client shared by both fetches.
pub fn http_client() -> Result<reqwest::Client, FeedError> {
    reqwest::Client::builder()
        .user_agent(concat!("quake-feed/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FeedError::Client(e.to_string()))
}

/// GET a URL and decode the body as a feature collection.
pub async fn fetch_collection<P: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<FeatureCollection<P>, FeedError> {
    debug!("GET {}", url);

    let response = client.get(url).send().await.map_err(|source| FeedError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response.bytes().await.map_err(|source| FeedError::Http {
        url: url.to_string(),
        source,
    })?;
    debug!("Received {} bytes from {}", bytes.len(), url);

    FeatureCollection::from_slice(&bytes).map_err(|source| FeedError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Fetch the plate boundary collection and convert it to boundaries.
pub async fn fetch_plate_boundaries(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<PlateBoundary>, FeedError> {
    let collection = fetch_collection::<PlateProperties>(client, url).await?;
    let boundaries = boundaries_from_collection(&collection);
    info!("Loaded {} plate boundaries", boundaries.len());
    Ok(boundaries)
}

/// Fetch an earthquake feed and convert it to styled markers.
pub async fn fetch_earthquakes(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<QuakeMarker>, FeedError> {
    let collection = fetch_collection::<QuakeProperties>(client, url).await?;
    let markers = markers_from_collection(&collection);
    info!("Loaded {} earthquakes", markers.len());
    Ok(markers)
}
