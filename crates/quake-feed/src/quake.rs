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

//! Earthquake events from the USGS GeoJSON summary feeds.

use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use serde::Deserialize;

use crate::geojson::{Coordinate, Feature, FeatureCollection};
use crate::style::MarkerStyle;

/// Properties of a USGS feed feature. Only the fields used here are decoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuakeProperties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Origin time in milliseconds since the Unix epoch.
    pub time: Option<i64>,
    /// USGS event page.
    pub url: Option<String>,
    pub title: Option<String>,
}

/// One earthquake event.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub magnitude: Option<f64>,
    /// Hypocenter depth in km (third geometry coordinate), if the feed gave one.
    pub depth_km: Option<f64>,
    pub place: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub time: Option<DateTime<Utc>>,
    pub url: Option<String>,
    pub title: Option<String>,
}

impl Earthquake {
    /// Build an event from a feed feature.
    ///
    /// Returns `None` unless the geometry is a point. A point without a third
    /// coordinate yields an event of unknown depth.
    #[must_use]
    pub fn from_feature(feature: &Feature<QuakeProperties>) -> Option<Self> {
        let Coordinate {
            longitude,
            latitude,
            elevation,
        } = feature.geometry.as_ref()?.point()?;
        let properties = feature.properties.clone().unwrap_or_default();

        Some(Self {
            magnitude: properties.mag,
            depth_km: elevation,
            place: properties.place,
            latitude,
            longitude,
            time: properties
                .time
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
            url: properties.url,
            title: properties.title,
        })
    }

    /// Popup text for this event. Values are inserted as-is, without escaping.
    #[must_use]
    pub fn popup_text(&self) -> String {
        let magnitude = self
            .magnitude
            .map_or_else(|| "unknown".to_string(), |mag| mag.to_string());
        let depth = self
            .depth_km
            .map_or_else(|| "unknown".to_string(), |depth| depth.to_string());
        let place = self.place.as_deref().unwrap_or("unknown");

        format!("Magnitude: {magnitude}\nDepth: {depth}\nLocation: {place}")
    }

    #[must_use]
    pub fn style(&self) -> MarkerStyle {
        // Unknown depth compares false against every threshold: shallowest band
        MarkerStyle::for_event(
            self.magnitude.unwrap_or(0.0),
            self.depth_km.unwrap_or(f64::NAN),
        )
    }
}

/// A rendered earthquake: event, style and popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeMarker {
    pub event: Earthquake,
    pub style: MarkerStyle,
    pub popup: String,
}

impl From<Earthquake> for QuakeMarker {
    fn from(event: Earthquake) -> Self {
        Self {
            style: event.style(),
            popup: event.popup_text(),
            event,
        }
    }
}

/// Convert every feature of a feed into a marker.
///
/// Features without a point geometry are skipped.
#[must_use]
pub fn markers_from_collection(collection: &FeatureCollection<QuakeProperties>) -> Vec<QuakeMarker> {
    let mut skipped = 0usize;
    let markers: Vec<QuakeMarker> = collection
        .features
        .iter()
        .filter_map(|feature| {
            let event = Earthquake::from_feature(feature);
            if event.is_none() {
                skipped += 1;
            }
            event
        })
        .map(QuakeMarker::from)
        .collect();

    if skipped > 0 {
        warn!("Skipped {} earthquake features without a point geometry", skipped);
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(features: &str) -> FeatureCollection<QuakeProperties> {
        let json = format!(r#"{{"type":"FeatureCollection","features":[{features}]}}"#);
        FeatureCollection::from_slice(json.as_bytes()).unwrap()
    }

    #[test]
    fn test_reference_event() {
        let collection = feed(
            r#"{"type":"Feature",
                "properties":{"mag":4.2,"place":"10km N of Test","time":1700000000000},
                "geometry":{"type":"Point","coordinates":[-118.0,34.0,35]}}"#,
        );

        let markers = markers_from_collection(&collection);
        assert_eq!(markers.len(), 1);

        let marker = &markers[0];
        assert_eq!(marker.style.fill.css(), "#fcad03");
        assert_eq!(marker.style.radius, 21.0);
        assert!(marker.popup.contains("4.2"));
        assert!(marker.popup.contains("10km N of Test"));
        assert_eq!(marker.event.latitude, 34.0);
        assert_eq!(marker.event.longitude, -118.0);
        assert_eq!(
            marker.event.time.map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_popup_is_not_escaped() {
        let collection = feed(
            r#"{"type":"Feature",
                "properties":{"mag":1.1,"place":"<b>Somewhere</b> & co"},
                "geometry":{"type":"Point","coordinates":[0,0,3]}}"#,
        );

        let markers = markers_from_collection(&collection);
        assert_eq!(
            markers[0].popup,
            "Magnitude: 1.1\nDepth: 3\nLocation: <b>Somewhere</b> & co"
        );
    }

    #[test]
    fn test_missing_magnitude_uses_floor() {
        let collection = feed(
            r#"{"type":"Feature",
                "properties":{"mag":null,"place":null},
                "geometry":{"type":"Point","coordinates":[0,0,95.5]}}"#,
        );

        let marker = &markers_from_collection(&collection)[0];
        assert_eq!(marker.style.radius, 1.0);
        assert_eq!(marker.style.fill.css(), "red");
        assert_eq!(
            marker.popup,
            "Magnitude: unknown\nDepth: 95.5\nLocation: unknown"
        );
    }

    #[test]
    fn test_point_without_depth_is_shallow() {
        let collection = feed(
            r#"{"type":"Feature","properties":{"mag":2.0,"place":"Flat"},
                "geometry":{"type":"Point","coordinates":[1,2]}},
               {"type":"Feature","properties":{"mag":2.0},
                "geometry":{"type":"Point","coordinates":[1,2,5]}}"#,
        );

        let markers = markers_from_collection(&collection);
        assert_eq!(markers.len(), 2);

        let flat = &markers[0];
        assert_eq!(flat.event.depth_km, None);
        assert_eq!(flat.style.fill.css(), "green");
        assert_eq!(flat.style.radius, 10.0);
        assert_eq!(flat.popup, "Magnitude: 2\nDepth: unknown\nLocation: Flat");
        assert_eq!(markers[1].event.depth_km, Some(5.0));
    }

    #[test]
    fn test_features_without_point_are_skipped() {
        let collection = feed(
            r#"{"type":"Feature","properties":{"mag":2.0},"geometry":null},
               {"type":"Feature","properties":{"mag":2.0},
                "geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}},
               {"type":"Feature","properties":{"mag":2.0},
                "geometry":{"type":"Point","coordinates":[1,1,12]}}"#,
        );

        assert_eq!(markers_from_collection(&collection).len(), 1);
    }

    #[test]
    fn test_every_feature_becomes_a_marker() {
        let features: Vec<String> = (0..25)
            .map(|i| {
                format!(
                    r#"{{"type":"Feature","properties":{{"mag":{}.5,"place":"p{i}"}},
                        "geometry":{{"type":"Point","coordinates":[{i},{i},{}]}}}}"#,
                    i % 7,
                    i * 4
                )
            })
            .collect();
        let collection = feed(&features.join(","));

        assert_eq!(markers_from_collection(&collection).len(), 25);
    }
}
