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

//! Minimal GeoJSON model for the two feeds.
//!
//! Only the parts of RFC 7946 that the earthquake and plate boundary feeds use
//! are modelled: a `FeatureCollection` of features, each carrying a geometry
//! and a typed property bag. Geometry coordinates are kept as raw JSON and
//! decoded on demand, so an unexpected geometry degrades to "no shape" rather
//! than failing the whole collection.

use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// A position in degrees with an optional third element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
    /// Third position element. The USGS feed stores depth in km here.
    pub elevation: Option<f64>,
}

impl Coordinate {
    /// Build a coordinate from a GeoJSON position array (`[lon, lat, z?]`).
    #[must_use]
    pub fn from_position(values: &[f64]) -> Option<Self> {
        match values {
            [longitude, latitude] => Some(Self {
                longitude: *longitude,
                latitude: *latitude,
                elevation: None,
            }),
            [longitude, latitude, elevation, ..] => Some(Self {
                longitude: *longitude,
                latitude: *latitude,
                elevation: Some(*elevation),
            }),
            _ => None,
        }
    }
}

/// GeoJSON geometry type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    #[serde(other)]
    Other,
}

/// A geometry object with its coordinates left undecoded.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryKind,

    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// The position of a `Point` geometry.
    ///
    /// Returns `None` for any other geometry type or for coordinates that are
    /// not a numeric array of at least two elements.
    #[must_use]
    pub fn point(&self) -> Option<Coordinate> {
        if self.kind != GeometryKind::Point {
            return None;
        }
        let values: Vec<f64> = decode(&self.coordinates)?;
        Coordinate::from_position(&values)
    }

    /// Every line of the geometry, flattened.
    ///
    /// Line strings yield one line, multi line strings one per member, and
    /// polygons one per ring. Point geometries and unknown types yield nothing.
    #[must_use]
    pub fn polylines(&self) -> Vec<Vec<Coordinate>> {
        let lines = match self.kind {
            GeometryKind::LineString => {
                decode::<Vec<Vec<f64>>>(&self.coordinates).map(|line| vec![to_line(&line)])
            }
            GeometryKind::MultiLineString | GeometryKind::Polygon => {
                decode::<Vec<Vec<Vec<f64>>>>(&self.coordinates)
                    .map(|lines| lines.iter().map(|line| to_line(line)).collect())
            }
            GeometryKind::MultiPolygon => decode::<Vec<Vec<Vec<Vec<f64>>>>>(&self.coordinates)
                .map(|polygons| polygons.iter().flatten().map(|ring| to_line(ring)).collect()),
            _ => None,
        };
        lines.unwrap_or_default()
    }
}

fn to_line(positions: &[Vec<f64>]) -> Vec<Coordinate> {
    positions
        .iter()
        .filter_map(|position| Coordinate::from_position(position))
        .collect()
}

fn decode<T: DeserializeOwned>(value: &Value) -> Option<T> {
    match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            debug!("Ignoring undecodable coordinates: {}", e);
            None
        }
    }
}

/// A single GeoJSON feature with typed properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub struct Feature<P> {
    #[serde(default)]
    pub geometry: Option<Geometry>,

    /// `null` and missing property objects both decode to `None`.
    #[serde(default)]
    pub properties: Option<P>,
}

/// A GeoJSON `FeatureCollection`.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub struct FeatureCollection<P> {
    pub features: Vec<Feature<P>>,
}

impl<P: DeserializeOwned> FeatureCollection<P> {
    /// Decode a collection from a JSON payload.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
