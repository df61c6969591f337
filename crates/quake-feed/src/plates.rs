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

//! Tectonic plate boundaries from the PB2002 dataset.

use serde::Deserialize;

use crate::geojson::{Coordinate, Feature, FeatureCollection};

/// Properties of a PB2002 boundary feature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlateProperties {
    /// Boundary name, e.g. `"AF-AN"`.
    #[serde(rename = "Name")]
    pub name: Option<String>,

    /// Boundary type code (may be empty in PB2002).
    #[serde(rename = "Type")]
    pub boundary_type: Option<String>,
}

/// One boundary, drawn as zero or more polylines.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundary {
    pub name: Option<String>,
    pub lines: Vec<Vec<Coordinate>>,
}

impl PlateBoundary {
    #[must_use]
    pub fn from_feature(feature: &Feature<PlateProperties>) -> Self {
        Self {
            name: feature.properties.as_ref().and_then(|p| p.name.clone()),
            lines: feature
                .geometry
                .as_ref()
                .map(|geometry| geometry.polylines())
                .unwrap_or_default(),
        }
    }

    /// Total number of vertices across all lines.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

/// One boundary per feature, in feed order.
#[must_use]
pub fn boundaries_from_collection(collection: &FeatureCollection<PlateProperties>) -> Vec<PlateBoundary> {
    collection
        .features
        .iter()
        .map(PlateBoundary::from_feature)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_from_pb2002_shape() {
        let collection = FeatureCollection::<PlateProperties>::from_slice(
            br#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":{"LAYER":"plate boundary","Name":"AF-AN","Source":"Mueller et al. [1987]","PlateA":"AF","PlateB":"AN","Type":""},
                 "geometry":{"type":"LineString","coordinates":[[-0.4379,-54.8518],[-0.038826,-54.6772],[0.443182,-54.4512]]}},
                {"type":"Feature","properties":{"Name":"AN-AF"},
                 "geometry":{"type":"MultiLineString","coordinates":[[[1,1],[2,2]],[[3,3],[4,4],[5,5]]]}},
                {"type":"Feature","properties":null,"geometry":null}
            ]}"#,
        )
        .unwrap();

        let boundaries = boundaries_from_collection(&collection);
        assert_eq!(boundaries.len(), 3);
        assert_eq!(boundaries[0].name.as_deref(), Some("AF-AN"));
        assert_eq!(boundaries[0].vertex_count(), 3);
        assert_eq!(boundaries[1].lines.len(), 2);
        assert_eq!(boundaries[1].vertex_count(), 5);
        assert!(boundaries[2].lines.is_empty());
    }
}
