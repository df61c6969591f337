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

//! Basemap registry and tile sources.
//!
//! Four raster basemaps are available; exactly one is drawn at a time. Each
//! is described by a Leaflet-style URL template using the `{s}`, `{z}`, `{x}`,
//! `{y}`, `{r}` and `{ext}` placeholders.

use std::collections::HashMap;

use walkers::sources::{Attribution, TileSource};
use walkers::{HttpTiles, TileId};

/// Stable identifier of a basemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasemapId {
    GrayScale,
    WaterColor,
    Topography,
    OpenStreetMap,
}

/// Tile layer configuration for one basemap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Basemap {
    pub id: BasemapId,

    /// Name shown in the layer control
    pub name: &'static str,

    pub url_template: &'static str,

    pub attribution: &'static str,
    pub attribution_url: &'static str,

    /// Characters substituted for `{s}`, chosen per tile
    pub subdomains: &'static str,

    pub min_zoom: u8,
    pub max_zoom: u8,

    /// Substituted for `{ext}`
    pub ext: Option<&'static str>,
}

const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

const STAMEN_ATTRIBUTION: &str =
    "Map tiles by Stamen Design, CC BY 3.0. Map data © OpenStreetMap contributors";

/// All basemaps, in layer control order
pub const BASEMAPS: [Basemap; 4] = [
    Basemap {
        id: BasemapId::GrayScale,
        name: "GrayScale",
        url_template: "https://stamen-tiles-{s}.a.ssl.fastly.net/toner-lite/{z}/{x}/{y}{r}.{ext}",
        attribution: STAMEN_ATTRIBUTION,
        attribution_url: "http://stamen.com",
        subdomains: "abcd",
        min_zoom: 0,
        max_zoom: 20,
        ext: Some("png"),
    },
    Basemap {
        id: BasemapId::WaterColor,
        name: "WaterColor",
        url_template: "https://stamen-tiles-{s}.a.ssl.fastly.net/watercolor/{z}/{x}/{y}.{ext}",
        attribution: STAMEN_ATTRIBUTION,
        attribution_url: "http://stamen.com",
        subdomains: "abcd",
        min_zoom: 1,
        max_zoom: 16,
        ext: Some("jpg"),
    },
    Basemap {
        id: BasemapId::Topography,
        name: "Topography",
        url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        attribution: "Map data: © OpenStreetMap contributors, SRTM | Map style: © OpenTopoMap (CC-BY-SA)",
        attribution_url: "https://opentopomap.org",
        subdomains: "abc",
        min_zoom: 0,
        max_zoom: 17,
        ext: None,
    },
    Basemap {
        id: BasemapId::OpenStreetMap,
        name: "Default",
        url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: OSM_ATTRIBUTION,
        attribution_url: "https://www.openstreetmap.org/copyright",
        subdomains: "abc",
        min_zoom: 0,
        max_zoom: 19,
        ext: None,
    },
];

impl Basemap {
    /// Look up a basemap by identifier
    #[must_use]
    pub fn get(id: BasemapId) -> &'static Basemap {
        match id {
            BasemapId::GrayScale => &BASEMAPS[0],
            BasemapId::WaterColor => &BASEMAPS[1],
            BasemapId::Topography => &BASEMAPS[2],
            BasemapId::OpenStreetMap => &BASEMAPS[3],
        }
    }

    /// Case-insensitive lookup by display name
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Basemap> {
        let name = name.trim();
        BASEMAPS
            .iter()
            .find(|basemap| basemap.name.eq_ignore_ascii_case(name))
    }

    /// The pre-selected basemap
    #[must_use]
    pub fn fallback() -> &'static Basemap {
        Self::get(BasemapId::OpenStreetMap)
    }

    /// Expand the URL template for one tile
    #[must_use]
    pub fn tile_url(&self, x: u32, y: u32, zoom: u8) -> String {
        let subdomain = self.subdomain(x, y);
        self.url_template
            .replace("{s}", &subdomain)
            .replace("{z}", &zoom.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{r}", "")
            .replace("{ext}", self.ext.unwrap_or_default())
    }

    /// Subdomain load balancing based on tile coordinates
    fn subdomain(&self, x: u32, y: u32) -> String {
        let count = self.subdomains.chars().count();
        if count == 0 {
            return String::new();
        }
        let index = (u64::from(x) + u64::from(y)) % count as u64;
        self.subdomains
            .chars()
            .nth(index as usize)
            .map(String::from)
            .unwrap_or_default()
    }

    /// Clamp a zoom level into this basemap's supported range
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(f64::from(self.min_zoom), f64::from(self.max_zoom))
    }
}

/// walkers tile source backed by a [`Basemap`]
#[derive(Debug, Clone, Copy)]
pub struct BasemapTileSource {
    basemap: &'static Basemap,
}

impl BasemapTileSource {
    #[must_use]
    pub fn new(basemap: &'static Basemap) -> Self {
        Self { basemap }
    }
}

impl TileSource for BasemapTileSource {
    fn tile_url(&self, tile_id: TileId) -> String {
        self.basemap.tile_url(tile_id.x, tile_id.y, tile_id.zoom)
    }

    fn attribution(&self) -> Attribution {
        Attribution {
            text: self.basemap.attribution,
            url: self.basemap.attribution_url,
            logo_light: None,
            logo_dark: None,
        }
    }

    fn max_zoom(&self) -> u8 {
        self.basemap.max_zoom
    }
}

/// Lazily created tile managers, one per basemap that has been shown
#[derive(Default)]
pub struct BasemapTiles {
    tiles: HashMap<BasemapId, HttpTiles>,
}

impl std::fmt::Debug for BasemapTiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasemapTiles")
            .field("loaded", &self.tiles.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl BasemapTiles {
    /// Get or create the tile manager for a basemap
    pub fn get_or_create(&mut self, id: BasemapId, ctx: &egui::Context) -> &mut HttpTiles {
        self.tiles.entry(id).or_insert_with(|| {
            log::info!("Creating tile layer for basemap {}", Basemap::get(id).name);
            HttpTiles::new(BasemapTileSource::new(Basemap::get(id)), ctx.clone())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_and_names() {
        let names: Vec<&str> = BASEMAPS.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["GrayScale", "WaterColor", "Topography", "Default"]);

        for basemap in &BASEMAPS {
            assert_eq!(Basemap::get(basemap.id), basemap);
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(Basemap::by_name("watercolor").unwrap().id, BasemapId::WaterColor);
        assert_eq!(Basemap::by_name(" Default ").unwrap().id, BasemapId::OpenStreetMap);
        assert!(Basemap::by_name("Satellite").is_none());
        assert_eq!(Basemap::fallback().name, "Default");
    }

    #[test]
    fn test_osm_tile_url() {
        let url = Basemap::get(BasemapId::OpenStreetMap).tile_url(5, 12, 5);
        // (5 + 12) % 3 == 2
        assert_eq!(url, "https://c.tile.openstreetmap.org/5/5/12.png");
    }

    #[test]
    fn test_template_with_retina_and_extension() {
        let url = Basemap::get(BasemapId::GrayScale).tile_url(1, 2, 3);
        assert_eq!(url, "https://stamen-tiles-d.a.ssl.fastly.net/toner-lite/3/1/2.png");

        let url = Basemap::get(BasemapId::WaterColor).tile_url(0, 0, 1);
        assert_eq!(url, "https://stamen-tiles-a.a.ssl.fastly.net/watercolor/1/0/0.jpg");
    }

    #[test]
    fn test_subdomains_cover_all_choices() {
        let topo = Basemap::get(BasemapId::Topography);
        let hosts: Vec<String> = (0..3)
            .map(|x| topo.tile_url(x, 0, 2))
            .map(|url| url[8..9].to_string())
            .collect();
        assert_eq!(hosts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_zoom_clamped_to_basemap_bounds() {
        let watercolor = Basemap::get(BasemapId::WaterColor);
        assert_eq!(watercolor.clamp_zoom(0.0), 1.0);
        assert_eq!(watercolor.clamp_zoom(18.0), 16.0);
        assert_eq!(watercolor.clamp_zoom(5.0), 5.0);
        assert_eq!(Basemap::get(BasemapId::Topography).max_zoom, 17);
    }

    #[test]
    fn test_tile_source_uses_basemap() {
        let source = BasemapTileSource::new(Basemap::get(BasemapId::Topography));
        assert_eq!(source.max_zoom(), 17);
        assert_eq!(source.attribution().url, "https://opentopomap.org");
    }
}
