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

//! The map window: basemap, overlays and controls.

use log::{info, warn};
use quake_feed::{Legend, Overlays};
use tokio::runtime::Handle;
use walkers::{lon_lat, Map, MapMemory, Position};

use crate::config::AppConfig;
use crate::map::{Basemap, BasemapTiles, PlateLines, QuakeMarkers};
use crate::ui::{LayerControl, LegendPane, QuakePopup};

pub struct QuakeMapApp {
    tiles: BasemapTiles,
    memory: MapMemory,
    center: Position,
    overlays: Overlays,
    layer_control: LayerControl,
    legend: LegendPane,
    popup: QuakePopup,
}

impl std::fmt::Debug for QuakeMapApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuakeMapApp")
            .field("overlays", &self.overlays)
            .field("layer_control", &self.layer_control)
            .finish_non_exhaustive()
    }
}

impl QuakeMapApp {
    /// Build the map and start both overlay fetches.
    ///
    /// The controls do not wait for the fetches; each overlay appears when its
    /// data arrives.
    pub fn new(ctx: &egui::Context, config: &AppConfig, runtime: &Handle) -> Self {
        let basemap = config.basemap();
        let center = lon_lat(config.center_longitude, config.center_latitude);

        let mut memory = MapMemory::default();
        let zoom = basemap.clamp_zoom(config.default_zoom);
        if memory.set_zoom(zoom).is_err() {
            warn!("Zoom level {} rejected by map, keeping default", zoom);
        }
        info!(
            "Map centered at {:.4}, {:.4} (zoom {}) on {} basemap",
            config.center_latitude, config.center_longitude, zoom, basemap.name
        );

        let repaint_ctx = ctx.clone();
        let overlays = Overlays::spawn(runtime, &config.feed_config(), move || {
            repaint_ctx.request_repaint();
        });

        Self {
            tiles: BasemapTiles::default(),
            memory,
            center,
            overlays,
            layer_control: LayerControl::new(
                basemap.id,
                config.show_tectonic_plates,
                config.show_earthquakes,
            ),
            legend: LegendPane::new(Legend::depth()),
            popup: QuakePopup::default(),
        }
    }

    /// Clamp the current zoom into the newly selected basemap's range
    fn on_basemap_changed(&mut self) {
        let basemap = Basemap::get(self.layer_control.basemap);
        let zoom = self.memory.zoom();
        let clamped = basemap.clamp_zoom(zoom);
        if (clamped - zoom).abs() > f64::EPSILON && self.memory.set_zoom(clamped).is_err() {
            warn!("Could not clamp zoom to {} for {}", clamped, basemap.name);
        }
    }

    fn draw_attribution(&self, ctx: &egui::Context) {
        let basemap = Basemap::get(self.layer_control.basemap);
        egui::Window::new("attribution")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(6.0, -6.0))
            .frame(egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(255, 255, 255, 180))
                .corner_radius(3.0)
                .inner_margin(4.0))
            .show(ctx, |ui| {
                ui.hyperlink_to(
                    egui::RichText::new(basemap.attribution).size(9.0),
                    basemap.attribution_url,
                );
            });
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.layer_control.render(ctx, &self.overlays) {
            self.on_basemap_changed();
        }
        self.legend.render(ctx);
        self.draw_attribution(ctx);

        if !self.layer_control.show_earthquakes {
            self.popup.close();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let tiles = self.tiles.get_or_create(self.layer_control.basemap, ctx);
                let mut map = Map::new(Some(tiles), &mut self.memory, self.center);

                if self.layer_control.show_plates {
                    map = map.with_plugin(PlateLines::new(self.overlays.plates.items()));
                }
                if self.layer_control.show_earthquakes {
                    map = map.with_plugin(QuakeMarkers::new(
                        self.overlays.earthquakes.items(),
                        &mut self.popup.selection,
                    ));
                }

                ui.add(map);
            });

        self.popup.render(ctx, self.overlays.earthquakes.items());
    }
}
