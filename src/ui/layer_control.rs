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

//! Basemap and overlay switcher.

use quake_feed::{OverlayLayer, OverlayState, Overlays};

use crate::map::{Basemap, BasemapId, BASEMAPS};

/// Overlay status as shown next to its toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayStatus {
    /// Still fetching; shown without any indicator
    Pending,
    Ready(usize),
    Unavailable(String),
}

/// One overlay toggle row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRow {
    pub name: &'static str,
    pub visible: bool,
    pub status: OverlayStatus,
}

fn status_of<T>(layer: &OverlayLayer<T>) -> OverlayStatus {
    match layer.state() {
        OverlayState::Pending => OverlayStatus::Pending,
        OverlayState::Ready(items) => OverlayStatus::Ready(items.len()),
        OverlayState::Failed(e) => OverlayStatus::Unavailable(e.to_string()),
    }
}

/// Basemap radio selection plus independent overlay toggles
#[derive(Debug, Clone)]
pub struct LayerControl {
    pub basemap: BasemapId,
    pub show_plates: bool,
    pub show_earthquakes: bool,
    pub collapsed: bool,
}

impl LayerControl {
    pub fn new(basemap: BasemapId, show_plates: bool, show_earthquakes: bool) -> Self {
        Self {
            basemap,
            show_plates,
            show_earthquakes,
            collapsed: false,
        }
    }

    /// Overlay rows in display order. Both overlays are always listed,
    /// whatever state their fetch is in.
    pub fn overlay_rows(&self, overlays: &Overlays) -> [OverlayRow; 2] {
        [
            OverlayRow {
                name: overlays.plates.name(),
                visible: self.show_plates,
                status: status_of(&overlays.plates),
            },
            OverlayRow {
                name: overlays.earthquakes.name(),
                visible: self.show_earthquakes,
                status: status_of(&overlays.earthquakes),
            },
        ]
    }

    /// Render the control in the top-right corner.
    ///
    /// Returns true when the basemap selection changed.
    pub fn render(&mut self, ctx: &egui::Context, overlays: &Overlays) -> bool {
        let previous = self.basemap;
        let rows = self.overlay_rows(overlays);

        egui::Window::new("Layers")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
            .resizable(false)
            .collapsible(false)
            .title_bar(false)
            .frame(egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(25, 30, 35, 230))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(60, 80, 100)))
                .corner_radius(6.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("◈ LAYERS")
                        .color(egui::Color32::from_rgb(100, 180, 220))
                        .size(12.0)
                        .strong());
                    let toggle = if self.collapsed { "▸" } else { "▾" };
                    if ui.small_button(toggle).clicked() {
                        self.collapsed = !self.collapsed;
                    }
                });

                if self.collapsed {
                    return;
                }

                ui.separator();
                for basemap in &BASEMAPS {
                    ui.radio_value(&mut self.basemap, basemap.id, basemap.name);
                }

                ui.separator();
                let [plates_row, quakes_row] = rows;
                let toggles = [
                    (&mut self.show_plates, plates_row),
                    (&mut self.show_earthquakes, quakes_row),
                ];
                for (visible, row) in toggles {
                    ui.checkbox(visible, row.name);

                    match &row.status {
                        OverlayStatus::Pending => {}
                        OverlayStatus::Ready(count) => {
                            ui.label(egui::RichText::new(format!("   {count} features"))
                                .color(egui::Color32::from_rgb(150, 150, 150))
                                .size(10.0));
                        }
                        OverlayStatus::Unavailable(reason) => {
                            ui.label(egui::RichText::new("   ⚠ data unavailable")
                                .color(egui::Color32::from_rgb(255, 100, 100))
                                .size(10.0))
                                .on_hover_text(reason.as_str());
                        }
                    }
                }
            });

        if self.basemap != previous {
            log::info!("Basemap changed to {}", Basemap::get(self.basemap).name);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quake_feed::feed::StatusCode;
    use quake_feed::FeedError;

    fn http_failure() -> FeedError {
        FeedError::Status {
            url: "http://localhost/feed".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    #[test]
    fn test_rows_listed_while_pending() {
        let control = LayerControl::new(BasemapId::OpenStreetMap, true, true);
        let rows = control.overlay_rows(&Overlays::new());

        assert_eq!(rows[0].name, "Tectonic Plates");
        assert_eq!(rows[1].name, "Earthquake Data");
        assert!(rows.iter().all(|row| row.status == OverlayStatus::Pending));
    }

    #[test]
    fn test_rows_listed_after_both_fetches_fail() {
        let overlays = Overlays::new();
        overlays.plates.populate(Err(http_failure())).unwrap();
        overlays.earthquakes.populate(Err(http_failure())).unwrap();

        let control = LayerControl::new(BasemapId::OpenStreetMap, true, false);
        let rows = control.overlay_rows(&overlays);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].visible);
        assert!(!rows[1].visible);
        for row in &rows {
            assert!(matches!(&row.status, OverlayStatus::Unavailable(reason) if reason.contains("503")));
        }
    }

    #[test]
    fn test_ready_rows_report_counts() {
        let overlays = Overlays::new();
        overlays.plates.populate(Ok(Vec::new())).unwrap();

        let rows = LayerControl::new(BasemapId::Topography, true, true).overlay_rows(&overlays);
        assert_eq!(rows[0].status, OverlayStatus::Ready(0));
        assert_eq!(rows[1].status, OverlayStatus::Pending);
    }
}
