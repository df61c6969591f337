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

//! Popup for the selected earthquake.

use quake_feed::QuakeMarker;

use crate::map::QuakeSelection;

/// Gap between the marker edge and the popup (px)
const POPUP_OFFSET: f32 = 6.0;

#[derive(Debug, Default)]
pub struct QuakePopup {
    pub selection: Option<QuakeSelection>,
}

impl QuakePopup {
    pub fn close(&mut self) {
        self.selection = None;
    }

    /// Render the popup above the selected marker
    pub fn render(&mut self, ctx: &egui::Context, markers: &[QuakeMarker]) {
        let Some(selection) = self.selection else {
            return;
        };
        let Some(marker) = markers.get(selection.index) else {
            self.close();
            return;
        };

        // Marker is off-screen this frame
        let Some(screen_pos) = selection.screen_pos else {
            return;
        };

        let anchor = screen_pos - egui::vec2(0.0, marker.style.radius + POPUP_OFFSET);
        let mut open = true;

        egui::Window::new("earthquake_popup")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .pivot(egui::Align2::CENTER_BOTTOM)
            .fixed_pos(anchor)
            .frame(egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(250, 250, 250, 240))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(120, 120, 120)))
                .corner_radius(4.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        for line in marker.popup.lines() {
                            ui.label(egui::RichText::new(line)
                                .color(egui::Color32::from_rgb(30, 30, 30))
                                .size(12.0));
                        }
                    });
                    if ui.small_button("✕").clicked() {
                        open = false;
                    }
                });

                let event = &marker.event;
                if let Some(time) = event.time {
                    ui.label(egui::RichText::new(time.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                        .color(egui::Color32::from_rgb(90, 90, 90))
                        .size(10.0)
                        .monospace());
                }
                if let Some(url) = &event.url {
                    ui.hyperlink_to("USGS event page", url);
                }
            });

        if !open {
            self.close();
        }
    }
}
