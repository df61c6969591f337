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

use quake_feed::Legend;

/// Static depth legend in the bottom-right corner
#[derive(Debug, Default)]
pub struct LegendPane {
    legend: Legend,
}

impl LegendPane {
    pub fn new(legend: Legend) -> Self {
        Self { legend }
    }

    pub fn render(&self, ctx: &egui::Context) {
        egui::Window::new("Depth Legend")
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-10.0, -10.0))
            .resizable(false)
            .collapsible(false)
            .title_bar(false)
            .interactable(false)
            .frame(egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(240, 240, 240, 220))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(160, 160, 160)))
                .corner_radius(5.0))
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Depth")
                    .color(egui::Color32::from_rgb(40, 40, 40))
                    .size(11.0)
                    .strong());

                for entry in self.legend.entries() {
                    ui.horizontal(|ui| {
                        let (r, g, b) = entry.band.rgb();
                        let (swatch, _) = ui.allocate_exact_size(
                            egui::vec2(18.0, 14.0),
                            egui::Sense::hover(),
                        );
                        ui.painter().rect_filled(swatch, 0.0, egui::Color32::from_rgb(r, g, b));
                        ui.label(egui::RichText::new(entry.label())
                            .color(egui::Color32::from_rgb(40, 40, 40))
                            .size(11.0));
                    });
                }
            });
    }
}
