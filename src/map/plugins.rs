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

//! walkers plugins drawing the two overlays.

use egui::{Color32, Pos2, Shape, Stroke};
use quake_feed::geojson::Coordinate;
use quake_feed::{PlateBoundary, QuakeMarker, PLATE_BOUNDARY_STYLE};
use walkers::{lon_lat, MapMemory, Plugin, Projector};

/// Markers smaller than this are still clickable within this radius (px)
const MIN_HIT_RADIUS: f32 = 4.0;

/// The earthquake whose popup is open
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuakeSelection {
    /// Index into the earthquake overlay
    pub index: usize,
    /// Marker center on screen, `None` when the marker was culled this frame
    pub screen_pos: Option<Pos2>,
}

/// Follow the selected marker to where it was drawn this frame.
///
/// The selection is dropped when its index is out of range and hidden
/// (`screen_pos` cleared) when the marker was culled off-screen.
#[must_use]
pub fn track_selection(
    selection: Option<QuakeSelection>,
    marker_count: usize,
    drawn: &[(usize, Pos2, f32)],
) -> Option<QuakeSelection> {
    let selected = selection?;
    if selected.index >= marker_count {
        return None;
    }
    let screen_pos = drawn
        .iter()
        .find(|(index, _, _)| *index == selected.index)
        .map(|&(_, center, _)| center);
    Some(QuakeSelection {
        screen_pos,
        ..selected
    })
}

fn rgb(color: (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(color.0, color.1, color.2)
}

fn with_opacity(color: (u8, u8, u8), opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.0, color.1, color.2, alpha)
}

/// Split a line wherever consecutive vertices are more than 180° of
/// longitude apart, so segments crossing the antimeridian are not drawn
/// across the whole map.
#[must_use]
pub fn split_at_antimeridian(line: &[Coordinate]) -> Vec<&[Coordinate]> {
    let mut parts = Vec::new();
    let mut start = 0;
    for i in 1..line.len() {
        if (line[i].longitude - line[i - 1].longitude).abs() > 180.0 {
            parts.push(&line[start..i]);
            start = i;
        }
    }
    if start < line.len() {
        parts.push(&line[start..]);
    }
    parts
}

/// Index of the topmost marker under `click`, if any.
///
/// Markers are given in draw order as `(index, center, radius)`; later markers
/// are drawn above earlier ones and win ties.
#[must_use]
pub fn hit_test(markers: impl IntoIterator<Item = (usize, Pos2, f32)>, click: Pos2) -> Option<usize> {
    markers
        .into_iter()
        .filter(|(_, center, radius)| center.distance(click) <= radius.max(MIN_HIT_RADIUS))
        .last()
        .map(|(index, _, _)| index)
}

/// Draws plate boundaries as yellow 1 px lines
pub struct PlateLines<'a> {
    boundaries: &'a [PlateBoundary],
}

impl<'a> PlateLines<'a> {
    #[must_use]
    pub fn new(boundaries: &'a [PlateBoundary]) -> Self {
        Self { boundaries }
    }
}

impl Plugin for PlateLines<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        _response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let stroke = Stroke::new(PLATE_BOUNDARY_STYLE.weight, rgb(PLATE_BOUNDARY_STYLE.rgb));
        let painter = ui.painter();

        for line in self.boundaries.iter().flat_map(|b| b.lines.iter()) {
            for part in split_at_antimeridian(line) {
                if part.len() < 2 {
                    continue;
                }
                let points: Vec<Pos2> = part
                    .iter()
                    .map(|c| projector.project(lon_lat(c.longitude, c.latitude)).to_pos2())
                    .collect();
                painter.add(Shape::line(points, stroke));
            }
        }
    }
}

/// Draws earthquake circle markers and opens a popup on click
pub struct QuakeMarkers<'a> {
    markers: &'a [QuakeMarker],
    selection: &'a mut Option<QuakeSelection>,
}

impl<'a> QuakeMarkers<'a> {
    #[must_use]
    pub fn new(markers: &'a [QuakeMarker], selection: &'a mut Option<QuakeSelection>) -> Self {
        Self { markers, selection }
    }
}

impl Plugin for QuakeMarkers<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut egui::Ui,
        response: &egui::Response,
        projector: &Projector,
        _memory: &MapMemory,
    ) {
        let Self { markers, selection } = *self;
        let painter = ui.painter();
        let clip = painter.clip_rect();

        let mut drawn = Vec::with_capacity(markers.len());
        for (index, marker) in markers.iter().enumerate() {
            let event = &marker.event;
            let style = &marker.style;
            let center = projector
                .project(lon_lat(event.longitude, event.latitude))
                .to_pos2();

            if !clip.expand(style.radius).contains(center) {
                continue;
            }

            let stroke = if style.stroke {
                Stroke::new(
                    style.stroke_weight,
                    with_opacity(style.stroke_rgb, style.stroke_opacity),
                )
            } else {
                Stroke::NONE
            };
            painter.circle(
                center,
                style.radius,
                with_opacity(style.fill.rgb(), style.fill_opacity),
                stroke,
            );
            drawn.push((index, center, style.radius));
        }

        // Keep the open popup attached to its marker while the map moves
        *selection = track_selection(*selection, markers.len(), &drawn);

        // A click on empty map closes the popup
        if response.clicked() {
            if let Some(click) = response.interact_pointer_pos() {
                *selection = hit_test(drawn, click).map(|index| {
                    let event = &markers[index].event;
                    log::debug!(
                        "Selected earthquake {} at {:.3}, {:.3}",
                        index,
                        event.latitude,
                        event.longitude
                    );
                    QuakeSelection {
                        index,
                        screen_pos: Some(
                            projector
                                .project(lon_lat(event.longitude, event.latitude))
                                .to_pos2(),
                        ),
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(longitude: f64, latitude: f64) -> Coordinate {
        Coordinate {
            longitude,
            latitude,
            elevation: None,
        }
    }

    #[test]
    fn test_line_without_crossing_is_kept_whole() {
        let line = vec![coord(10.0, 0.0), coord(20.0, 1.0), coord(30.0, 2.0)];
        let parts = split_at_antimeridian(&line);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 3);
    }

    #[test]
    fn test_line_split_at_antimeridian() {
        let line = vec![
            coord(178.0, -15.0),
            coord(179.9, -15.2),
            coord(-179.8, -15.4),
            coord(-178.0, -15.6),
        ];
        let parts = split_at_antimeridian(&line);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[1][0].longitude, -179.8);
    }

    #[test]
    fn test_empty_line() {
        assert!(split_at_antimeridian(&[]).is_empty());
    }

    #[test]
    fn test_hit_test_picks_topmost() {
        let markers = vec![
            (0, Pos2::new(100.0, 100.0), 20.0),
            (1, Pos2::new(105.0, 100.0), 10.0),
            (2, Pos2::new(300.0, 300.0), 10.0),
        ];
        assert_eq!(hit_test(markers.clone(), Pos2::new(104.0, 101.0)), Some(1));
        assert_eq!(hit_test(markers.clone(), Pos2::new(85.0, 100.0)), Some(0));
        assert_eq!(hit_test(markers, Pos2::new(200.0, 200.0)), None);
    }

    #[test]
    fn test_tiny_markers_remain_clickable() {
        let markers = vec![(7, Pos2::new(50.0, 50.0), 1.0)];
        assert_eq!(hit_test(markers, Pos2::new(53.0, 50.0)), Some(7));
    }

    #[test]
    fn test_selection_follows_drawn_marker() {
        let selected = QuakeSelection {
            index: 1,
            screen_pos: Some(Pos2::new(10.0, 10.0)),
        };
        let drawn = vec![(0, Pos2::new(5.0, 5.0), 3.0), (1, Pos2::new(40.0, 60.0), 3.0)];

        let tracked = track_selection(Some(selected), 2, &drawn);
        assert_eq!(tracked.and_then(|s| s.screen_pos), Some(Pos2::new(40.0, 60.0)));
    }

    #[test]
    fn test_culled_selection_is_hidden() {
        let selected = QuakeSelection {
            index: 1,
            screen_pos: Some(Pos2::new(10.0, 10.0)),
        };
        let drawn = vec![(0, Pos2::new(5.0, 5.0), 3.0)];

        let tracked = track_selection(Some(selected), 2, &drawn);
        assert_eq!(tracked.map(|s| s.index), Some(1));
        assert_eq!(tracked.and_then(|s| s.screen_pos), None);

        // Stale indices close the popup
        assert_eq!(track_selection(Some(selected), 1, &drawn), None);
        assert_eq!(track_selection(None, 2, &drawn), None);
    }

    #[test]
    fn test_opacity_to_alpha() {
        assert_eq!(with_opacity((255, 0, 0), 0.5).a(), 128);
        assert_eq!(with_opacity((0, 0, 0), 2.0).a(), 255);
    }
}
