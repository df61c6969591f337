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

//! Per-feature styling.
//!
//! Earthquake markers are colored by hypocenter depth and sized by magnitude;
//! plate boundaries share one fixed line style.

mod legend;

pub use legend::{Legend, LegendEntry, DEPTH_INTERVALS};

/// Depth color bucket for an earthquake marker.
///
/// Ordered from shallowest to deepest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthBand {
    /// depth <= 10 km
    Shallow,
    /// 10 < depth <= 30 km
    Band10To30,
    /// 30 < depth <= 50 km
    Band30To50,
    /// 50 < depth <= 70 km
    Band50To70,
    /// 70 < depth <= 90 km
    Band70To90,
    /// depth > 90 km
    Deep,
}

impl DepthBand {
    /// All bands, shallowest first.
    pub const ALL: [DepthBand; 6] = [
        DepthBand::Shallow,
        DepthBand::Band10To30,
        DepthBand::Band30To50,
        DepthBand::Band50To70,
        DepthBand::Band70To90,
        DepthBand::Deep,
    ];

    /// Classify a depth in km. Thresholds are strict: a depth exactly on a
    /// boundary belongs to the shallower band. NaN is `Shallow`.
    #[must_use]
    pub fn from_depth(depth_km: f64) -> Self {
        if depth_km > 90.0 {
            DepthBand::Deep
        } else if depth_km > 70.0 {
            DepthBand::Band70To90
        } else if depth_km > 50.0 {
            DepthBand::Band50To70
        } else if depth_km > 30.0 {
            DepthBand::Band30To50
        } else if depth_km > 10.0 {
            DepthBand::Band10To30
        } else {
            DepthBand::Shallow
        }
    }

    /// CSS color string for the band.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            DepthBand::Shallow => "green",
            DepthBand::Band10To30 => "#cafc03",
            DepthBand::Band30To50 => "#fcad03",
            DepthBand::Band50To70 => "#fc8403",
            DepthBand::Band70To90 => "#fc4903",
            DepthBand::Deep => "red",
        }
    }

    /// RGB value of [`Self::css`].
    #[must_use]
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            DepthBand::Shallow => (0, 128, 0),
            DepthBand::Band10To30 => (0xca, 0xfc, 0x03),
            DepthBand::Band30To50 => (0xfc, 0xad, 0x03),
            DepthBand::Band50To70 => (0xfc, 0x84, 0x03),
            DepthBand::Band70To90 => (0xfc, 0x49, 0x03),
            DepthBand::Deep => (255, 0, 0),
        }
    }
}

/// Fill color for an earthquake at the given depth.
#[must_use]
pub fn depth_color(depth_km: f64) -> &'static str {
    DepthBand::from_depth(depth_km).css()
}

/// Marker radius in pixels for a magnitude.
///
/// Linear in magnitude (5 px per unit). Zero magnitude gets a 1 px floor so
/// the event stays visible; negative and NaN magnitudes take the same floor.
#[must_use]
pub fn marker_radius(magnitude: f64) -> f32 {
    if magnitude > 0.0 {
        (magnitude * 5.0) as f32
    } else {
        1.0
    }
}

/// Circle marker style for one earthquake.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: DepthBand,
    pub radius: f32,
    pub fill_opacity: f32,
    pub stroke: bool,
    pub stroke_opacity: f32,
    pub stroke_weight: f32,
    pub stroke_rgb: (u8, u8, u8),
}

impl MarkerStyle {
    /// Style for an event with the given magnitude and depth.
    #[must_use]
    pub fn for_event(magnitude: f64, depth_km: f64) -> Self {
        Self {
            fill: DepthBand::from_depth(depth_km),
            radius: marker_radius(magnitude),
            fill_opacity: 0.5,
            stroke: true,
            stroke_opacity: 0.5,
            stroke_weight: 0.5,
            stroke_rgb: (0, 0, 0),
        }
    }
}

/// Line style shared by every plate boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub css: &'static str,
    pub rgb: (u8, u8, u8),
    pub weight: f32,
}

/// Plate boundaries are drawn yellow, 1 px wide.
pub const PLATE_BOUNDARY_STYLE: LineStyle = LineStyle {
    css: "yellow",
    rgb: (255, 255, 0),
    weight: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_thresholds_are_strict() {
        assert_eq!(depth_color(90.0), "#fc4903");
        assert_eq!(depth_color(90.001), "red");
        assert_eq!(depth_color(70.0), "#fc8403");
        assert_eq!(depth_color(50.0), "#fcad03");
        assert_eq!(depth_color(30.0), "#cafc03");
        assert_eq!(depth_color(10.0), "green");
        assert_eq!(depth_color(10.5), "#cafc03");
    }

    #[test]
    fn test_depth_extremes() {
        assert_eq!(depth_color(-3.2), "green");
        assert_eq!(depth_color(650.0), "red");
        assert_eq!(depth_color(f64::NAN), "green");
    }

    #[test]
    fn test_every_depth_maps_to_a_listed_color() {
        let listed: Vec<&str> = DepthBand::ALL.iter().map(|band| band.css()).collect();
        let mut depth = -20.0;
        while depth < 200.0 {
            assert!(listed.contains(&depth_color(depth)), "depth {depth}");
            depth += 0.5;
        }
    }

    #[test]
    fn test_radius_floor_for_zero_magnitude() {
        assert_eq!(marker_radius(0.0), 1.0);
        assert_eq!(marker_radius(-0.8), 1.0);
        assert_eq!(marker_radius(f64::NAN), 1.0);
    }

    #[test]
    fn test_radius_is_linear() {
        assert_eq!(marker_radius(4.2), 21.0);
        assert_eq!(marker_radius(1.0), 5.0);
        assert_eq!(marker_radius(0.1), 0.5);
    }

    #[test]
    fn test_radius_monotonic_above_zero() {
        let mut previous = marker_radius(0.01);
        for step in 1..100 {
            let radius = marker_radius(f64::from(step) * 0.1);
            assert!(radius >= previous);
            previous = radius;
        }
    }

    #[test]
    fn test_marker_style_for_event() {
        let style = MarkerStyle::for_event(4.2, 35.0);
        assert_eq!(style.fill.css(), "#fcad03");
        assert_eq!(style.radius, 21.0);
        assert_eq!(style.fill_opacity, 0.5);
        assert_eq!(style.stroke_opacity, 0.5);
        assert_eq!(style.stroke_weight, 0.5);
        assert!(style.stroke);
    }
}
