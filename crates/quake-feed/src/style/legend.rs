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

//! Depth legend.

use super::DepthBand;

/// Lower bounds (km) of each legend row, shallowest first. Each row's upper
/// bound is the next row's lower bound; the last row is open ended.
pub const DEPTH_INTERVALS: [i32; 6] = [-10, 10, 30, 50, 70, 90];

/// One legend row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendEntry {
    pub lower_km: i32,
    pub upper_km: Option<i32>,
    pub band: DepthBand,
}

impl LegendEntry {
    /// Row label, e.g. `"10km - 30km"` or `"90+"` for the open-ended row.
    #[must_use]
    pub fn label(&self) -> String {
        match self.upper_km {
            Some(upper) => format!("{}km - {}km", self.lower_km, upper),
            None => format!("{}+", self.lower_km),
        }
    }
}

/// Fixed color-to-depth legend. Not derived from live data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// The six depth rows paired with their band colors.
    #[must_use]
    pub fn depth() -> Self {
        let entries = DEPTH_INTERVALS
            .iter()
            .zip(DepthBand::ALL)
            .enumerate()
            .map(|(i, (&lower_km, band))| LegendEntry {
                lower_km,
                upper_km: DEPTH_INTERVALS.get(i + 1).copied(),
                band,
            })
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_has_six_rows_in_order() {
        let legend = Legend::depth();
        let labels: Vec<String> = legend.entries().iter().map(LegendEntry::label).collect();

        assert_eq!(legend.len(), 6);
        assert_eq!(
            labels,
            vec![
                "-10km - 10km",
                "10km - 30km",
                "30km - 50km",
                "50km - 70km",
                "70km - 90km",
                "90+",
            ]
        );
    }

    #[test]
    fn test_legend_colors_match_depth_bands() {
        let colors: Vec<&str> = Legend::depth()
            .entries()
            .iter()
            .map(|entry| entry.band.css())
            .collect();

        assert_eq!(
            colors,
            vec!["green", "#cafc03", "#fcad03", "#fc8403", "#fc4903", "red"]
        );
    }

    #[test]
    fn test_legend_rows_agree_with_classifier() {
        for entry in Legend::depth().entries() {
            let inside = f64::from(entry.lower_km) + 1.0;
            assert_eq!(DepthBand::from_depth(inside), entry.band);
        }
    }
}
