//! Map rendering: basemap tile sources and overlay plugins.
//!
//! This module provides the basemap registry, its walkers tile sources, and
//! the plugins drawing plate boundaries and earthquake markers.

pub mod basemaps;
pub mod plugins;

pub use basemaps::{Basemap, BasemapId, BasemapTiles, BASEMAPS};
pub use plugins::{PlateLines, QuakeMarkers, QuakeSelection};
