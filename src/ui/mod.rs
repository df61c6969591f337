//! UI components for QuakeMap.
//!
//! Floating controls drawn above the map: the layer switcher, the depth
//! legend and the earthquake popup.

pub mod layer_control;
pub mod legend;
pub mod popup;

pub use layer_control::LayerControl;
pub use legend::LegendPane;
pub use popup::QuakePopup;
