//! Timeline components
//!
//! - TimelineView: Chart for one race, with zoom controls and the pan bar
//! - PanBar: Slider that scrolls content wider than the viewport
//! - PrimitiveShape: SVG element for a single layout primitive

mod panel;
mod pan_bar;
mod primitive_shape;

pub use panel::TimelineView;

use crate::constants::{TIME_ZOOM_MAX, TIME_ZOOM_MIN};

/// Keep a requested time zoom inside the supported range.
pub fn clamp_time_zoom(zoom: f64) -> f64 {
    if !zoom.is_finite() {
        return TIME_ZOOM_MIN;
    }
    zoom.clamp(TIME_ZOOM_MIN, TIME_ZOOM_MAX)
}
