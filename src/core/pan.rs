//! Pan bar math: a slider dragged across the viewport translates content
//! that is wider than the viewport.

use crate::core::error::TimelineError;

/// Ratio of content width to viewport width, never below 1.
pub fn pan_ratio(content_width: f64, viewport_width: f64) -> f64 {
    (content_width / viewport_width).max(1.0)
}

/// Slider state for one pan bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanController {
    content_width: f64,
    viewport_width: f64,
    slider_width: f64,
    slider_x: f64,
}

impl PanController {
    pub fn new(content_width: f64, viewport_width: f64, slider_width: f64) -> Result<Self, TimelineError> {
        if !viewport_width.is_finite() || viewport_width <= 0.0 {
            return Err(TimelineError::InvalidConfiguration(format!(
                "viewport width must be positive, got {}",
                viewport_width
            )));
        }
        if !slider_width.is_finite() || slider_width <= 0.0 || slider_width >= viewport_width {
            return Err(TimelineError::InvalidConfiguration(format!(
                "slider width {} does not fit viewport width {}",
                slider_width, viewport_width
            )));
        }
        if !content_width.is_finite() || content_width < 0.0 {
            return Err(TimelineError::InvalidConfiguration(format!(
                "content width must not be negative, got {}",
                content_width
            )));
        }
        Ok(Self {
            content_width,
            viewport_width,
            slider_width,
            slider_x: 0.0,
        })
    }

    pub fn pan_ratio(&self) -> f64 {
        pan_ratio(self.content_width, self.viewport_width)
    }

    /// Left edge of the slider within the bar.
    pub fn slider_x(&self) -> f64 {
        self.slider_x
    }

    pub fn slider_width(&self) -> f64 {
        self.slider_width
    }

    /// Largest leftward translation the content allows.
    pub fn max_pan(&self) -> f64 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    pub fn needs_panning(&self) -> bool {
        self.max_pan() > 0.0
    }

    /// Centre the slider under the pointer and return the content translation.
    ///
    /// Only the latest pointer position matters; non-finite input leaves the
    /// slider where it was.
    pub fn drag_to(&mut self, pointer_x: f64) -> f64 {
        if pointer_x.is_finite() {
            let max_slider_x = self.viewport_width - self.slider_width;
            self.slider_x = (pointer_x - self.slider_width / 2.0).clamp(0.0, max_slider_x);
        }
        self.translation()
    }

    /// Horizontal content translation for the current slider position.
    pub fn translation(&self) -> f64 {
        let offset = (self.slider_x * self.pan_ratio()).min(self.max_pan());
        if offset > 0.0 {
            -offset
        } else {
            0.0
        }
    }
}

/// Translation for a single drag update; invalid geometry never pans.
pub fn update_pan(pointer_x: f64, viewport_width: f64, slider_width: f64, content_width: f64) -> f64 {
    match PanController::new(content_width, viewport_width, slider_width) {
        Ok(mut controller) => controller.drag_to(pointer_x),
        Err(err) => {
            tracing::debug!("ignoring pan update: {}", err);
            0.0
        }
    }
}
