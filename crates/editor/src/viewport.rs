//! Viewport zoom/pan state and coordinate mapping
//!
//! The image is laid out centred in the viewport, scaled by
//! `base_scale * zoom` about its centre and then translated by `pan`.
//! Screen -> image conversion measures that rendered rectangle and
//! ratio-maps into it, so both directions go through the same geometry.

use glam::{UVec2, Vec2};
use retouch_config::ViewConfig;
use retouch_painting::{ImagePoint, ScreenDelta, ScreenPoint};
use tracing::{debug, info};

/// Zoom/pan state of the view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Relative zoom, clamped to the configured range
    pub zoom: f32,
    /// Translation of the image centre from the viewport centre
    pub pan: ScreenDelta,
    /// Fit scale computed on load, never above 1.0
    pub base_scale: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: ScreenDelta::ZERO,
            base_scale: 1.0,
        }
    }
}

impl ViewState {
    /// Image pixel -> screen pixel scale
    #[inline]
    pub fn effective_scale(&self) -> f32 {
        self.base_scale * self.zoom
    }
}

/// On-screen rectangle covered by the image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderedRect {
    pub min: ScreenPoint,
    pub size: Vec2,
}

impl RenderedRect {
    pub fn max(&self) -> ScreenPoint {
        ScreenPoint(self.min.0 + self.size)
    }

    /// Zero width or height (not laid out, or scale collapsed to 0)
    pub fn is_degenerate(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Inclusive containment test
    pub fn contains(&self, point: ScreenPoint) -> bool {
        let max = self.max();
        point.x() >= self.min.x()
            && point.x() <= max.x()
            && point.y() >= self.min.y()
            && point.y() <= max.y()
    }
}

/// Maps between screen space and image space under zoom and pan
#[derive(Debug, Clone)]
pub struct ViewportTransform {
    config: ViewConfig,
    state: ViewState,
    viewport_size: Vec2,
    image_size: Option<UVec2>,
}

impl ViewportTransform {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            state: ViewState::default(),
            viewport_size: Vec2::ZERO,
            image_size: None,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn zoom(&self) -> f32 {
        self.state.zoom
    }

    /// Zoom as shown to the user, e.g. 120 for 1.2x
    pub fn zoom_percent(&self) -> u32 {
        (self.state.zoom * 100.0).round().max(0.0) as u32
    }

    pub fn pan(&self) -> ScreenDelta {
        self.state.pan
    }

    pub fn base_scale(&self) -> f32 {
        self.state.base_scale
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    pub fn image_size(&self) -> Option<UVec2> {
        self.image_size
    }

    /// Update the viewport size without refitting
    pub fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport_size = size.max(Vec2::ZERO);
    }

    /// Set the pan directly (shift-drag)
    pub fn set_pan(&mut self, pan: ScreenDelta) {
        self.state.pan = pan;
    }

    /// Fit the image inside the viewport minus padding and reset zoom/pan
    ///
    /// The fit never scales above 100%.
    pub fn fit_to_view(&mut self, image_size: UVec2, viewport_size: Vec2) {
        self.set_viewport_size(viewport_size);
        self.image_size = Some(image_size);

        let padding = self.config.fit_padding;
        let image = image_size.as_vec2().max(Vec2::ONE);
        let fit = (self.viewport_size - Vec2::splat(padding)) / image;

        self.state = ViewState {
            zoom: 1.0,
            pan: ScreenDelta::ZERO,
            base_scale: fit.min_element().min(1.0).max(0.0),
        };

        info!(
            "Viewport: fit {}x{} into {:.0}x{:.0}, base scale {:.4}",
            image_size.x,
            image_size.y,
            self.viewport_size.x,
            self.viewport_size.y,
            self.state.base_scale
        );
    }

    /// Multiply the zoom by `factor`, clamped to the configured range
    ///
    /// With an anchor, pan is adjusted so the image point under the anchor
    /// stays put. Returns false if the zoom did not change.
    pub fn zoom_by(&mut self, factor: f32, anchor: Option<ScreenPoint>) -> bool {
        let old_zoom = self.state.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.config.min_zoom, self.config.max_zoom);

        if !new_zoom.is_finite() || (new_zoom - old_zoom).abs() <= f32::EPSILON {
            return false;
        }

        if let Some(anchor) = anchor {
            let r = anchor.0 - self.viewport_center().0;
            let pan = self.state.pan.0;
            self.state.pan = ScreenDelta(r - (r - pan) * (new_zoom / old_zoom));
        }
        self.state.zoom = new_zoom;

        debug!(
            "Viewport: zoom {:.3} -> {:.3}, pan ({:.1}, {:.1})",
            old_zoom,
            new_zoom,
            self.state.pan.dx(),
            self.state.pan.dy()
        );
        true
    }

    pub fn viewport_center(&self) -> ScreenPoint {
        ScreenPoint(self.viewport_size * 0.5)
    }

    /// Where the image currently lands on screen, None without an image
    pub fn rendered_rect(&self) -> Option<RenderedRect> {
        let image = self.image_size?.as_vec2();
        let size = image * self.state.effective_scale();
        let center = self.viewport_center() + self.state.pan;
        Some(RenderedRect {
            min: ScreenPoint(center.0 - size * 0.5),
            size,
        })
    }

    /// Screen point -> image pixel coordinates
    ///
    /// A degenerate rendered rectangle maps everything to (0, 0).
    pub fn screen_to_image(&self, point: ScreenPoint) -> ImagePoint {
        let (Some(image), Some(rect)) = (self.image_size, self.rendered_rect()) else {
            return ImagePoint::default();
        };
        if rect.is_degenerate() {
            return ImagePoint::default();
        }
        ImagePoint((point.0 - rect.min.0) * (image.as_vec2() / rect.size))
    }

    /// Image pixel coordinates -> screen point
    pub fn image_to_screen(&self, point: ImagePoint) -> ScreenPoint {
        let (Some(image), Some(rect)) = (self.image_size, self.rendered_rect()) else {
            return ScreenPoint::default();
        };
        let scale = rect.size / image.as_vec2().max(Vec2::ONE);
        ScreenPoint(rect.min.0 + point.0 * scale)
    }

    /// How many screen pixels one image pixel covers (0 when degenerate)
    pub fn screen_pixels_per_image_pixel(&self) -> f32 {
        match (self.image_size, self.rendered_rect()) {
            (Some(image), Some(rect)) if image.x > 0 && !rect.is_degenerate() => {
                rect.size.x / image.x as f32
            }
            _ => 0.0,
        }
    }

    /// True if the point lies on the rendered image
    pub fn contains_screen_point(&self, point: ScreenPoint) -> bool {
        self.rendered_rect().is_some_and(|rect| !rect.is_degenerate() && rect.contains(point))
    }
}
