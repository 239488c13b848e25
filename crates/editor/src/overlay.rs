//! Brush cursor and source marker geometry
//!
//! All positions and lengths are in image space. Widths and screen-constant
//! sizes are divided by the current screen/image pixel ratio so they keep
//! the same on-screen size at any zoom.

use retouch_painting::{BrushSettings, ImageDelta, ImagePoint};

/// Label drawn next to the cursor while Alt is held
pub const SET_SOURCE_LABEL: &str = "Set Source";

/// On-screen width of a hairline
const HAIRLINE_PX: f32 = 1.0;
/// On-screen length of each source crosshair arm
const CROSSHAIR_ARM_PX: f32 = 10.0;
/// On-screen dash and gap length of the brush outline
const DASH_PX: f32 = 5.0;
/// On-screen label font size
const LABEL_FONT_PX: f32 = 12.0;
/// On-screen label offset from the cursor
const LABEL_OFFSET_PX: f32 = 10.0;

/// Dashed circle showing where the brush will paint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushOutline {
    pub center: ImagePoint,
    pub radius: f32,
    /// Width of the solid dark outline
    pub outline_width: f32,
    /// Width of the light dashed stroke drawn over it
    pub dash_width: f32,
    /// Dash and gap lengths
    pub dash: [f32; 2],
}

/// Crosshair plus brush-sized ring at the clone source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceMarker {
    pub center: ImagePoint,
    pub arm_length: f32,
    pub ring_radius: f32,
}

/// Text hint shown while picking a source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceLabel {
    pub text: &'static str,
    /// Baseline origin of the text
    pub position: ImagePoint,
    pub font_size: f32,
}

/// Everything the host needs to draw the overlay for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    /// Screen pixels per image pixel
    pub pixel_ratio: f32,
    /// Image-space width of a one screen pixel line
    pub line_width: f32,
    pub brush: Option<BrushOutline>,
    pub source: Option<SourceMarker>,
    pub label: Option<SourceLabel>,
}

impl OverlayGeometry {
    /// Build the overlay; None if the pixel ratio is degenerate
    pub fn build(
        pixel_ratio: f32,
        brush: &BrushSettings,
        cursor: Option<ImagePoint>,
        source: Option<ImagePoint>,
        alt_held: bool,
    ) -> Option<Self> {
        if !(pixel_ratio > 0.0 && pixel_ratio.is_finite()) {
            return None;
        }
        let px = |screen: f32| screen / pixel_ratio;
        let radius = brush.radius();

        let source = source.map(|center| SourceMarker {
            center,
            arm_length: px(CROSSHAIR_ARM_PX),
            ring_radius: radius,
        });

        let brush_outline = cursor.map(|center| BrushOutline {
            center,
            radius,
            outline_width: px(2.0 * HAIRLINE_PX),
            dash_width: px(HAIRLINE_PX),
            dash: [px(DASH_PX), px(DASH_PX)],
        });

        let label = cursor.filter(|_| alt_held).map(|center| SourceLabel {
            text: SET_SOURCE_LABEL,
            position: center + ImageDelta::new(px(LABEL_OFFSET_PX), -px(LABEL_OFFSET_PX)),
            font_size: px(LABEL_FONT_PX),
        });

        Some(Self {
            pixel_ratio,
            line_width: px(HAIRLINE_PX),
            brush: brush_outline,
            source,
            label,
        })
    }
}
