//! Brush settings and the circular clone mask

use retouch_config::{BrushDefaults, MAX_BRUSH_SIZE};

use crate::constants::HARD_EDGE_THRESHOLD;

/// Brush parameters read by the clone stamp
///
/// Only the session mutates these (on UI commands); the engine reads them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSettings {
    /// Diameter in pixels, 1..=MAX_BRUSH_SIZE
    size: u32,
    /// Stroke opacity 0.0-1.0
    opacity: f32,
    /// Hardness: 0.0 = soft, 1.0 = hard
    hardness: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::from(BrushDefaults::default())
    }
}

impl From<BrushDefaults> for BrushSettings {
    fn from(defaults: BrushDefaults) -> Self {
        Self::new(defaults.size, defaults.opacity, defaults.hardness)
    }
}

impl BrushSettings {
    /// Create brush settings, clamping every value into range
    pub fn new(size: u32, opacity: f32, hardness: f32) -> Self {
        let mut settings = Self {
            size: 1,
            opacity: 1.0,
            hardness: 1.0,
        };
        settings.set_size(size);
        settings.set_opacity(opacity);
        settings.set_hardness(hardness);
        settings
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    #[inline]
    pub fn hardness(&self) -> f32 {
        self.hardness
    }

    /// Brush radius in image pixels
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size as f32 / 2.0
    }

    /// Set the diameter, clamped to `1..=MAX_BRUSH_SIZE`
    pub fn set_size(&mut self, size: u32) {
        self.size = size.clamp(1, MAX_BRUSH_SIZE);
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = clamp_unit(opacity);
    }

    pub fn set_hardness(&mut self, hardness: f32) {
        self.hardness = clamp_unit(hardness);
    }

    /// Whether the mask is a plain disc without feather
    #[inline]
    pub fn is_hard_edged(&self) -> bool {
        self.hardness >= HARD_EDGE_THRESHOLD
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Mask alpha at `distance` from the brush centre
///
/// Hard brushes (hardness >= 0.99) are a disc: 1 strictly inside `radius`,
/// 0 from `radius` outwards. Softer brushes keep a solid core of
/// `radius * (1 - hardness)` and fall off linearly to 0 at `radius`.
#[inline]
pub fn mask_alpha(distance: f32, radius: f32, hardness: f32) -> f32 {
    if radius <= 0.0 || distance >= radius {
        return 0.0;
    }
    if hardness >= HARD_EDGE_THRESHOLD {
        return 1.0;
    }

    let core = radius * (1.0 - hardness).clamp(0.0, 1.0);
    if distance <= core {
        return 1.0;
    }
    ((radius - distance) / (radius - core)).clamp(0.0, 1.0)
}

/// Precomputed `size x size` alpha mask, centred in its square
#[derive(Debug, Clone, PartialEq)]
pub struct BrushMask {
    size: u32,
    alpha: Vec<f32>,
}

impl BrushMask {
    /// Build the mask for the given brush; samples are taken at pixel centres
    pub fn new(brush: &BrushSettings) -> Self {
        let size = brush.size();
        let radius = brush.radius();
        let hardness = if brush.is_hard_edged() { 1.0 } else { brush.hardness() };

        let mut alpha = Vec::with_capacity((size as usize) * (size as usize));
        for py in 0..size {
            for px in 0..size {
                let dx = (px as f32 + 0.5) - radius;
                let dy = (py as f32 + 0.5) - radius;
                alpha.push(mask_alpha((dx * dx + dy * dy).sqrt(), radius, hardness));
            }
        }

        Self { size, alpha }
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Alpha at mask pixel (x, y), 0 outside the square
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.size || y >= self.size {
            return 0.0;
        }
        self.alpha[(y as usize) * (self.size as usize) + x as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brush_settings_default() {
        let brush = BrushSettings::default();
        assert_eq!(brush.size(), 30);
        assert_eq!(brush.opacity(), 1.0);
        assert_eq!(brush.hardness(), 0.8);
        assert_eq!(brush.radius(), 15.0);
    }

    #[test]
    fn test_brush_settings_clamped() {
        let brush = BrushSettings::new(0, 1.5, -0.2);
        assert_eq!(brush.size(), 1);
        assert_eq!(brush.opacity(), 1.0);
        assert_eq!(brush.hardness(), 0.0);

        let brush = BrushSettings::new(10, f32::NAN, 0.5);
        assert_eq!(brush.opacity(), 0.0);
    }

    #[test]
    fn test_brush_size_upper_bound() {
        let mut brush = BrushSettings::new(u32::MAX, 1.0, 0.8);
        assert_eq!(brush.size(), MAX_BRUSH_SIZE);

        brush.set_size(MAX_BRUSH_SIZE + 1);
        assert_eq!(brush.size(), MAX_BRUSH_SIZE);

        let mask = BrushMask::new(&brush);
        assert_eq!(mask.size(), MAX_BRUSH_SIZE);
    }

    #[test]
    fn test_hard_mask_has_no_feather() {
        let r = 10.0;
        for step in 0..100 {
            let d = step as f32 * 0.0999;
            assert_eq!(mask_alpha(d, r, 1.0), 1.0, "distance {d}");
        }
        assert_eq!(mask_alpha(r, r, 1.0), 0.0);
        assert_eq!(mask_alpha(r + 0.5, r, 1.0), 0.0);
        // 0.99 counts as hard
        assert_eq!(mask_alpha(9.9, r, 0.99), 1.0);
    }

    #[test]
    fn test_soft_mask_monotonic() {
        let r = 12.0;
        for hardness in [0.0, 0.3, 0.8, 0.98] {
            let mut previous = mask_alpha(0.0, r, hardness);
            assert_eq!(previous, 1.0);
            for step in 1..=120 {
                let d = step as f32 * 0.1;
                let alpha = mask_alpha(d, r, hardness);
                assert!(alpha <= previous, "alpha rose at distance {d}, hardness {hardness}");
                previous = alpha;
            }
            assert_eq!(mask_alpha(r, r, hardness), 0.0);
        }
    }

    #[test]
    fn test_soft_mask_core() {
        let r = 10.0;
        // hardness 0.8 keeps a solid core of 2px and feathers the remaining 8px
        assert_eq!(mask_alpha(1.9, r, 0.8), 1.0);
        assert!((mask_alpha(3.0, r, 0.8) - 0.875).abs() < 1e-5);
        assert!((mask_alpha(6.0, r, 0.8) - 0.5).abs() < 1e-5);
        assert_eq!(mask_alpha(10.0, r, 0.8), 0.0);

        // Softer brushes feather wider
        assert!(mask_alpha(6.0, r, 0.9) < mask_alpha(6.0, r, 0.8));
    }

    #[test]
    fn test_brush_mask_shape() {
        let mask = BrushMask::new(&BrushSettings::new(10, 1.0, 1.0));
        assert_eq!(mask.size(), 10);
        // Centre pixels are solid, corners are outside the disc
        assert_eq!(mask.get(4, 4), 1.0);
        assert_eq!(mask.get(5, 5), 1.0);
        assert_eq!(mask.get(0, 0), 0.0);
        assert_eq!(mask.get(9, 9), 0.0);
        assert_eq!(mask.get(10, 0), 0.0);
    }

    #[test]
    fn test_single_pixel_mask() {
        let mask = BrushMask::new(&BrushSettings::new(1, 1.0, 0.0));
        assert_eq!(mask.size(), 1);
        assert_eq!(mask.get(0, 0), 1.0);
    }
}
