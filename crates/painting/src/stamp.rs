//! Clone stamp engine
//!
//! Each sample copies a brush-sized square from the source side of the
//! stroke into a scratch buffer, masks it with the soft circular brush and
//! composites it "source-over" onto the target. The source-to-target offset
//! is fixed when the stroke starts, so the whole stroke paints with the same
//! spatial relationship.

use tracing::debug;

use crate::brush::{BrushMask, BrushSettings};
use crate::coords::ImagePoint;
use crate::surface::{RasterBuffer, Rgba8};

/// What a single clone sample did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampSample {
    /// Brush centre on the target side
    pub target: ImagePoint,
    /// Brush centre on the source side (`source + (target - drag_start)`)
    pub source: ImagePoint,
    /// Affected region (x, y, width, height), None if entirely off the buffer
    pub region: Option<(u32, u32, u32, u32)>,
}

/// Sampling/mask/compositing state reused across samples
#[derive(Debug, Default)]
pub struct CloneStampEngine {
    /// Copied source pixels for the current sample
    scratch: Vec<Rgba8>,
    /// Mask cached for the brush it was built from
    mask: Option<(BrushSettings, BrushMask)>,
}

impl CloneStampEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source-side point sampled for `target` in a stroke that began at `drag_start`
    #[inline]
    pub fn sample_origin(
        source: ImagePoint,
        drag_start: ImagePoint,
        target: ImagePoint,
    ) -> ImagePoint {
        source + (target - drag_start)
    }

    /// Run one clone sample at `target`
    pub fn stamp(
        &mut self,
        buffer: &mut RasterBuffer,
        brush: &BrushSettings,
        source: ImagePoint,
        drag_start: ImagePoint,
        target: ImagePoint,
    ) -> StampSample {
        let size = brush.size();
        let radius = brush.radius();
        let sample_at = Self::sample_origin(source, drag_start, target);

        // Integer placement: the target square is snapped to the pixel grid and
        // the source square keeps a whole-pixel offset from it, so every sample
        // of the stroke copies with exactly the same displacement.
        let offset = (source - drag_start).0.round();
        let target_x = (target.x() - radius).round() as i64;
        let target_y = (target.y() - radius).round() as i64;
        let source_x = target_x + offset.x as i64;
        let source_y = target_y + offset.y as i64;

        debug!(
            "CloneStamp: target=({:.1}, {:.1}) source=({:.1}, {:.1}) size={} opacity={:.2} \
             hardness={:.2}",
            target.x(),
            target.y(),
            sample_at.x(),
            sample_at.y(),
            size,
            brush.opacity(),
            brush.hardness()
        );

        // 1. Copy source pixels (transparent outside the buffer) before touching
        //    the target, since the two squares may overlap.
        buffer.read_region_into(source_x, source_y, size, size, &mut self.scratch);

        // 2. Mask, 3. composite with stroke opacity
        let mask = cached_mask(&mut self.mask, brush);
        let opacity = brush.opacity();
        for py in 0..size {
            for px in 0..size {
                let src = self.scratch[(py as usize) * (size as usize) + px as usize];
                let alpha = (src[3] as f32 / 255.0) * mask.get(px, py) * opacity;
                if alpha > 0.0 {
                    buffer.blend_pixel(target_x + px as i64, target_y + py as i64, src, alpha);
                }
            }
        }

        let region = clip_region(buffer, target_x, target_y, size);
        if region.is_none() {
            debug!("  -> sample outside buffer bounds");
        }

        StampSample {
            target,
            source: sample_at,
            region,
        }
    }
}

/// Return the cached mask, rebuilding it if the brush shape changed
fn cached_mask<'a>(
    cache: &'a mut Option<(BrushSettings, BrushMask)>,
    brush: &BrushSettings,
) -> &'a BrushMask {
    let fresh = matches!(
        &*cache,
        Some((built_for, _))
            if built_for.size() == brush.size() && built_for.hardness() == brush.hardness()
    );
    if !fresh {
        *cache = Some((*brush, BrushMask::new(brush)));
    }
    let (_, mask) = cache.get_or_insert_with(|| (*brush, BrushMask::new(brush)));
    mask
}

/// Intersect a `size x size` square at (x, y) with the buffer bounds
fn clip_region(buffer: &RasterBuffer, x: i64, y: i64, size: u32) -> Option<(u32, u32, u32, u32)> {
    let x_min = x.max(0);
    let y_min = y.max(0);
    let x_max = (x + size as i64).min(buffer.width() as i64);
    let y_max = (y + size as i64).min(buffer.height() as i64);

    if x_min >= x_max || y_min >= y_max {
        return None;
    }
    Some((
        x_min as u32,
        y_min as u32,
        (x_max - x_min) as u32,
        (y_max - y_min) as u32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opaque image where every pixel encodes its own coordinates
    fn gradient(width: u32, height: u32) -> RasterBuffer {
        let mut buffer = RasterBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                buffer.set_pixel(x, y, [x as u8, y as u8, 7, 255]);
            }
        }
        buffer
    }

    fn hard_brush(size: u32) -> BrushSettings {
        BrushSettings::new(size, 1.0, 1.0)
    }

    #[test]
    fn test_sample_origin_keeps_displacement() {
        let source = ImagePoint::new(20.0, 20.0);
        let drag_start = ImagePoint::new(60.0, 60.0);

        let s1 = CloneStampEngine::sample_origin(source, drag_start, ImagePoint::new(60.0, 60.0));
        let s2 = CloneStampEngine::sample_origin(source, drag_start, ImagePoint::new(65.0, 62.0));
        assert_eq!(s1, ImagePoint::new(20.0, 20.0));
        assert_eq!(s2, ImagePoint::new(25.0, 22.0));
    }

    #[test]
    fn test_stamp_reports_source_per_sample() {
        let mut buffer = gradient(100, 100);
        let mut engine = CloneStampEngine::new();
        let brush = hard_brush(10);
        let source = ImagePoint::new(20.0, 20.0);
        let drag_start = ImagePoint::new(60.0, 60.0);

        let t1 = ImagePoint::new(61.0, 63.0);
        let t2 = ImagePoint::new(70.0, 58.0);
        let first = engine.stamp(&mut buffer, &brush, source, drag_start, t1);
        let second = engine.stamp(&mut buffer, &brush, source, drag_start, t2);

        assert_eq!(first.source - first.target, source - drag_start);
        assert_eq!(second.source - second.target, source - drag_start);
        assert_eq!(second.source, ImagePoint::new(30.0, 18.0));
    }

    #[test]
    fn test_hard_opaque_stamp_copies_pixels() {
        let original = gradient(100, 100);
        let mut buffer = original.clone();
        let mut engine = CloneStampEngine::new();

        let sample = engine.stamp(
            &mut buffer,
            &hard_brush(10),
            ImagePoint::new(20.0, 20.0),
            ImagePoint::new(60.0, 60.0),
            ImagePoint::new(60.0, 60.0),
        );

        assert_eq!(sample.region, Some((55, 55, 10, 10)));
        // Centre of the disc carries the source pixel
        assert_eq!(buffer.get_pixel(60, 60), original.get_pixel(20, 20));
        assert_eq!(buffer.get_pixel(58, 61), original.get_pixel(18, 21));
        // Corner of the square is outside the disc and untouched
        assert_eq!(buffer.get_pixel(55, 55), original.get_pixel(55, 55));
        // Outside the square untouched
        assert_eq!(buffer.get_pixel(70, 60), original.get_pixel(70, 60));
    }

    #[test]
    fn test_opacity_blends() {
        let mut buffer = RasterBuffer::new(40, 40);
        buffer.write_region(0, 0, 40, 40, &[[0, 0, 0, 255]; 1600]).unwrap();
        buffer.write_region(0, 0, 10, 10, &[[200, 100, 50, 255]; 100]).unwrap();
        let mut engine = CloneStampEngine::new();

        engine.stamp(
            &mut buffer,
            &BrushSettings::new(6, 0.5, 1.0),
            ImagePoint::new(5.0, 5.0),
            ImagePoint::new(25.0, 25.0),
            ImagePoint::new(25.0, 25.0),
        );

        assert_eq!(buffer.get_pixel(25, 25), Some([100, 50, 25, 255]));
    }

    #[test]
    fn test_soft_edge_fades() {
        let mut buffer = RasterBuffer::new(60, 60);
        buffer.write_region(0, 0, 30, 60, &[[255, 255, 255, 255]; 1800]).unwrap();
        buffer.write_region(30, 0, 30, 60, &[[0, 0, 0, 255]; 1800]).unwrap();
        let mut engine = CloneStampEngine::new();

        engine.stamp(
            &mut buffer,
            &BrushSettings::new(20, 1.0, 0.9),
            ImagePoint::new(15.0, 30.0),
            ImagePoint::new(45.0, 30.0),
            ImagePoint::new(45.0, 30.0),
        );

        let centre = buffer.get_pixel(45, 30).unwrap()[0];
        let near_edge = buffer.get_pixel(53, 30).unwrap()[0];
        assert!(centre > 200, "centre {centre}");
        assert!(near_edge > 0 && near_edge < centre, "edge {near_edge}");
        assert_eq!(buffer.get_pixel(56, 30).unwrap()[0], 0);
    }

    #[test]
    fn test_source_outside_bounds_is_transparent() {
        let original = gradient(50, 50);
        let mut buffer = original.clone();
        let mut engine = CloneStampEngine::new();

        // Source entirely off the image: nothing is painted
        engine.stamp(
            &mut buffer,
            &hard_brush(8),
            ImagePoint::new(-100.0, -100.0),
            ImagePoint::new(25.0, 25.0),
            ImagePoint::new(25.0, 25.0),
        );
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_target_partially_outside() {
        let mut buffer = gradient(50, 50);
        let mut engine = CloneStampEngine::new();

        let sample = engine.stamp(
            &mut buffer,
            &hard_brush(10),
            ImagePoint::new(20.0, 20.0),
            ImagePoint::new(2.0, 2.0),
            ImagePoint::new(2.0, 2.0),
        );
        assert_eq!(sample.region, Some((0, 0, 7, 7)));

        let off = engine.stamp(
            &mut buffer,
            &hard_brush(10),
            ImagePoint::new(20.0, 20.0),
            ImagePoint::new(2.0, 2.0),
            ImagePoint::new(200.0, 200.0),
        );
        assert_eq!(off.region, None);
    }

    #[test]
    fn test_overlapping_source_and_target() {
        let original = gradient(40, 40);
        let mut buffer = original.clone();
        let mut engine = CloneStampEngine::new();

        // Source square overlaps target square; the copy must use pre-sample pixels
        engine.stamp(
            &mut buffer,
            &hard_brush(10),
            ImagePoint::new(20.0, 20.0),
            ImagePoint::new(22.0, 20.0),
            ImagePoint::new(22.0, 20.0),
        );
        assert_eq!(buffer.get_pixel(22, 20), original.get_pixel(20, 20));
        assert_eq!(buffer.get_pixel(24, 20), original.get_pixel(22, 20));
    }
}
