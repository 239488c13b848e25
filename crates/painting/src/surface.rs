//! CPU raster buffer for the document - straight (non-premultiplied) RGBA8

use crate::error::SurfaceError;
use crate::history::HistorySnapshot;

/// One RGBA8 pixel
pub type Rgba8 = [u8; 4];

/// Fully transparent pixel, returned for reads outside the buffer
pub const TRANSPARENT: Rgba8 = [0, 0, 0, 0];

/// The mutable document pixel grid
///
/// Stores pixels in row-major order. Region reads outside the bounds sample
/// as [`TRANSPARENT`] and writes outside the bounds are clipped, matching the
/// usual 2D canvas semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
}

impl RasterBuffer {
    /// Create a new buffer with the given dimensions, initialized to transparent black
    pub fn new(width: u32, height: u32) -> Self {
        let pixel_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            pixels: vec![TRANSPARENT; pixel_count],
        }
    }

    /// Wrap a tightly packed RGBA8 byte buffer
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, SurfaceError> {
        let expected = (width as usize) * (height as usize);
        if bytes.len() != expected * 4 {
            return Err(SurfaceError::RegionSize {
                width,
                height,
                expected,
                actual: bytes.len() / 4,
            });
        }
        let pixels = bytemuck::cast_slice::<u8, Rgba8>(bytes).to_vec();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Replace the whole buffer with a newly decoded image
    ///
    /// The buffer takes the image's natural dimensions.
    pub fn load_from(&mut self, decoded: RasterBuffer) {
        *self = decoded;
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get a pixel, None if out of bounds
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        self.index(x as i64, y as i64).map(|i| self.pixels[i])
    }

    /// Set a pixel. Does nothing if out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba8) {
        if let Some(i) = self.index(x as i64, y as i64) {
            self.pixels[i] = color;
        }
    }

    /// Read a pixel at signed coordinates, transparent outside the buffer
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> Rgba8 {
        self.index(x, y).map_or(TRANSPARENT, |i| self.pixels[i])
    }

    /// Read a `width x height` region whose top-left may lie outside the buffer
    pub fn read_region(&self, x: i64, y: i64, width: u32, height: u32) -> Vec<Rgba8> {
        let mut out = Vec::new();
        self.read_region_into(x, y, width, height, &mut out);
        out
    }

    /// Like [`Self::read_region`] but reuses `out`
    pub fn read_region_into(&self, x: i64, y: i64, width: u32, height: u32, out: &mut Vec<Rgba8>) {
        out.clear();
        out.reserve((width as usize) * (height as usize));
        for row in 0..height as i64 {
            for col in 0..width as i64 {
                out.push(self.sample(x + col, y + row));
            }
        }
    }

    /// Write a `width x height` region. The out-of-bounds part is clipped.
    pub fn write_region(
        &mut self,
        x: i64,
        y: i64,
        width: u32,
        height: u32,
        pixels: &[Rgba8],
    ) -> Result<(), SurfaceError> {
        let expected = (width as usize) * (height as usize);
        if pixels.len() != expected {
            return Err(SurfaceError::RegionSize {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        for row in 0..height as i64 {
            for col in 0..width as i64 {
                if let Some(i) = self.index(x + col, y + row) {
                    self.pixels[i] = pixels[(row as usize) * (width as usize) + col as usize];
                }
            }
        }
        Ok(())
    }

    /// Composite a color onto an existing pixel with "source-over"
    ///
    /// `alpha` is the effective source alpha (0-1).
    /// Formula: out_rgb = src * a + dst * (1 - a), out_a = a + dst_a * (1 - a)
    #[inline]
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba8, alpha: f32) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let src_alpha = alpha.clamp(0.0, 1.0);
        if src_alpha <= 0.0 {
            return;
        }
        let inv_src_alpha = 1.0 - src_alpha;
        let dst = self.pixels[index];

        let channel = |s: u8, d: u8| to_u8(s as f32 * src_alpha + d as f32 * inv_src_alpha);
        let dst_alpha = dst[3] as f32 / 255.0;

        self.pixels[index] = [
            channel(color[0], dst[0]),
            channel(color[1], dst[1]),
            channel(color[2], dst[2]),
            to_u8((src_alpha + dst_alpha * inv_src_alpha) * 255.0),
        ];
    }

    /// Deep copy of the whole grid for the undo history
    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::new(self.width, self.height, self.pixels.clone().into_boxed_slice())
    }

    /// Overwrite the grid from a snapshot of the same dimensions
    pub fn restore(&mut self, snapshot: &HistorySnapshot) -> Result<(), SurfaceError> {
        if snapshot.dimensions() != self.dimensions() {
            return Err(SurfaceError::DimensionMismatch {
                expected: self.dimensions(),
                actual: snapshot.dimensions(),
            });
        }
        self.pixels.copy_from_slice(snapshot.pixels());
        Ok(())
    }

    /// Get the total number of pixels
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Read-only access to the pixel grid (export, display upload)
    #[inline]
    pub fn pixels(&self) -> &[Rgba8] {
        &self.pixels
    }

    /// Pixel data as tightly packed RGBA8 bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = RasterBuffer::new(100, 50);
        assert_eq!(buffer.dimensions(), (100, 50));
        assert_eq!(buffer.pixel_count(), 5000);
        assert_eq!(buffer.get_pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_get_set_pixel() {
        let mut buffer = RasterBuffer::new(10, 10);
        buffer.set_pixel(5, 5, [255, 128, 64, 255]);
        assert_eq!(buffer.get_pixel(5, 5), Some([255, 128, 64, 255]));

        // Out of bounds should return None
        assert_eq!(buffer.get_pixel(100, 100), None);
        buffer.set_pixel(100, 100, [1, 2, 3, 4]);
    }

    #[test]
    fn test_from_rgba8_length_checked() {
        let err = RasterBuffer::from_rgba8(2, 2, &[0; 12]).unwrap_err();
        assert!(matches!(err, SurfaceError::RegionSize { expected: 4, actual: 3, .. }));

        let buffer = RasterBuffer::from_rgba8(1, 2, &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(buffer.get_pixel(0, 1), Some([5, 6, 7, 8]));
    }

    #[test]
    fn test_read_region_outside_is_transparent() {
        let mut buffer = RasterBuffer::new(4, 4);
        buffer.set_pixel(0, 0, [9, 9, 9, 255]);

        let region = buffer.read_region(-1, -1, 2, 2);
        assert_eq!(region, vec![TRANSPARENT, TRANSPARENT, TRANSPARENT, [9, 9, 9, 255]]);

        let region = buffer.read_region(10, 10, 3, 3);
        assert!(region.iter().all(|p| *p == TRANSPARENT));
        assert_eq!(region.len(), 9);
    }

    #[test]
    fn test_write_region_clips() {
        let mut buffer = RasterBuffer::new(4, 4);
        let red = [255, 0, 0, 255];
        buffer.write_region(3, 3, 2, 2, &[red; 4]).unwrap();

        assert_eq!(buffer.get_pixel(3, 3), Some(red));
        assert_eq!(buffer.get_pixel(2, 2), Some(TRANSPARENT));
    }

    #[test]
    fn test_write_region_rejects_wrong_length() {
        let mut buffer = RasterBuffer::new(4, 4);
        assert!(buffer.write_region(0, 0, 2, 2, &[TRANSPARENT; 3]).is_err());
    }

    #[test]
    fn test_blend_pixel() {
        let mut buffer = RasterBuffer::new(10, 10);
        buffer.write_region(0, 0, 10, 10, &[[255, 255, 255, 255]; 100]).unwrap();

        // Blend 50% opaque red onto white
        buffer.blend_pixel(5, 5, [255, 0, 0, 255], 0.5);

        let result = buffer.get_pixel(5, 5).unwrap();
        assert_eq!(result[0], 255);
        assert!((result[1] as i32 - 128).abs() <= 1);
        assert!((result[2] as i32 - 128).abs() <= 1);
        assert_eq!(result[3], 255);
    }

    #[test]
    fn test_blend_pixel_onto_transparent() {
        let mut buffer = RasterBuffer::new(1, 1);
        buffer.blend_pixel(0, 0, [0, 0, 255, 255], 0.25);
        let result = buffer.get_pixel(0, 0).unwrap();
        // out_a = 0.25 + 0 * 0.75
        assert!((result[3] as i32 - 64).abs() <= 1);
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut buffer = RasterBuffer::new(2, 2);
        let snapshot = buffer.snapshot();
        buffer.set_pixel(0, 0, [1, 2, 3, 4]);

        assert_eq!(snapshot.pixels()[0], TRANSPARENT);
        buffer.restore(&snapshot).unwrap();
        assert_eq!(buffer.get_pixel(0, 0), Some(TRANSPARENT));
    }

    #[test]
    fn test_restore_dimension_mismatch() {
        let mut buffer = RasterBuffer::new(2, 2);
        let other = RasterBuffer::new(3, 2).snapshot();
        let err = buffer.restore(&other).unwrap_err();
        assert_eq!(
            err,
            SurfaceError::DimensionMismatch {
                expected: (2, 2),
                actual: (3, 2),
            }
        );
    }

    #[test]
    fn test_as_bytes() {
        let buffer = RasterBuffer::new(2, 2);
        // 4 pixels * 4 bytes
        assert_eq!(buffer.as_bytes().len(), 16);
    }
}
