//! Image codec boundary: decode uploads into a raster buffer, encode exports

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use tracing::info;

use crate::error::CodecError;
use crate::surface::RasterBuffer;

/// Decode any format supported by the `image` crate into straight RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<RasterBuffer, CodecError> {
    let rgba = image::load_from_memory(bytes)
        .map_err(CodecError::Decode)?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CodecError::EmptyImage { width, height });
    }

    info!("Decoded image {}x{}", width, height);
    Ok(RasterBuffer::from_rgba8(width, height, rgba.as_raw())?)
}

/// Encode the buffer as PNG
pub fn encode_png(buffer: &RasterBuffer) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            buffer.as_bytes(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(CodecError::Encode)?;
    info!(
        "Encoded {}x{} PNG ({} bytes)",
        buffer.width(),
        buffer.height(),
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_export_decodes_back() {
        let mut buffer = RasterBuffer::new(3, 2);
        buffer.set_pixel(0, 0, [255, 0, 0, 255]);
        buffer.set_pixel(2, 1, [0, 0, 255, 128]);

        let png = encode_png(&buffer).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded, buffer);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
