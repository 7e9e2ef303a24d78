//! PNG/JPEG encoding of captured frames via the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::config::ImageFormat;
use crate::error::CaptureError;
use crate::frame::CapturedFrame;

/// Encode a frame into `format`. `jpeg_quality` is ignored for PNG.
pub fn encode(
    frame: &CapturedFrame,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, CaptureError> {
    if !frame.is_well_formed() {
        return Err(CaptureError::Encode(format!(
            "frame {} buffer holds {} bytes, expected {} for {}x{}",
            frame.frame_index,
            frame.pixels.len(),
            frame.expected_len(),
            frame.width,
            frame.height
        )));
    }

    let mut bytes = Vec::new();
    match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(
                &frame.pixels,
                frame.width,
                frame.height,
                ExtendedColorType::Rgba8,
            )?;
        }
        ImageFormat::Jpeg => {
            // JPEG carries no alpha channel.
            let rgba = RgbaImage::from_raw(frame.width, frame.height, frame.pixels.clone())
                .ok_or_else(|| CaptureError::Encode("pixel buffer too small".to_string()))?;
            let rgb = DynamicImage::ImageRgba8(rgba).into_rgb8();
            JpegEncoder::new_with_quality(&mut bytes, jpeg_quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                frame.width,
                frame.height,
                ExtendedColorType::Rgb8,
            )?;
        }
    }
    Ok(bytes)
}

/// Decode bytes written by [`encode`] back into an RGBA8 frame.
///
/// The frame index is not stored in the image; it is taken from the caller.
pub fn decode(
    bytes: &[u8],
    format: ImageFormat,
    frame_index: u64,
) -> Result<CapturedFrame, CaptureError> {
    let image_format = match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
    };
    let img = image::ImageReader::with_format(Cursor::new(bytes), image_format).decode()?;
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(CapturedFrame::new(width, height, frame_index, rgba.into_raw()))
}
