//! CPU renderer backing both capture modes.

use std::sync::Arc;

use rendseq_core::{CaptureError, CapturedFrame, FrameRenderer};

use crate::host::SharedScene;

pub struct SoftwareRenderer {
    shared: Arc<SharedScene>,
}

impl SoftwareRenderer {
    pub fn new(shared: Arc<SharedScene>) -> Self {
        Self { shared }
    }
}

impl FrameRenderer for SoftwareRenderer {
    fn render_to_buffer(
        &mut self,
        width: u32,
        height: u32,
        _depth_bits: u32,
    ) -> Result<CapturedFrame, CaptureError> {
        let pixels = self.shared.scene.lock().rasterize(width, height);
        Ok(CapturedFrame::new(width, height, 0, pixels))
    }

    fn capture_screen(&mut self, supersize: u32) -> Result<CapturedFrame, CaptureError> {
        let buffer = self
            .shared
            .framebuffer
            .lock()
            .clone()
            .ok_or_else(|| CaptureError::Render("no frame has been presented".to_string()))?;
        let (width, height) = self.shared.size;
        let factor = supersize.max(1);
        let (out_width, out_height) = scaled_size(width, height, factor).ok_or_else(|| {
            CaptureError::Render(format!(
                "{width}x{height} window at supersize {factor} overflows the frame size"
            ))
        })?;
        let pixels = upscale_nearest(&buffer, width, height, factor);
        Ok(CapturedFrame::new(out_width, out_height, 0, pixels))
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Dimensions of a window scaled by `factor`, or `None` when a side
/// overflows `u32` or the RGBA8 byte length overflows `usize`.
fn scaled_size(width: u32, height: u32, factor: u32) -> Option<(u32, u32)> {
    let out_width = width.checked_mul(factor)?;
    let out_height = height.checked_mul(factor)?;
    (out_width as usize)
        .checked_mul(out_height as usize)?
        .checked_mul(4)?;
    Some((out_width, out_height))
}

/// Nearest-neighbour upscale of an RGBA8 buffer by an integer factor.
///
/// Callers check the output size with [`scaled_size`] first.
fn upscale_nearest(src: &[u8], width: u32, height: u32, factor: u32) -> Vec<u8> {
    if factor == 1 {
        return src.to_vec();
    }
    let (w, h, f) = (width as usize, height as usize, factor as usize);
    let mut out = Vec::with_capacity(src.len() * f * f);
    for y in 0..h {
        let row = &src[y * w * 4..(y + 1) * w * 4];
        let mut scaled_row = Vec::with_capacity(row.len() * f);
        for px in row.chunks_exact(4) {
            for _ in 0..f {
                scaled_row.extend_from_slice(px);
            }
        }
        for _ in 0..f {
            out.extend_from_slice(&scaled_row);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::DemoHost;

    #[test]
    fn upscale_repeats_pixels_and_rows() {
        let src = [1, 1, 1, 1, 2, 2, 2, 2];
        let out = upscale_nearest(&src, 2, 1, 2);
        assert_eq!(out.len(), 32);
        assert_eq!(&out[..16], &[1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2]);
        assert_eq!(&out[16..], &out[..16]);
    }

    #[test]
    fn screen_capture_before_present_is_a_render_error() {
        let (_host, shared) = DemoHost::new(4, 4);
        let mut renderer = SoftwareRenderer::new(shared);
        assert!(matches!(
            renderer.capture_screen(1),
            Err(CaptureError::Render(_))
        ));
    }

    #[test]
    fn screen_capture_scales_presented_frame() {
        let (mut host, shared) = DemoHost::new(4, 3);
        host.begin_frame(0.0);
        host.end_frame();

        let mut renderer = SoftwareRenderer::new(shared);
        let frame = renderer.capture_screen(3).unwrap();
        assert_eq!((frame.width, frame.height), (12, 9));
        assert!(frame.is_well_formed());
    }

    #[test]
    fn oversized_supersize_is_a_render_error() {
        let (mut host, shared) = DemoHost::new(640, 360);
        host.begin_frame(0.0);
        host.end_frame();

        let mut renderer = SoftwareRenderer::new(shared);
        assert!(matches!(
            renderer.capture_screen(700_000_000),
            Err(CaptureError::Render(_))
        ));
    }

    #[test]
    fn scaled_size_detects_overflow() {
        assert_eq!(scaled_size(640, 360, 16), Some((10240, 5760)));
        assert_eq!(scaled_size(640, 360, 700_000_000), None);
        assert_eq!(scaled_size(u32::MAX, 1, 2), None);
    }

    #[test]
    fn offscreen_render_uses_requested_size() {
        let (_host, shared) = DemoHost::new(4, 4);
        let mut renderer = SoftwareRenderer::new(shared);
        let frame = renderer.render_to_buffer(32, 18, 24).unwrap();
        assert_eq!((frame.width, frame.height), (32, 18));
        assert!(frame.is_well_formed());
    }
}
