//! Collaborator traits implemented by the host that owns rendering and the frame loop.

use std::future::Future;

use crate::codec;
use crate::config::ImageFormat;
use crate::error::CaptureError;
use crate::frame::CapturedFrame;

/// Host capability to produce and encode pixel buffers.
///
/// The scheduler only calls into this trait; it never renders anything itself.
pub trait FrameRenderer {
    /// Render the scene into an off-screen buffer of the given size.
    ///
    /// `depth_bits` is the requested depth-buffer precision.
    fn render_to_buffer(
        &mut self,
        width: u32,
        height: u32,
        depth_bits: u32,
    ) -> Result<CapturedFrame, CaptureError>;

    /// Read back what is currently presented on screen, scaled by `supersize`.
    fn capture_screen(&mut self, supersize: u32) -> Result<CapturedFrame, CaptureError>;

    /// Encode a frame. Defaults to the built-in PNG/JPEG codec.
    fn encode(
        &mut self,
        frame: &CapturedFrame,
        format: ImageFormat,
        jpeg_quality: u8,
    ) -> Result<Vec<u8>, CaptureError> {
        codec::encode(frame, format, jpeg_quality)
    }
}

/// Host simulation state the scheduler needs to control during a capture.
pub trait SimulationHost {
    /// Current simulation speed multiplier.
    fn time_scale(&self) -> f32;

    /// Change the simulation speed multiplier. `0.0` freezes the simulation.
    fn set_time_scale(&mut self, scale: f32);

    /// Step simulated time by `1 / fps` per frame instead of following the wall clock.
    fn lock_frame_rate(&mut self, _fps: u32) {}

    /// Resolve once every update for the current frame has been applied and
    /// before the next frame begins. This is the only point at which pixels
    /// may be read back.
    fn settle(&mut self) -> impl Future<Output = ()>;
}
