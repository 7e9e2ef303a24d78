//! Rendseq Core — domain layer for frame sequence capture.
//!
//! This crate decides which frames of a running simulation get captured,
//! freezes simulation time while a frame is read back, and names, encodes and
//! persists the resulting images. Rendering itself and the per-frame loop
//! belong to the host, reached through the [`FrameRenderer`] and
//! [`SimulationHost`] traits.

pub mod clock;
pub mod codec;
pub mod config;
pub mod error;
pub mod frame;
pub mod host;
pub mod output;
pub mod scheduler;
pub mod session;

// Re-exports for convenience.
pub use clock::SimulationClock;
pub use config::{CaptureConfig, CaptureMode, ImageFormat};
pub use error::{CaptureError, ConfigError};
pub use frame::CapturedFrame;
pub use host::{FrameRenderer, SimulationHost};
pub use output::OutputSink;
pub use scheduler::{CaptureOutcome, FrameCaptureScheduler, generate_file_name, should_capture};
pub use session::{CaptureSession, SessionState, SessionStats};
