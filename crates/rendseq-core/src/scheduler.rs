//! Per-frame capture policy.
//!
//! The host calls [`FrameCaptureScheduler::init_session`] once and then
//! [`FrameCaptureScheduler::tick`] once per frame from its own loop. Each tick
//! either waits, captures exactly one frame, or reports that the range is done.
//! A capture freezes simulation time, waits for the host's settle point,
//! reads back and encodes the frame, writes it, and restores time.

use std::path::Path;

use crate::config::{CaptureConfig, CaptureMode};
use crate::error::{CaptureError, ConfigError};
use crate::host::{FrameRenderer, SimulationHost};
use crate::output::OutputSink;
use crate::session::{CaptureSession, SessionState, TimeFreeze};

// ── Outcome ─────────────────────────────────────────────────────────

/// Result of one scheduler tick.
#[derive(Debug)]
pub enum CaptureOutcome {
    /// The frame is before the capture range.
    Waiting,
    /// The frame was written under this file name.
    Captured(String),
    /// The frame was in range but its capture was aborted. The session continues.
    Failed {
        frame_index: u64,
        error: CaptureError,
    },
    /// The range is exhausted. Every later tick returns this too.
    Finished,
}

impl CaptureOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

// ── Policy ──────────────────────────────────────────────────────────

/// Whether `frame_index` lies in the inclusive capture range.
pub fn should_capture(frame_index: u64, config: &CaptureConfig) -> bool {
    (config.first_frame..=config.last_frame).contains(&frame_index)
}

/// Build an output file name, `"{identifier}.{extension}"`.
pub fn generate_file_name(identifier: &str, extension: &str) -> String {
    format!("{identifier}.{extension}")
}

// ── Scheduler ───────────────────────────────────────────────────────

/// Drives the capture sequence for one session.
#[derive(Debug)]
pub struct FrameCaptureScheduler {
    config: CaptureConfig,
    sink: OutputSink,
}

impl FrameCaptureScheduler {
    /// Start a session: validate the config, lock the host to the capture
    /// frame rate, and create the output directory.
    ///
    /// A directory that cannot be created is not fatal here. It is logged,
    /// and every capture reports it until creation succeeds.
    pub fn init_session<H: SimulationHost>(
        config: CaptureConfig,
        host: &mut H,
    ) -> Result<(Self, CaptureSession), ConfigError> {
        config.validate()?;
        host.lock_frame_rate(config.frame_rate);
        let sink = OutputSink::prepare(config.output_directory());

        tracing::info!(
            "Capture session started: frames {}..={} as {} into {}",
            config.first_frame,
            config.last_frame,
            config.file_format,
            sink.directory().display()
        );

        Ok((Self { config, sink }, CaptureSession::new()))
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn output_directory(&self) -> &Path {
        self.sink.directory()
    }

    /// Process one host frame.
    ///
    /// Never fails: capture errors are logged and returned as
    /// [`CaptureOutcome::Failed`]. Time-scale is restored before this
    /// returns, and also if the returned future is dropped while suspended.
    pub async fn tick<H, R>(
        &mut self,
        session: &mut CaptureSession,
        host: &mut H,
        renderer: &mut R,
    ) -> CaptureOutcome
    where
        H: SimulationHost,
        R: FrameRenderer,
    {
        if session.state() == SessionState::Finished {
            return CaptureOutcome::Finished;
        }

        // The counter moves on across the settle point; name the file after
        // the index taken here.
        let Some(frame_index) = session.advance() else {
            return finish(session);
        };

        if frame_index > self.config.last_frame {
            return finish(session);
        }

        if !should_capture(frame_index, &self.config) {
            session.set_state(SessionState::Waiting);
            return CaptureOutcome::Waiting;
        }

        session.set_state(SessionState::Capturing);
        let result = {
            let mut freeze = TimeFreeze::engage(host, session.saved_time_scale_mut());
            freeze.host().settle().await;
            self.capture(frame_index, renderer)
        };
        session.set_state(SessionState::Waiting);

        match result {
            Ok(file_name) => {
                session.record_captured();
                tracing::debug!("Frame {frame_index} saved as {file_name}");
                CaptureOutcome::Captured(file_name)
            }
            Err(error) => {
                session.record_failed();
                tracing::warn!("Frame {frame_index} capture aborted: {error}");
                CaptureOutcome::Failed { frame_index, error }
            }
        }
    }

    fn capture<R: FrameRenderer>(
        &mut self,
        frame_index: u64,
        renderer: &mut R,
    ) -> Result<String, CaptureError> {
        let cfg = &self.config;
        let mut frame = match cfg.capture_mode {
            CaptureMode::RenderToTexture => {
                renderer.render_to_buffer(cfg.image_width, cfg.image_height, cfg.render_depth)?
            }
            CaptureMode::ScreenCapture => renderer.capture_screen(cfg.supersize)?,
        };
        frame.frame_index = frame_index;

        let bytes = renderer.encode(&frame, cfg.file_format, cfg.jpeg_quality)?;
        drop(frame);

        let file_name = generate_file_name(&frame_index.to_string(), cfg.file_format.extension());
        self.sink.write(&file_name, &bytes)?;
        Ok(file_name)
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn finish(session: &mut CaptureSession) -> CaptureOutcome {
    session.set_state(SessionState::Finished);
    let stats = session.stats();
    tracing::info!(
        "Capture session finished: {} captured, {} failed",
        stats.captured,
        stats.failed
    );
    CaptureOutcome::Finished
}
