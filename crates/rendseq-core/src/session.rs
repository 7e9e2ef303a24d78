//! Run-time state of one capture session and the time-freeze guard.

use crate::host::SimulationHost;

// ── Session state ───────────────────────────────────────────────────

/// Where a session is in its lifecycle.
///
/// `Idle -> Waiting -> Capturing -> (Waiting | Finished)`. Nothing leaves `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, not ticked yet.
    Idle,
    /// Between captures, or before the first captured frame.
    Waiting,
    /// A pause-capture-resume sequence is in flight.
    Capturing,
    /// Past the last frame of the range.
    Finished,
}

/// Counters reported when a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Frames written to disk.
    pub captured: u64,
    /// Frames whose capture was aborted.
    pub failed: u64,
}

/// Mutable state owned by one capture run.
#[derive(Debug)]
pub struct CaptureSession {
    frame: u64,
    saved_time_scale: Option<f32>,
    state: SessionState,
    stats: SessionStats,
}

impl CaptureSession {
    /// Session whose first tick sees frame `0`.
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub(crate) fn starting_at(frame: u64) -> Self {
        Self {
            frame,
            saved_time_scale: None,
            state: SessionState::Idle,
            stats: SessionStats::default(),
        }
    }

    /// Index the next tick will process.
    pub fn frame_index(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Time-scale recorded before the first capture, if one has happened.
    pub fn saved_time_scale(&self) -> Option<f32> {
        self.saved_time_scale
    }

    pub fn is_running(&self) -> bool {
        self.state != SessionState::Finished
    }

    /// Take the current frame index and move the counter past it.
    ///
    /// Returns `None` once the counter cannot move any further.
    pub(crate) fn advance(&mut self) -> Option<u64> {
        let current = self.frame;
        self.frame = current.checked_add(1)?;
        Some(current)
    }

    pub(crate) fn set_state(&mut self, state: SessionState) {
        if self.state != SessionState::Finished {
            self.state = state;
        }
    }

    pub(crate) fn record_captured(&mut self) {
        self.stats.captured += 1;
    }

    pub(crate) fn record_failed(&mut self) {
        self.stats.failed += 1;
    }

    pub(crate) fn saved_time_scale_mut(&mut self) -> &mut Option<f32> {
        &mut self.saved_time_scale
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

// ── Time freeze ─────────────────────────────────────────────────────

/// Freezes simulation time for as long as it lives.
///
/// The scale to restore is recorded into the session slot on the first
/// capture only and reused afterwards, so a frozen `0.0` is never saved as
/// the value to return to. Dropping the guard restores the scale, whether
/// the capture succeeded, failed, or its future was dropped mid-settle.
pub(crate) struct TimeFreeze<'a, H: SimulationHost> {
    host: &'a mut H,
    restore_to: f32,
}

impl<'a, H: SimulationHost> TimeFreeze<'a, H> {
    pub(crate) fn engage(host: &'a mut H, saved: &mut Option<f32>) -> Self {
        let restore_to = *saved.get_or_insert_with(|| host.time_scale());
        host.set_time_scale(0.0);
        Self { host, restore_to }
    }

    pub(crate) fn host(&mut self) -> &mut H {
        self.host
    }
}

impl<H: SimulationHost> Drop for TimeFreeze<'_, H> {
    fn drop(&mut self) {
        self.host.set_time_scale(self.restore_to);
    }
}
