//! Headless host: owns the simulation clock, the scene, and the presented framebuffer.
//!
//! The scene and the last presented framebuffer live in [`SharedScene`] so the
//! renderer can read them while the scheduler holds the host mutably.

use std::sync::Arc;

use parking_lot::Mutex;
use rendseq_core::{SimulationClock, SimulationHost};

use crate::scene::Scene;

/// State shared between the host and the renderer.
pub struct SharedScene {
    pub scene: Mutex<Scene>,
    /// Last presented RGBA frame, `None` before the first present.
    pub framebuffer: Mutex<Option<Arc<Vec<u8>>>>,
    /// Window size in pixels.
    pub size: (u32, u32),
}

pub struct DemoHost {
    clock: SimulationClock,
    shared: Arc<SharedScene>,
    presented: bool,
}

impl DemoHost {
    /// Create a host with a window of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> (Self, Arc<SharedScene>) {
        let shared = Arc::new(SharedScene {
            scene: Mutex::new(Scene::default()),
            framebuffer: Mutex::new(None),
            size: (width, height),
        });
        let host = Self {
            clock: SimulationClock::new(),
            shared: Arc::clone(&shared),
            presented: false,
        };
        (host, shared)
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Simulated seconds the scene has advanced.
    pub fn scene_time(&self) -> f64 {
        self.shared.scene.lock().time()
    }

    /// Start a frame: advance simulated time and update the scene.
    pub fn begin_frame(&mut self, real_delta: f32) {
        let delta = self.clock.advance(real_delta);
        self.shared.scene.lock().advance(delta);
        self.presented = false;
    }

    /// Present the frame if nothing has yet. Called at the settle point and
    /// again at the end of every host frame.
    pub fn end_frame(&mut self) {
        if self.presented {
            return;
        }
        let (width, height) = self.shared.size;
        let pixels = self.shared.scene.lock().rasterize(width, height);
        *self.shared.framebuffer.lock() = Some(Arc::new(pixels));
        self.presented = true;
    }
}

impl SimulationHost for DemoHost {
    fn time_scale(&self) -> f32 {
        self.clock.time_scale()
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.clock.set_time_scale(scale);
    }

    fn lock_frame_rate(&mut self, fps: u32) {
        self.clock.lock_frame_rate(fps);
    }

    async fn settle(&mut self) {
        self.end_frame();
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_frame_presents_once_per_frame() {
        let (mut host, shared) = DemoHost::new(8, 4);
        assert!(shared.framebuffer.lock().is_none());

        host.begin_frame(0.1);
        host.end_frame();
        let first = shared.framebuffer.lock().clone().unwrap();
        assert_eq!(first.len(), 8 * 4 * 4);

        host.end_frame();
        let again = shared.framebuffer.lock().clone().unwrap();
        assert!(Arc::ptr_eq(&first, &again));
    }

    #[test]
    fn frozen_frames_do_not_move_the_scene() {
        let (mut host, shared) = DemoHost::new(8, 8);
        host.lock_frame_rate(25);
        host.begin_frame(1.0);
        let before = shared.scene.lock().time();

        host.set_time_scale(0.0);
        host.begin_frame(1.0);
        assert_eq!(shared.scene.lock().time(), before);
        assert_eq!(host.clock().frame_count(), 2);
    }

    #[tokio::test]
    async fn settle_presents_current_frame() {
        let (mut host, shared) = DemoHost::new(4, 4);
        host.begin_frame(0.0);
        host.settle().await;
        assert!(shared.framebuffer.lock().is_some());
    }
}
