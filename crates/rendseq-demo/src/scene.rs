//! Animated test scene: a disc orbiting the center over a gradient backdrop.

use std::f32::consts::TAU;

/// Orbit speed in revolutions per simulated second.
const ORBIT_HZ: f32 = 0.5;
/// Orbit radius as a fraction of the shorter image side.
const ORBIT_RADIUS: f32 = 0.3;
/// Disc radius as a fraction of the shorter image side.
const DISC_RADIUS: f32 = 0.08;

const DISC_COLOR: [u8; 4] = [250, 196, 64, 255];

/// Scene state. Everything visible is a pure function of simulated time, so
/// two renders of the same state are identical at any resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scene {
    time: f64,
}

impl Scene {
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Step the simulation by an already time-scaled delta.
    pub fn advance(&mut self, delta: f32) {
        self.time += delta as f64;
    }

    /// Disc center in pixel coordinates for an image of the given size.
    pub fn disc_center(&self, width: u32, height: u32) -> (f32, f32) {
        let angle = self.time as f32 * ORBIT_HZ * TAU;
        let orbit = width.min(height) as f32 * ORBIT_RADIUS;
        (
            width as f32 * 0.5 + angle.cos() * orbit,
            height as f32 * 0.5 + angle.sin() * orbit,
        )
    }

    /// Draw the scene into a fresh RGBA8 buffer.
    pub fn rasterize(&self, width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        let (cx, cy) = self.disc_center(width, height);
        let r = width.min(height) as f32 * DISC_RADIUS;

        for y in 0..height {
            let t = y as f32 / height as f32;
            let backdrop = [
                (20.0 + t * 40.0) as u8,
                (24.0 + t * 60.0) as u8,
                (48.0 + t * 100.0) as u8,
                255,
            ];
            for x in 0..width {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let px = if dx * dx + dy * dy <= r * r {
                    DISC_COLOR
                } else {
                    backdrop
                };
                pixels.extend_from_slice(&px);
            }
        }
        pixels
    }
}
