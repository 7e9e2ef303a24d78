//! Pixel buffer produced by a single capture.

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// One frame read back from the host, RGBA8, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Index of the simulation frame these pixels show.
    pub frame_index: u64,
    /// Pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl CapturedFrame {
    pub fn new(width: u32, height: u32, frame_index: u64, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            frame_index,
            pixels,
        }
    }

    /// A frame filled with a single RGBA color.
    pub fn solid(width: u32, height: u32, frame_index: u64, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self::new(width, height, frame_index, pixels)
    }

    /// Byte length the pixel buffer must have for its dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }

    /// Whether the buffer length agrees with the dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0 && self.height > 0 && self.pixels.len() == self.expected_len()
    }
}
