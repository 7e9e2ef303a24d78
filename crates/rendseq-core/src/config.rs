//! Capture configuration: image size, frame range, output format and location.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default output image width in pixels.
pub const DEFAULT_WIDTH: u32 = 1280;
/// Default output image height in pixels.
pub const DEFAULT_HEIGHT: u32 = 720;
/// Default depth-buffer precision for render-to-texture captures.
pub const DEFAULT_RENDER_DEPTH: u32 = 5;
/// Default captured-footage frame rate.
pub const DEFAULT_FRAME_RATE: u32 = 25;
/// Default first captured frame.
pub const DEFAULT_FIRST_FRAME: u64 = 1;
/// Default last captured frame.
pub const DEFAULT_LAST_FRAME: u64 = 500;
/// Default JPEG quality, matching common engine encoders.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;
/// Output directory used by screen captures when none is configured.
pub const SCREENSHOT_DIR: &str = "Screenshots";
/// Host data path used by render-to-texture captures when none is configured.
pub const DATA_DIR: &str = "Assets";
/// Environment variable that overrides the configured output directory.
pub const OUTPUT_DIR_ENV: &str = "RENDSEQ_OUTPUT_DIR";

const MAX_RENDER_DEPTH: u32 = 32;
/// Largest screen-capture resolution multiplier accepted by [`CaptureConfig::validate`].
pub const MAX_SUPERSIZE: u32 = 16;

/// Encoded image format of the persisted frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG, alpha discarded.
    Jpeg,
}

impl ImageFormat {
    /// File extension written after the frame index.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    /// Human-readable label for log output.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How pixels are obtained from the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureMode {
    /// Read back whatever the host presented on screen.
    #[default]
    ScreenCapture,
    /// Render the scene into an off-screen buffer of the configured size.
    RenderToTexture,
}

impl CaptureMode {
    /// Output directory used when the config leaves it unset.
    pub fn default_output_directory(&self) -> PathBuf {
        match self {
            Self::ScreenCapture => PathBuf::from(SCREENSHOT_DIR),
            Self::RenderToTexture => PathBuf::from(DATA_DIR),
        }
    }
}

/// Immutable settings for one capture session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Output width in pixels (render-to-texture).
    pub image_width: u32,
    /// Output height in pixels (render-to-texture).
    pub image_height: u32,
    /// Depth-buffer bits requested for the off-screen target.
    pub render_depth: u32,
    /// Frames per second of captured footage. The host steps simulated time
    /// by `1 / frame_rate` per frame instead of following the wall clock.
    pub frame_rate: u32,
    /// First frame index written to disk (inclusive).
    pub first_frame: u64,
    /// Last frame index written to disk (inclusive).
    pub last_frame: u64,
    /// Encoded format of each frame.
    pub file_format: ImageFormat,
    /// Quality used when `file_format` is JPEG, 1..=100.
    pub jpeg_quality: u8,
    /// Where pixels come from.
    pub capture_mode: CaptureMode,
    /// Directory receiving the images. See [`CaptureConfig::output_directory`].
    pub output_directory: Option<PathBuf>,
    /// Resolution multiplier for screen captures.
    pub supersize: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            image_width: DEFAULT_WIDTH,
            image_height: DEFAULT_HEIGHT,
            render_depth: DEFAULT_RENDER_DEPTH,
            frame_rate: DEFAULT_FRAME_RATE,
            first_frame: DEFAULT_FIRST_FRAME,
            last_frame: DEFAULT_LAST_FRAME,
            file_format: ImageFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            capture_mode: CaptureMode::default(),
            output_directory: None,
            supersize: 1,
        }
    }
}

impl CaptureConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the output directory with `RENDSEQ_OUTPUT_DIR` when it is set.
    pub fn apply_env_overrides(mut self) -> Self {
        if let Some(dir) = std::env::var_os(OUTPUT_DIR_ENV).filter(|d| !d.is_empty()) {
            self.output_directory = Some(PathBuf::from(dir));
        }
        self
    }

    /// Check the invariants the scheduler relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_frame > self.last_frame {
            return Err(ConfigError::Invalid("first_frame must not exceed last_frame"));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ConfigError::Invalid("image dimensions must be positive"));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be positive"));
        }
        if self.render_depth > MAX_RENDER_DEPTH {
            return Err(ConfigError::Invalid("render_depth must be at most 32"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid("jpeg_quality must be within 1..=100"));
        }
        if !(1..=MAX_SUPERSIZE).contains(&self.supersize) {
            return Err(ConfigError::Invalid("supersize must be within 1..=16"));
        }
        Ok(())
    }

    /// Directory the images are written to, falling back to the
    /// capture mode's default when unset.
    pub fn output_directory(&self) -> PathBuf {
        self.output_directory
            .clone()
            .unwrap_or_else(|| self.capture_mode.default_output_directory())
    }

    /// Number of frames in the capture range.
    pub fn frame_count(&self) -> u64 {
        self.last_frame.saturating_sub(self.first_frame).saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_inspector_values() {
        let cfg = CaptureConfig::default();
        assert_eq!((cfg.image_width, cfg.image_height), (1280, 720));
        assert_eq!(cfg.frame_rate, 25);
        assert_eq!((cfg.first_frame, cfg.last_frame), (1, 500));
        assert_eq!(cfg.file_format, ImageFormat::Png);
        assert_eq!(cfg.capture_mode, CaptureMode::ScreenCapture);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn default_output_directory_depends_on_mode() {
        let mut cfg = CaptureConfig::default();
        assert_eq!(cfg.output_directory(), PathBuf::from("Screenshots"));

        cfg.capture_mode = CaptureMode::RenderToTexture;
        assert_eq!(cfg.output_directory(), PathBuf::from("Assets"));

        cfg.output_directory = Some(PathBuf::from("out/frames"));
        assert_eq!(cfg.output_directory(), PathBuf::from("out/frames"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let cfg = CaptureConfig {
            first_frame: 10,
            last_frame: 9,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_sized_images_are_rejected() {
        let cfg = CaptureConfig {
            image_width: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn jpeg_quality_bounds() {
        let mut cfg = CaptureConfig {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        cfg.jpeg_quality = 100;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn supersize_bounds() {
        let mut cfg = CaptureConfig {
            supersize: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        cfg.supersize = MAX_SUPERSIZE;
        assert!(cfg.validate().is_ok());
        cfg.supersize = MAX_SUPERSIZE + 1;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
        cfg.supersize = 700_000_000;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn single_frame_range_counts_one() {
        let cfg = CaptureConfig {
            first_frame: 7,
            last_frame: 7,
            ..Default::default()
        };
        assert_eq!(cfg.frame_count(), 1);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: CaptureConfig = serde_json::from_str(
            r#"{ "first_frame": 3, "last_frame": 9, "file_format": "jpeg",
                 "capture_mode": "render_to_texture" }"#,
        )
        .unwrap();
        assert_eq!(cfg.first_frame, 3);
        assert_eq!(cfg.last_frame, 9);
        assert_eq!(cfg.file_format, ImageFormat::Jpeg);
        assert_eq!(cfg.capture_mode, CaptureMode::RenderToTexture);
        assert_eq!(cfg.image_width, DEFAULT_WIDTH);
    }

    #[test]
    fn extensions_are_named_not_ordinal() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    }
}
