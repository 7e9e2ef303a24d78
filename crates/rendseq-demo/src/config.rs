//! Capture configuration for the demo: JSON file, then environment, then flags.

use rendseq_core::{CaptureConfig, ConfigError};

use crate::cli::Cli;

/// Build the session config from an optional JSON file, `RENDSEQ_OUTPUT_DIR`,
/// and command-line overrides, in that order.
pub fn resolve(args: &Cli) -> Result<CaptureConfig, ConfigError> {
    let base = match &args.config {
        Some(path) => CaptureConfig::from_json_file(path)?,
        None => CaptureConfig::default(),
    };
    let mut cfg = base.apply_env_overrides();

    if let Some(v) = args.first_frame {
        cfg.first_frame = v;
    }
    if let Some(v) = args.last_frame {
        cfg.last_frame = v;
    }
    if let Some(v) = args.width {
        cfg.image_width = v;
    }
    if let Some(v) = args.height {
        cfg.image_height = v;
    }
    if let Some(v) = args.frame_rate {
        cfg.frame_rate = v;
    }
    if let Some(v) = args.format {
        cfg.file_format = v.into();
    }
    if let Some(v) = args.jpeg_quality {
        cfg.jpeg_quality = v;
    }
    if let Some(v) = args.mode {
        cfg.capture_mode = v.into();
    }
    if let Some(v) = &args.output {
        cfg.output_directory = Some(v.clone());
    }
    if let Some(v) = args.supersize {
        cfg.supersize = v;
    }

    cfg.validate()?;
    Ok(cfg)
}
