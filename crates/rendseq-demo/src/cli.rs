//! Command-line arguments.
//!
//! Every capture field is optional so a JSON config can supply it; flags that
//! are given override the file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use rendseq_core::{CaptureMode, ImageFormat};

#[derive(Parser, Debug, Clone)]
#[command(name = "rendseq-demo")]
#[command(about = "Capture an animated test scene to an image sequence", long_about = None)]
pub struct Cli {
    /// JSON capture config. Flags below override its fields.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// First frame written to disk
    #[arg(long)]
    pub first_frame: Option<u64>,

    /// Last frame written to disk
    #[arg(long)]
    pub last_frame: Option<u64>,

    /// Off-screen render width
    #[arg(long)]
    pub width: Option<u32>,

    /// Off-screen render height
    #[arg(long)]
    pub height: Option<u32>,

    /// Frames per second of captured footage
    #[arg(long)]
    pub frame_rate: Option<u32>,

    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Output directory (overrides RENDSEQ_OUTPUT_DIR)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Screen capture resolution multiplier
    #[arg(long)]
    pub supersize: Option<u32>,

    /// Window width used for screen captures
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..))]
    pub window_width: u32,

    /// Window height used for screen captures
    #[arg(long, default_value_t = 360, value_parser = clap::value_parser!(u32).range(1..))]
    pub window_height: u32,

    /// Pace the loop to the capture frame rate instead of running flat out
    #[arg(long, default_value = "false")]
    pub realtime: bool,

    /// Print the resolved config as JSON and exit
    #[arg(long, default_value = "false")]
    pub print_config: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FormatArg {
    Png,
    Jpeg,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => Self::Png,
            FormatArg::Jpeg => Self::Jpeg,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ModeArg {
    /// Read back the presented window
    Screen,
    /// Render off-screen at --width x --height
    Texture,
}

impl From<ModeArg> for CaptureMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Screen => Self::ScreenCapture,
            ModeArg::Texture => Self::RenderToTexture,
        }
    }
}
