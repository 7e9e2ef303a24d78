use std::path::PathBuf;

/// Errors that abort a single frame capture.
///
/// None of these end a session: the scheduler reports them as
/// [`CaptureOutcome::Failed`](crate::CaptureOutcome::Failed) and moves on to
/// the next tick.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to create output directory {}: {source}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("renderer could not produce a frame: {0}")]
    Render(String),
    #[error("failed to encode frame: {0}")]
    Encode(String),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<image::ImageError> for CaptureError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Errors raised while loading or validating a [`CaptureConfig`](crate::CaptureConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid capture config: {0}")]
    Invalid(&'static str),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse capture config: {0}")]
    Parse(#[from] serde_json::Error),
}
