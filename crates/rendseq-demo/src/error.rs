use rendseq_core::ConfigError;

/// Errors that stop the demo before or outside a capture session.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),
}
