use simple_stock_core::{HttpError, PipelineError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Transport(#[from] HttpError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Pipeline(PipelineError::SymbolNotFound { .. }) => 3,
            Self::Pipeline(PipelineError::EmptyRangeResult { .. }) => 3,
            Self::Pipeline(PipelineError::DataFetchFailure { .. }) => 6,
            Self::Serialization(_) => 4,
            Self::Transport(_) => 5,
            Self::Io(_) => 10,
        }
    }

    /// Stable machine-readable code printed next to the message.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "cli.validation",
            Self::Pipeline(error) => error.code(),
            Self::Transport(_) => "cli.transport",
            Self::Serialization(_) => "cli.serialization",
            Self::Io(_) => "cli.io",
        }
    }
}
