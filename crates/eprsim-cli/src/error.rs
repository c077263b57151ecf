use eprsim::engine::error::SimulationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;

/// Everything a command can fail with; `main` prints it and exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read or write '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Wraps a read or write failure together with the offending path.
    pub fn file(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::FileParsing {
            path: path.into(),
            source: source.into(),
        }
    }
}
