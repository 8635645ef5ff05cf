use quorum_lifecycle::CoordinatorError;
use quorum_types::RequestError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Coordinator(#[from] CoordinatorError),
}

pub type CliResult<T> = Result<T, CliError>;
