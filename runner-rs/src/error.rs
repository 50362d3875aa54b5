use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("no input document was provided")]
    EmptyInput,
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML input: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),
    #[error("input does not match the expected schema: {0}")]
    Schema(#[source] serde_json::Error),
}
