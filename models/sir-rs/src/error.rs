use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutbreakError {
    /// A parameter is outside the range the model accepts.
    #[error("invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// A linear trend needs at least two points.
    #[error("cannot fit a trend to {len} point(s); at least 2 are required")]
    DegenerateSeries { len: usize },
    #[error(transparent)]
    Runner(#[from] runner::RunnerError),
    #[error("failed to write run summary: {0}")]
    Summary(#[from] serde_json::Error),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl OutbreakError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        OutbreakError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
