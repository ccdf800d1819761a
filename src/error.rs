use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Empty pattern: no throw values")]
    EmptyPattern,

    #[error("Non-integer ball count: throw sum {sum} is not divisible by period {period}")]
    NonIntegerBallCount { sum: u64, period: usize },

    #[error("Invalid setting {field}: {value}")]
    InvalidSettings { field: &'static str, value: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Whether the host can retry with adjusted input
    pub fn is_recoverable(&self) -> bool {
        match self {
            SimError::NonIntegerBallCount { .. } => true,
            SimError::Io(_) => true,
            SimError::EmptyPattern => false,
            SimError::InvalidSettings { .. } => false,
            SimError::Json(_) => false,
        }
    }
}
