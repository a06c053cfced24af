use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("points for {level} must be between 0 and 100, got {value}")]
    PointsOutOfRange { level: String, value: i64 },
    #[error("'{0}' is not a whole number of points")]
    InvalidPoints(String),
    #[error("unknown level '{0}' (expected low, medium or high)")]
    UnknownLevel(String),
    #[error("weight for '{category}' must be a whole percentage, got {value}")]
    FractionalWeight { category: String, value: f64 },
    #[error("weight for '{category}' is out of range, got {value}")]
    WeightOutOfRange { category: String, value: f64 },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
