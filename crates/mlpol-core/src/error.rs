use thiserror::Error;

#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("flat parameter vector has {actual} elements, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("invalid observation: {0}")]
    InvalidObservation(String),
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error(transparent)]
    Candle(#[from] candle_core::Error),
}

pub type Result<T> = std::result::Result<T, PolicyError>;
