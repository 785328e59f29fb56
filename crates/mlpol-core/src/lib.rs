pub mod config;
pub mod distributions;
pub mod error;
pub mod policies;
pub mod tensors;

pub use config::{ActivationKind, MlpConfig};
pub use error::{PolicyError, Result};
