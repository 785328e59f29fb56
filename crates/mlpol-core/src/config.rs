use crate::error::{PolicyError, Result};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    #[default]
    Relu,
    Tanh,
}

impl FromStr for ActivationKind {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "relu" => Ok(Self::Relu),
            "tanh" => Ok(Self::Tanh),
            other => Err(PolicyError::InvalidConfiguration(format!(
                "unsupported activation kind `{other}`, expected `relu` or `tanh`"
            ))),
        }
    }
}

impl fmt::Display for ActivationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relu => write!(f, "relu"),
            Self::Tanh => write!(f, "tanh"),
        }
    }
}

/// Hidden layer layout of a feed-forward network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MlpConfig {
    pub hidden_sizes: Vec<usize>,
    #[serde(default)]
    pub activation: ActivationKind,
}

impl Default for MlpConfig {
    fn default() -> Self {
        Self {
            hidden_sizes: vec![100, 100],
            activation: ActivationKind::Relu,
        }
    }
}

impl MlpConfig {
    pub fn new(hidden_sizes: Vec<usize>, activation: ActivationKind) -> Self {
        Self {
            hidden_sizes,
            activation,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.hidden_sizes.is_empty() {
            return Err(PolicyError::InvalidConfiguration(
                "at least one hidden layer is required".into(),
            ));
        }
        for (idx, size) in self.hidden_sizes.iter().enumerate() {
            ensure_positive(&format!("hidden_sizes[{idx}]"), *size)?;
        }
        Ok(())
    }
}

pub fn ensure_positive(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        Err(PolicyError::InvalidConfiguration(format!(
            "{name} must be positive"
        )))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_two_hidden_layers() {
        let config = MlpConfig::default();
        assert_eq!(config.hidden_sizes, vec![100, 100]);
        assert_eq!(config.activation, ActivationKind::Relu);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn activation_display_parses_back() {
        for kind in [ActivationKind::Relu, ActivationKind::Tanh] {
            assert_eq!(kind.to_string().parse::<ActivationKind>().unwrap(), kind);
        }
    }
}
