use candle_core::Device;
use mlpol_core::{ActivationKind, MlpConfig, PolicyError, Result};
use serde::{Deserialize, Serialize};

fn default_hidden_sizes() -> Vec<usize> {
    MlpConfig::default().hidden_sizes
}

fn default_context_size() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyType {
    Gaussian {
        #[serde(default)]
        activation: ActivationKind,
    },
    ContextGaussian {
        #[serde(default)]
        activation: ActivationKind,
        #[serde(default = "default_context_size")]
        context_size: usize,
    },
    Categorical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceConfig {
    #[default]
    Cpu,
    Cuda(usize),
    Metal(usize),
}

impl DeviceConfig {
    pub fn device(&self) -> Result<Device> {
        let device = match self {
            Self::Cpu => Device::Cpu,
            Self::Cuda(ordinal) => Device::new_cuda(*ordinal)?,
            Self::Metal(ordinal) => Device::new_metal(*ordinal)?,
        };
        Ok(device)
    }
}

/// Everything needed to construct one of the policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    pub input_size: usize,
    pub output_size: usize,
    #[serde(default = "default_hidden_sizes")]
    pub hidden_sizes: Vec<usize>,
    pub policy: PolicyType,
    #[serde(default)]
    pub device: DeviceConfig,
}

impl PolicyConfig {
    fn with_type(input_size: usize, output_size: usize, policy: PolicyType) -> Self {
        Self {
            input_size,
            output_size,
            hidden_sizes: default_hidden_sizes(),
            policy,
            device: DeviceConfig::Cpu,
        }
    }

    pub fn gaussian(input_size: usize, output_size: usize) -> Self {
        Self::with_type(
            input_size,
            output_size,
            PolicyType::Gaussian {
                activation: ActivationKind::default(),
            },
        )
    }

    pub fn context_gaussian(input_size: usize, output_size: usize) -> Self {
        Self::with_type(
            input_size,
            output_size,
            PolicyType::ContextGaussian {
                activation: ActivationKind::default(),
                context_size: default_context_size(),
            },
        )
    }

    pub fn categorical(input_size: usize, output_size: usize) -> Self {
        Self::with_type(input_size, output_size, PolicyType::Categorical)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| PolicyError::InvalidConfiguration(err.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| PolicyError::InvalidConfiguration(err.to_string()))
    }

    pub fn with_hidden_sizes(mut self, hidden_sizes: Vec<usize>) -> Self {
        self.hidden_sizes = hidden_sizes;
        self
    }

    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Sets the hidden activation from its name, `relu` or `tanh`.
    pub fn with_activation(mut self, name: &str) -> Result<Self> {
        let kind: ActivationKind = name.parse()?;
        match &mut self.policy {
            PolicyType::Gaussian { activation }
            | PolicyType::ContextGaussian { activation, .. } => *activation = kind,
            PolicyType::Categorical => {
                return Err(PolicyError::InvalidConfiguration(
                    "categorical policies always use relu".into(),
                ));
            }
        }
        Ok(self)
    }

    pub fn with_context_size(mut self, size: usize) -> Result<Self> {
        match &mut self.policy {
            PolicyType::ContextGaussian { context_size, .. } => *context_size = size,
            _ => {
                return Err(PolicyError::InvalidConfiguration(
                    "only context conditioned policies have a context".into(),
                ));
            }
        }
        Ok(self)
    }

    pub fn activation(&self) -> ActivationKind {
        match self.policy {
            PolicyType::Gaussian { activation }
            | PolicyType::ContextGaussian { activation, .. } => activation,
            PolicyType::Categorical => ActivationKind::Relu,
        }
    }

    pub fn mlp_config(&self) -> MlpConfig {
        MlpConfig::new(self.hidden_sizes.clone(), self.activation())
    }
}
