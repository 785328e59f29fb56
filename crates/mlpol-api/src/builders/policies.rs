use crate::{
    config::{PolicyConfig, PolicyType},
    policies::PolicyKind,
};
use candle_core::Device;
use mlpol_candle::{CategoricalPolicy, ContextGaussianPolicy, GaussianPolicy};
use mlpol_core::Result;
use tracing::debug;

pub struct PolicyBuilder {
    pub config: PolicyConfig,
}

impl PolicyBuilder {
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    pub fn build(&self) -> Result<PolicyKind> {
        let device = self.config.device.device()?;
        self.build_on(&device)
    }

    /// Builds on `device`, ignoring the configured device.
    pub fn build_on(&self, device: &Device) -> Result<PolicyKind> {
        let PolicyConfig {
            input_size,
            output_size,
            hidden_sizes,
            policy,
            ..
        } = &self.config;
        debug!(?policy, input_size, output_size, "building policy");
        let policy: PolicyKind = match policy {
            PolicyType::Gaussian { .. } => {
                GaussianPolicy::new(*input_size, *output_size, &self.config.mlp_config(), device)?
                    .into()
            }
            PolicyType::ContextGaussian { context_size, .. } => ContextGaussianPolicy::new(
                *input_size,
                *output_size,
                &self.config.mlp_config(),
                *context_size,
                device,
            )?
            .into(),
            PolicyType::Categorical => {
                CategoricalPolicy::new(*input_size, *output_size, hidden_sizes, device)?.into()
            }
        };
        Ok(policy)
    }
}

impl From<PolicyConfig> for PolicyBuilder {
    fn from(config: PolicyConfig) -> Self {
        Self::new(config)
    }
}
