use super::{EPSILON, prepare_observation};
use crate::{
    distributions::diagonal_distribution::DiagGaussianDistribution,
    init::zeros,
    sequential::{Sequential, build_sequential},
};
use candle_core::{D, Device, Tensor, Var};
use candle_nn::Module;
use mlpol_core::{
    MlpConfig, Result,
    distributions::Distribution,
    policies::{FlatParams, Policy},
};
use tracing::debug;

/// Diagonal Gaussian policy: the network predicts the mean, a state independent log-scale
/// vector gives the spread.
#[derive(Debug, Clone)]
pub struct GaussianPolicy {
    mu_net: Sequential,
    log_std: Var,
    input_size: usize,
    output_size: usize,
    device: Device,
}

impl GaussianPolicy {
    pub fn new(
        input_size: usize,
        output_size: usize,
        config: &MlpConfig,
        device: &Device,
    ) -> Result<Self> {
        let policy = Self::build(input_size, output_size, config, device)?;
        debug!(
            input_size,
            output_size,
            hidden_sizes = ?config.hidden_sizes,
            activation = %config.activation,
            parameters = policy.parameter_count(),
            "built gaussian policy"
        );
        Ok(policy)
    }

    pub(crate) fn build(
        input_size: usize,
        output_size: usize,
        config: &MlpConfig,
        device: &Device,
    ) -> Result<Self> {
        let mu_net = build_sequential(input_size, config, output_size, device)?;
        let log_std = zeros(output_size, device)?;
        Ok(Self {
            mu_net,
            log_std,
            input_size,
            output_size,
            device: device.clone(),
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn mu_net(&self) -> &Sequential {
        &self.mu_net
    }

    pub fn log_std(&self) -> &Var {
        &self.log_std
    }

    /// Network weights followed by the log-scale, for gradient based optimizers.
    pub fn trainable_variables(&self) -> Vec<Var> {
        let mut vars = self.mu_net.parameters();
        vars.push(self.log_std.clone());
        vars
    }

    /// Mean and standard deviation of the action distribution.
    pub fn prob_params(&self, observation: &Tensor) -> Result<(Tensor, Tensor)> {
        let distribution = self.distribution(observation)?;
        Ok((distribution.mean().clone(), distribution.stddev().clone()))
    }

    pub(crate) fn distribution_from_features(
        &self,
        features: &Tensor,
    ) -> Result<DiagGaussianDistribution> {
        let loc = self.mu_net.forward(features)?;
        let log_scale = self.log_std.maximum(EPSILON.ln())?;
        DiagGaussianDistribution::new(loc, &log_scale)
    }
}

impl Policy for GaussianPolicy {
    type Dist = DiagGaussianDistribution;

    fn distribution(&self, observation: &Tensor) -> Result<Self::Dist> {
        let observation = prepare_observation(observation, self.input_size, &self.device)?;
        self.distribution_from_features(&observation)
    }

    fn log_probs(&self, observations: &Tensor, actions: &Tensor) -> Result<Tensor> {
        let distribution = self.distribution(observations)?;
        Ok(distribution.log_prob(actions)?.mean_keepdim(D::Minus1)?)
    }
}

impl FlatParams for GaussianPolicy {
    fn parameters(&self) -> Vec<Var> {
        self.mu_net.parameters()
    }
}
