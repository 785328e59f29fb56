use super::{gaussian::GaussianPolicy, prepare_observation};
use crate::{
    distributions::diagonal_distribution::DiagGaussianDistribution, init::zeros,
    sequential::Sequential,
};
use candle_core::{D, Device, Tensor, Var};
use mlpol_core::{
    MlpConfig, Result,
    config::ensure_positive,
    distributions::Distribution,
    policies::{ContextConditioned, FlatParams, Policy},
};
use tracing::debug;

/// Gaussian policy conditioned on a trainable context vector that is appended to every
/// observation. The context is adapted per task and reset between tasks.
#[derive(Debug, Clone)]
pub struct ContextGaussianPolicy {
    gaussian: GaussianPolicy,
    context: Var,
    input_size: usize,
}

impl ContextGaussianPolicy {
    pub fn new(
        input_size: usize,
        output_size: usize,
        config: &MlpConfig,
        context_size: usize,
        device: &Device,
    ) -> Result<Self> {
        ensure_positive("input_size", input_size)?;
        ensure_positive("context_size", context_size)?;
        let gaussian =
            GaussianPolicy::build(input_size + context_size, output_size, config, device)?;
        let context = zeros(context_size, device)?;
        debug!(
            input_size,
            output_size,
            context_size,
            hidden_sizes = ?config.hidden_sizes,
            activation = %config.activation,
            parameters = gaussian.parameter_count(),
            "built context conditioned gaussian policy"
        );
        Ok(Self {
            gaussian,
            context,
            input_size,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.gaussian.output_size()
    }

    pub fn context_size(&self) -> usize {
        self.context.elem_count()
    }

    pub fn device(&self) -> &Device {
        self.gaussian.device()
    }

    pub fn mu_net(&self) -> &Sequential {
        self.gaussian.mu_net()
    }

    pub fn log_std(&self) -> &Var {
        self.gaussian.log_std()
    }

    /// Network weights, the log-scale and the context vector.
    pub fn trainable_variables(&self) -> Vec<Var> {
        let mut vars = self.gaussian.trainable_variables();
        vars.push(self.context.clone());
        vars
    }

    pub fn prob_params(&self, observation: &Tensor) -> Result<(Tensor, Tensor)> {
        let distribution = self.distribution(observation)?;
        Ok((distribution.mean().clone(), distribution.stddev().clone()))
    }

    /// Appends the context to the trailing axis of `observation`.
    fn with_context(&self, observation: &Tensor) -> Result<Tensor> {
        let mut shape = observation.dims().to_vec();
        if let Some(last) = shape.last_mut() {
            *last = self.context_size();
        }
        let context = self.context.broadcast_as(shape)?.contiguous()?;
        Ok(Tensor::cat(&[observation, &context], D::Minus1)?)
    }
}

impl Policy for ContextGaussianPolicy {
    type Dist = DiagGaussianDistribution;

    fn distribution(&self, observation: &Tensor) -> Result<Self::Dist> {
        let observation = prepare_observation(observation, self.input_size, self.device())?;
        let features = self.with_context(&observation)?;
        self.gaussian.distribution_from_features(&features)
    }

    fn log_probs(&self, observations: &Tensor, actions: &Tensor) -> Result<Tensor> {
        let distribution = self.distribution(observations)?;
        Ok(distribution.log_prob(actions)?.mean_keepdim(D::Minus1)?)
    }
}

impl ContextConditioned for ContextGaussianPolicy {
    fn context(&self) -> &Var {
        &self.context
    }
}

impl FlatParams for ContextGaussianPolicy {
    fn parameters(&self) -> Vec<Var> {
        self.gaussian.parameters()
    }
}
