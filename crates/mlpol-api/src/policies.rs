use candle_core::{Tensor, Var};
use mlpol_candle::{CategoricalPolicy, ContextGaussianPolicy, DistributionKind, GaussianPolicy};
use mlpol_core::{
    Result,
    policies::{ContextConditioned, FlatParams, Policy},
};

#[derive(Debug, Clone)]
pub enum PolicyKind {
    Gaussian(GaussianPolicy),
    ContextGaussian(ContextGaussianPolicy),
    Categorical(CategoricalPolicy),
}

impl PolicyKind {
    pub fn input_size(&self) -> usize {
        match self {
            Self::Gaussian(policy) => policy.input_size(),
            Self::ContextGaussian(policy) => policy.input_size(),
            Self::Categorical(policy) => policy.input_size(),
        }
    }

    pub fn output_size(&self) -> usize {
        match self {
            Self::Gaussian(policy) => policy.output_size(),
            Self::ContextGaussian(policy) => policy.output_size(),
            Self::Categorical(policy) => policy.output_size(),
        }
    }

    pub fn context(&self) -> Option<&Var> {
        match self {
            Self::ContextGaussian(policy) => Some(policy.context()),
            _ => None,
        }
    }

    /// Zeroes the context of a context conditioned policy, does nothing for the others.
    pub fn reset_context(&mut self) -> Result<()> {
        match self {
            Self::ContextGaussian(policy) => policy.reset_context(),
            _ => Ok(()),
        }
    }

    pub fn trainable_variables(&self) -> Vec<Var> {
        match self {
            Self::Gaussian(policy) => policy.trainable_variables(),
            Self::ContextGaussian(policy) => policy.trainable_variables(),
            Self::Categorical(policy) => policy.parameters(),
        }
    }
}

impl Policy for PolicyKind {
    type Dist = DistributionKind;

    fn distribution(&self, observation: &Tensor) -> Result<Self::Dist> {
        match self {
            Self::Gaussian(policy) => Ok(policy.distribution(observation)?.into()),
            Self::ContextGaussian(policy) => Ok(policy.distribution(observation)?.into()),
            Self::Categorical(policy) => Ok(policy.distribution(observation)?.into()),
        }
    }

    fn log_probs(&self, observations: &Tensor, actions: &Tensor) -> Result<Tensor> {
        match self {
            Self::Gaussian(policy) => policy.log_probs(observations, actions),
            Self::ContextGaussian(policy) => policy.log_probs(observations, actions),
            Self::Categorical(policy) => policy.log_probs(observations, actions),
        }
    }
}

impl FlatParams for PolicyKind {
    fn parameters(&self) -> Vec<Var> {
        match self {
            Self::Gaussian(policy) => policy.parameters(),
            Self::ContextGaussian(policy) => policy.parameters(),
            Self::Categorical(policy) => policy.parameters(),
        }
    }
}

impl From<GaussianPolicy> for PolicyKind {
    fn from(policy: GaussianPolicy) -> Self {
        Self::Gaussian(policy)
    }
}

impl From<ContextGaussianPolicy> for PolicyKind {
    fn from(policy: ContextGaussianPolicy) -> Self {
        Self::ContextGaussian(policy)
    }
}

impl From<CategoricalPolicy> for PolicyKind {
    fn from(policy: CategoricalPolicy) -> Self {
        Self::Categorical(policy)
    }
}
