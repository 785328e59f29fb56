pub mod categorical_distribution;
pub mod diagonal_distribution;

use candle_core::Tensor;
use categorical_distribution::CategoricalDistribution;
use diagonal_distribution::DiagGaussianDistribution;
use mlpol_core::{Result, distributions::Distribution};

#[derive(Debug, Clone)]
pub enum DistributionKind {
    Categorical(CategoricalDistribution),
    DiagGaussian(DiagGaussianDistribution),
}

impl Distribution for DistributionKind {
    fn sample(&self) -> Result<Tensor> {
        match self {
            Self::Categorical(cat) => cat.sample(),
            Self::DiagGaussian(diag) => diag.sample(),
        }
    }

    fn log_prob(&self, actions: &Tensor) -> Result<Tensor> {
        match self {
            Self::Categorical(cat) => cat.log_prob(actions),
            Self::DiagGaussian(diag) => diag.log_prob(actions),
        }
    }

    fn entropy(&self) -> Result<Tensor> {
        match self {
            Self::Categorical(cat) => cat.entropy(),
            Self::DiagGaussian(diag) => diag.entropy(),
        }
    }
}

impl From<CategoricalDistribution> for DistributionKind {
    fn from(distribution: CategoricalDistribution) -> Self {
        Self::Categorical(distribution)
    }
}

impl From<DiagGaussianDistribution> for DistributionKind {
    fn from(distribution: DiagGaussianDistribution) -> Self {
        Self::DiagGaussian(distribution)
    }
}
