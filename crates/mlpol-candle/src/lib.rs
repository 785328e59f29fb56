pub mod distributions;
pub mod init;
pub mod policies;
pub mod sequential;

pub use distributions::{
    DistributionKind, categorical_distribution::CategoricalDistribution,
    diagonal_distribution::DiagGaussianDistribution,
};
pub use policies::{
    categorical::CategoricalPolicy, context_gaussian::ContextGaussianPolicy,
    gaussian::GaussianPolicy,
};
pub use sequential::{Sequential, build_sequential};
