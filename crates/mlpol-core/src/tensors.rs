use candle_core::Tensor;
use derive_more::{Deref, DerefMut, Display};

/// Detached log-probability of a sampled action, shaped `(1, 1)`.
#[derive(Deref, DerefMut, Debug, Display, Clone)]
pub struct Logp(pub Tensor);
