use crate::error::Result;
use candle_core::Tensor;

pub trait Distribution {
    /// Draws one detached sample per batch element.
    fn sample(&self) -> Result<Tensor>;

    /// Log-density of `actions`, not reduced over the action dimensions.
    fn log_prob(&self, actions: &Tensor) -> Result<Tensor>;

    fn entropy(&self) -> Result<Tensor>;
}
