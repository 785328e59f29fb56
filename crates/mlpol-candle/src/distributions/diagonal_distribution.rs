use candle_core::Tensor;
use mlpol_core::{Result, distributions::Distribution};
use std::f64::consts::PI;

/// Independent per-dimension normal distribution.
#[derive(Debug, Clone)]
pub struct DiagGaussianDistribution {
    loc: Tensor,
    log_scale: Tensor,
    scale: Tensor,
}

impl DiagGaussianDistribution {
    /// `log_scale` is broadcast against the trailing dimensions of `loc`.
    pub fn new(loc: Tensor, log_scale: &Tensor) -> Result<Self> {
        let log_scale = log_scale.broadcast_as(loc.shape())?;
        let scale = log_scale.exp()?;
        Ok(Self {
            loc,
            log_scale,
            scale,
        })
    }

    pub fn mean(&self) -> &Tensor {
        &self.loc
    }

    pub fn stddev(&self) -> &Tensor {
        &self.scale
    }
}

impl Distribution for DiagGaussianDistribution {
    fn sample(&self) -> Result<Tensor> {
        let noise = Tensor::randn(0f32, 1., self.loc.shape(), self.loc.device())?;
        let action = (&self.loc + self.scale.mul(&noise)?)?.detach();
        Ok(action)
    }

    fn log_prob(&self, actions: &Tensor) -> Result<Tensor> {
        let actions = actions
            .to_device(self.loc.device())?
            .to_dtype(self.loc.dtype())?;
        let var = self.scale.sqr()?;
        let log_sqrt_2pi = (2. * PI).sqrt().ln();
        let sq_err = actions.broadcast_sub(&self.loc)?.sqr()?;
        let log_probs = sq_err
            .broadcast_div(&(var * 2.)?)?
            .neg()?
            .broadcast_sub(&self.log_scale)?;
        Ok((log_probs - log_sqrt_2pi)?)
    }

    fn entropy(&self) -> Result<Tensor> {
        let log_2pi_plus_1_div_2 = 0.5 * ((2. * PI).ln() + 1.);
        Ok((&self.log_scale + log_2pi_plus_1_div_2)?)
    }
}
