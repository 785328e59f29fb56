use crate::config::{PolicyConfig, PolicyType};
use candle_core::{Device, Tensor};
use mlpol_core::Result;

/// A batch of observations the configured policy accepts: standard normal features for the
/// Gaussian policies, cycling state indices for the categorical one.
pub fn observation_batch(
    config: &PolicyConfig,
    batch_size: usize,
    device: &Device,
) -> Result<Tensor> {
    let observations = match config.policy {
        PolicyType::Categorical => {
            let indices: Vec<u32> = (0..batch_size)
                .map(|i| (i % config.input_size) as u32)
                .collect();
            Tensor::from_vec(indices, batch_size, device)?
        }
        _ => Tensor::randn(0f32, 1., (batch_size, config.input_size), device)?,
    };
    Ok(observations)
}

pub fn max_abs_diff(lhs: &Tensor, rhs: &Tensor) -> Result<f32> {
    let diff = (lhs - rhs)?.abs()?.flatten_all()?.max(0)?.to_scalar::<f32>()?;
    Ok(diff)
}
