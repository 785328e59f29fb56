pub mod categorical;
pub mod context_gaussian;
pub mod gaussian;

use candle_core::{DType, Device, Tensor};
use mlpol_core::{PolicyError, Result};

/// Smallest standard deviation a Gaussian policy can produce.
pub const EPSILON: f64 = 1e-6;

/// Moves an observation onto `device` as `f32` and promotes a single observation to a batch
/// of one.
pub(crate) fn prepare_observation(
    observation: &Tensor,
    input_size: usize,
    device: &Device,
) -> Result<Tensor> {
    let observation = observation.to_device(device)?.to_dtype(DType::F32)?;
    let observation = match observation.rank() {
        0 => {
            return Err(PolicyError::InvalidObservation(
                "expected at least one feature dimension, got a scalar".into(),
            ));
        }
        1 => observation.unsqueeze(0)?,
        _ => observation,
    };
    let features = observation.dims().last().copied().unwrap_or(0);
    if features != input_size {
        return Err(PolicyError::InvalidObservation(format!(
            "expected {input_size} features, got {features}"
        )));
    }
    Ok(observation)
}
