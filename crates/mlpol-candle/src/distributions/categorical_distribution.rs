use candle_core::{D, DType, Error, Tensor};
use candle_nn::ops::{log_softmax, softmax};
use mlpol_core::{PolicyError, Result, distributions::Distribution};
use rand::distr::Distribution as RandDistribution;
use rand::distr::weighted::WeightedIndex;

/// Distribution over `0..num_classes` parameterized by unnormalized logits of shape
/// `(N, num_classes)`.
#[derive(Debug, Clone)]
pub struct CategoricalDistribution {
    logits: Tensor,
}

impl CategoricalDistribution {
    pub fn new(logits: Tensor) -> Self {
        Self { logits }
    }

    pub fn logits(&self) -> &Tensor {
        &self.logits
    }

    pub fn probs(&self) -> Result<Tensor> {
        Ok(softmax(&self.logits, D::Minus1)?)
    }

    /// Class indices of `actions` as `u32`, keeping their shape.
    fn action_indices(&self, actions: &Tensor) -> Result<Tensor> {
        let num_classes = self.logits.dims().last().copied().unwrap_or(0);
        let values: Vec<f64> = actions.to_dtype(DType::F64)?.flatten_all()?.to_vec1()?;
        let indices = values
            .iter()
            .map(|&value| {
                if value < 0. || value.fract() != 0. || value >= num_classes as f64 {
                    Err(PolicyError::InvalidAction(format!(
                        "action {value} outside of 0..{num_classes}"
                    )))
                } else {
                    Ok(value as u32)
                }
            })
            .collect::<Result<Vec<u32>>>()?;
        Ok(Tensor::from_vec(indices, actions.dims(), self.logits.device())?)
    }
}

impl Distribution for CategoricalDistribution {
    fn sample(&self) -> Result<Tensor> {
        let probs: Vec<Vec<f32>> = self.probs()?.to_dtype(DType::F32)?.to_vec2()?;
        let mut rng = rand::rng();
        let actions = probs
            .iter()
            .map(|row| {
                let distribution = WeightedIndex::new(row).map_err(Error::wrap)?;
                Ok(distribution.sample(&mut rng) as u32)
            })
            .collect::<Result<Vec<u32>>>()?;
        let len = actions.len();
        Ok(Tensor::from_vec(actions, len, self.logits.device())?)
    }

    fn log_prob(&self, actions: &Tensor) -> Result<Tensor> {
        let actions = self.action_indices(actions)?.unsqueeze(D::Minus1)?;
        let log_probs = log_softmax(&self.logits, D::Minus1)?;
        Ok(log_probs.gather(&actions, D::Minus1)?.squeeze(D::Minus1)?)
    }

    fn entropy(&self) -> Result<Tensor> {
        let log_probs = log_softmax(&self.logits, D::Minus1)?;
        let entropy = log_probs.exp()?.mul(&log_probs)?.sum(D::Minus1)?.neg()?;
        Ok(entropy)
    }
}
