use crate::{
    distributions::categorical_distribution::CategoricalDistribution,
    sequential::{Sequential, build_sequential},
};
use candle_core::{D, DType, Device, Tensor, Var};
use candle_nn::{Module, encoding::one_hot};
use mlpol_core::{
    ActivationKind, MlpConfig, PolicyError, Result,
    distributions::Distribution,
    policies::{FlatParams, Policy},
};
use tracing::debug;

/// Policy over discrete actions for environments with discrete observations. Observations are
/// integer state indices and get one-hot encoded before reaching the ReLU network.
#[derive(Debug, Clone)]
pub struct CategoricalPolicy {
    logits_net: Sequential,
    input_size: usize,
    output_size: usize,
    device: Device,
}

impl CategoricalPolicy {
    pub fn new(
        input_size: usize,
        output_size: usize,
        hidden_sizes: &[usize],
        device: &Device,
    ) -> Result<Self> {
        let config = MlpConfig::new(hidden_sizes.to_vec(), ActivationKind::Relu);
        let logits_net = build_sequential(input_size, &config, output_size, device)?;
        let policy = Self {
            logits_net,
            input_size,
            output_size,
            device: device.clone(),
        };
        debug!(
            input_size,
            output_size,
            ?hidden_sizes,
            parameters = policy.parameter_count(),
            "built categorical policy"
        );
        Ok(policy)
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn logits_net(&self) -> &Sequential {
        &self.logits_net
    }

    /// Encodes a scalar state index, or a rank-1 batch of them, as `(N, input_size)` rows.
    pub fn one_hot(&self, observation: &Tensor) -> Result<Tensor> {
        let observation = match observation.rank() {
            0 => observation.unsqueeze(0)?,
            1 => observation.clone(),
            rank => {
                return Err(PolicyError::InvalidObservation(format!(
                    "expected a state index or a batch of them, got a rank {rank} tensor"
                )));
            }
        };
        let values: Vec<f64> = observation.to_dtype(DType::F64)?.to_vec1()?;
        let indices = values
            .iter()
            .map(|&value| {
                if value < 0. || value.fract() != 0. || value >= self.input_size as f64 {
                    Err(PolicyError::InvalidObservation(format!(
                        "state index {value} outside of 0..{}",
                        self.input_size
                    )))
                } else {
                    Ok(value as u32)
                }
            })
            .collect::<Result<Vec<u32>>>()?;
        let len = indices.len();
        let indices = Tensor::from_vec(indices, len, &self.device)?;
        Ok(one_hot(indices, self.input_size, 1f32, 0f32)?)
    }

    pub fn logits(&self, observation: &Tensor) -> Result<Tensor> {
        let encoded = self.one_hot(observation)?;
        Ok(self.logits_net.forward(&encoded)?)
    }
}

impl Policy for CategoricalPolicy {
    type Dist = CategoricalDistribution;

    fn distribution(&self, observation: &Tensor) -> Result<Self::Dist> {
        Ok(CategoricalDistribution::new(self.logits(observation)?))
    }

    fn log_probs(&self, observations: &Tensor, actions: &Tensor) -> Result<Tensor> {
        let distribution = self.distribution(observations)?;
        Ok(distribution.log_prob(actions)?.unsqueeze(D::Minus1)?)
    }
}

impl FlatParams for CategoricalPolicy {
    fn parameters(&self) -> Vec<Var> {
        self.logits_net.parameters()
    }
}
