use crate::{
    distributions::Distribution,
    error::{PolicyError, Result},
    tensors::Logp,
};
use candle_core::{Tensor, Var};
use tracing::{trace, warn};

pub trait Policy {
    type Dist: Distribution;

    fn distribution(&self, observation: &Tensor) -> Result<Self::Dist>;

    /// Log-probability of `actions`, one value per batch element, shaped `(N, 1)`.
    fn log_probs(&self, observations: &Tensor, actions: &Tensor) -> Result<Tensor>;

    fn sample(&self, observation: &Tensor) -> Result<Tensor> {
        self.distribution(observation)?.sample()
    }

    fn act(&self, observation: &Tensor) -> Result<(Logp, Tensor)> {
        let distribution = self.distribution(observation)?;
        let action = distribution.sample()?;
        let logp = distribution
            .log_prob(&action)?
            .mean_all()?
            .reshape((1, 1))?
            .detach();
        Ok((Logp(logp), action))
    }
}

/// Access to the network weights as a single rank-1 vector, for optimizers that treat the
/// model as one point in parameter space.
pub trait FlatParams {
    /// Parameter handles in a fixed order. Writes through a handle are visible to the owner.
    fn parameters(&self) -> Vec<Var>;

    fn parameter_count(&self) -> usize {
        self.parameters().iter().map(|p| p.elem_count()).sum()
    }

    fn flat_parameters(&self) -> Result<Tensor> {
        let flat = self
            .parameters()
            .iter()
            .map(|p| p.flatten_all())
            .collect::<candle_core::Result<Vec<_>>>()?;
        Ok(Tensor::cat(&flat, 0)?.detach())
    }

    fn set_flat_parameters(&mut self, params: &Tensor) -> Result<()> {
        let expected = self.parameter_count();
        let actual = params.elem_count();
        if params.rank() != 1 || actual != expected {
            warn!(
                expected,
                actual,
                rank = params.rank(),
                "rejected flat parameter vector"
            );
            return Err(PolicyError::ShapeMismatch { expected, actual });
        }
        let parameters = self.parameters();
        let Some(first) = parameters.first() else {
            return Ok(());
        };
        // convert once so a failure cannot leave the parameters half written
        let params = params.to_device(first.device())?.to_dtype(first.dtype())?;
        let mut offset = 0;
        for parameter in parameters.iter() {
            let len = parameter.elem_count();
            let chunk = params.narrow(0, offset, len)?.reshape(parameter.dims())?;
            parameter.set(&chunk)?;
            offset += len;
        }
        trace!(count = expected, "wrote flat parameters");
        Ok(())
    }
}

pub trait ContextConditioned {
    fn context(&self) -> &Var;

    fn reset_context(&mut self) -> Result<()> {
        let context = self.context();
        context.set(&context.zeros_like()?)?;
        trace!(len = context.elem_count(), "context reset");
        Ok(())
    }
}
