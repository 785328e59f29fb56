use candle_core::{DType, Device, Result, Tensor, Var};

/// Glorot/Xavier uniform weights of shape `(fan_out, fan_in)`.
pub fn xavier_uniform(fan_in: usize, fan_out: usize, device: &Device) -> Result<Var> {
    let bound = (6f32 / (fan_in + fan_out) as f32).sqrt();
    let weight = Tensor::rand(-bound, bound, (fan_out, fan_in), device)?;
    Var::from_tensor(&weight)
}

pub fn zeros(len: usize, device: &Device) -> Result<Var> {
    Var::zeros(len, DType::F32, device)
}
