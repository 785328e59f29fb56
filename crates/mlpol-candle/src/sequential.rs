use crate::init::{xavier_uniform, zeros};
use candle_core::{Device, Result, Tensor, Var};
use candle_nn::{Activation, Linear, Module};
use either::Either;
use mlpol_core::{ActivationKind, MlpConfig, config::ensure_positive, policies::FlatParams};

#[derive(Debug, Clone)]
pub struct LinearLayer {
    layer: Linear,
    weight: Var,
    bias: Var,
}

impl LinearLayer {
    pub fn new(in_dim: usize, out_dim: usize, device: &Device) -> Result<Self> {
        let weight = xavier_uniform(in_dim, out_dim, device)?;
        let bias = zeros(out_dim, device)?;
        // the layer shares storage with the vars, so writes through them are seen on forward
        let layer = Linear::new(weight.as_tensor().clone(), Some(bias.as_tensor().clone()));
        Ok(Self {
            layer,
            weight,
            bias,
        })
    }

    pub fn in_dim(&self) -> usize {
        self.weight.dims()[1]
    }

    pub fn out_dim(&self) -> usize {
        self.weight.dims()[0]
    }

    pub fn weight(&self) -> &Var {
        &self.weight
    }

    pub fn bias(&self) -> &Var {
        &self.bias
    }
}

impl Module for LinearLayer {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        self.layer.forward(xs)
    }
}

#[derive(Debug, Clone)]
pub struct ActivationLayer(pub ActivationKind);

impl Module for ActivationLayer {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        match self.0 {
            ActivationKind::Relu => Activation::Relu.forward(xs),
            // candle_nn::Activation has no tanh
            ActivationKind::Tanh => xs.tanh(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Layer(pub Either<LinearLayer, ActivationLayer>);

impl Layer {
    pub fn linear(linear: LinearLayer) -> Self {
        Self(Either::Left(linear))
    }

    pub fn activation(activation: ActivationLayer) -> Self {
        Self(Either::Right(activation))
    }
}

impl Module for Layer {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        match &self.0 {
            Either::Left(linear) => linear.forward(xs),
            Either::Right(activation) => activation.forward(xs),
        }
    }
}

#[derive(Default, Debug, Clone)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Module for Sequential {
    fn forward(&self, xs: &Tensor) -> Result<Tensor> {
        let mut xs = xs.clone();
        for layer in self.layers.iter() {
            xs = layer.forward(&xs)?
        }
        Ok(xs)
    }
}

impl Sequential {
    pub fn add_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn linear_layers(&self) -> impl Iterator<Item = &LinearLayer> {
        self.layers.iter().filter_map(|layer| layer.0.as_ref().left())
    }

    pub fn input_dim(&self) -> Option<usize> {
        self.linear_layers().next().map(LinearLayer::in_dim)
    }

    pub fn output_dim(&self) -> Option<usize> {
        self.linear_layers().last().map(LinearLayer::out_dim)
    }
}

impl FlatParams for Sequential {
    fn parameters(&self) -> Vec<Var> {
        self.linear_layers()
            .flat_map(|layer| [layer.weight.clone(), layer.bias.clone()])
            .collect()
    }
}

/// Builds `Linear -> act -> ... -> Linear`, with no activation after the output layer.
pub fn build_sequential(
    input_dim: usize,
    config: &MlpConfig,
    output_dim: usize,
    device: &Device,
) -> mlpol_core::Result<Sequential> {
    ensure_positive("input_size", input_dim)?;
    ensure_positive("output_size", output_dim)?;
    config.validate()?;
    let layers = [&config.hidden_sizes[..], &[output_dim]].concat();
    let num_layers = layers.len();
    let mut last_dim = input_dim;
    let mut nn = Sequential::default();
    for (layer_idx, layer_size) in layers.iter().enumerate() {
        let layer = LinearLayer::new(last_dim, *layer_size, device)?;
        nn = nn.add_layer(Layer::linear(layer));
        if layer_idx != num_layers - 1 {
            nn = nn.add_layer(Layer::activation(ActivationLayer(config.activation)));
        }
        last_dim = *layer_size;
    }
    Ok(nn)
}
