use anyhow::Result;
use candle_core::{Device, Tensor};
use candle_nn::Module;
use mlpol_candle::build_sequential;
use mlpol_core::{ActivationKind, MlpConfig, PolicyError, policies::FlatParams};
use rstest::rstest;

#[rstest]
#[case(vec![8], ActivationKind::Relu)]
#[case(vec![8], ActivationKind::Tanh)]
#[case(vec![16, 8], ActivationKind::Relu)]
#[case(vec![3, 3, 3], ActivationKind::Tanh)]
fn parameter_count_sums_layer_sizes(
    #[case] hidden_sizes: Vec<usize>,
    #[case] activation: ActivationKind,
) -> Result<()> {
    let config = MlpConfig::new(hidden_sizes.clone(), activation);
    let nn = build_sequential(4, &config, 2, &Device::Cpu)?;
    let dims = [&[4][..], &hidden_sizes[..], &[2]].concat();
    let expected: usize = dims.windows(2).map(|w| w[0] * w[1] + w[1]).sum();
    assert_eq!(nn.parameter_count(), expected);
    assert_eq!(nn.flat_parameters()?.dims1()?, expected);
    // weight and bias per linear layer, plus an activation between linear layers
    assert_eq!(nn.parameters().len(), 2 * (hidden_sizes.len() + 1));
    assert_eq!(nn.layers().len(), 2 * hidden_sizes.len() + 1);
    assert_eq!(nn.input_dim(), Some(4));
    assert_eq!(nn.output_dim(), Some(2));
    Ok(())
}

#[test]
fn weights_are_xavier_bounded_and_biases_zero() -> Result<()> {
    let nn = build_sequential(6, &MlpConfig::new(vec![10], ActivationKind::Relu), 3, &Device::Cpu)?;
    for layer in nn.linear_layers() {
        let bound = (6f32 / (layer.in_dim() + layer.out_dim()) as f32).sqrt();
        let weights: Vec<f32> = layer.weight().flatten_all()?.to_vec1()?;
        assert!(weights.iter().all(|w| w.abs() <= bound));
        assert!(weights.iter().any(|w| *w != 0.));
        let bias: Vec<f32> = layer.bias().to_vec1()?;
        assert!(bias.iter().all(|b| *b == 0.));
    }
    Ok(())
}

#[test]
fn forward_maps_batches_to_output_width() -> Result<()> {
    let config = MlpConfig::new(vec![7, 7], ActivationKind::Tanh);
    let nn = build_sequential(5, &config, 3, &Device::Cpu)?;
    let xs = Tensor::randn(0f32, 1., (9, 5), &Device::Cpu)?;
    assert_eq!(nn.forward(&xs)?.dims(), &[9, 3]);
    Ok(())
}

#[test]
fn rejects_degenerate_layouts() {
    let device = Device::Cpu;
    let empty = MlpConfig::new(vec![], ActivationKind::Relu);
    assert!(matches!(
        build_sequential(4, &empty, 2, &device),
        Err(PolicyError::InvalidConfiguration(_))
    ));
    let zero_hidden = MlpConfig::new(vec![8, 0], ActivationKind::Relu);
    assert!(matches!(
        build_sequential(4, &zero_hidden, 2, &device),
        Err(PolicyError::InvalidConfiguration(_))
    ));
    let config = MlpConfig::default();
    assert!(matches!(
        build_sequential(0, &config, 2, &device),
        Err(PolicyError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        build_sequential(4, &config, 0, &device),
        Err(PolicyError::InvalidConfiguration(_))
    ));
}

#[test]
fn flat_writes_are_seen_by_clones() -> Result<()> {
    let config = MlpConfig::new(vec![4], ActivationKind::Relu);
    let mut nn = build_sequential(2, &config, 1, &Device::Cpu)?;
    let clone = nn.clone();
    let count = nn.parameter_count();
    nn.set_flat_parameters(&Tensor::zeros(count, candle_core::DType::F32, &Device::Cpu)?)?;
    let flat: Vec<f32> = clone.flat_parameters()?.to_vec1()?;
    assert!(flat.iter().all(|p| *p == 0.));
    let xs = Tensor::ones((3, 2), candle_core::DType::F32, &Device::Cpu)?;
    let out: Vec<Vec<f32>> = clone.forward(&xs)?.to_vec2()?;
    assert!(out.iter().flatten().all(|v| *v == 0.));
    Ok(())
}
