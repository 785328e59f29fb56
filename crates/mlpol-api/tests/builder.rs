use anyhow::Result;
use candle_core::{DType, Device, Tensor};
use mlpol_api::{
    PolicyBuilder, PolicyConfig, PolicyKind,
    test_utils::{max_abs_diff, observation_batch},
};
use mlpol_core::{
    PolicyError,
    distributions::Distribution,
    policies::{FlatParams, Policy},
};
use rstest::rstest;

fn small(config: PolicyConfig) -> PolicyConfig {
    config.with_hidden_sizes(vec![8])
}

#[rstest]
#[case(small(PolicyConfig::gaussian(4, 2)), 58)]
#[case(small(PolicyConfig::context_gaussian(4, 2)), 74)]
#[case(small(PolicyConfig::categorical(3, 5)), 77)]
fn flat_parameters_round_trip(#[case] config: PolicyConfig, #[case] count: usize) -> Result<()> {
    let mut policy = PolicyBuilder::new(config.clone()).build()?;
    assert_eq!(policy.parameter_count(), count);
    let flat = policy.flat_parameters()?;
    assert_eq!(flat.dims(), &[count]);
    let observations = observation_batch(&config, 6, &Device::Cpu)?;
    let before = policy.distribution(&observations)?;

    policy.set_flat_parameters(&flat)?;
    assert_eq!(max_abs_diff(&policy.flat_parameters()?, &flat)?, 0.);
    let after = policy.distribution(&observations)?;
    let entropy_diff = max_abs_diff(&before.entropy()?, &after.entropy()?)?;
    assert_eq!(entropy_diff, 0.);

    let err = policy
        .set_flat_parameters(&Tensor::zeros(count + 3, DType::F32, &Device::Cpu)?)
        .unwrap_err();
    assert!(matches!(err, PolicyError::ShapeMismatch { .. }));
    assert_eq!(max_abs_diff(&policy.flat_parameters()?, &flat)?, 0.);
    Ok(())
}

#[rstest]
#[case(small(PolicyConfig::gaussian(4, 2)))]
#[case(small(PolicyConfig::context_gaussian(4, 2)))]
#[case(small(PolicyConfig::categorical(3, 5)))]
fn every_kind_samples_and_scores(#[case] config: PolicyConfig) -> Result<()> {
    let policy = PolicyBuilder::from(config.clone()).build()?;
    let observations = observation_batch(&config, 5, &Device::Cpu)?;
    let actions = policy.sample(&observations)?;
    assert_eq!(actions.dims()[0], 5);
    let log_probs = policy.log_probs(&observations, &actions)?;
    assert_eq!(log_probs.dims(), &[5, 1]);
    let (logp, _) = policy.act(&observations)?;
    assert_eq!(logp.dims(), &[1, 1]);
    Ok(())
}

#[test]
fn reset_context_only_touches_context_policies() -> Result<()> {
    let mut plain = PolicyBuilder::new(small(PolicyConfig::gaussian(4, 2))).build()?;
    assert!(plain.context().is_none());
    plain.reset_context()?;

    let mut policy = PolicyBuilder::new(
        small(PolicyConfig::context_gaussian(4, 2)).with_context_size(3)?,
    )
    .build()?;
    let context = policy.context().expect("context policy").clone();
    context.set(&Tensor::ones(3, DType::F32, &Device::Cpu)?)?;
    policy.reset_context()?;
    let values: Vec<f32> = context.to_vec1()?;
    assert_eq!(values, vec![0., 0., 0.]);
    assert!(matches!(policy, PolicyKind::ContextGaussian(_)));
    assert_eq!(policy.input_size(), 4);
    assert_eq!(policy.output_size(), 2);
    Ok(())
}

#[test]
fn invalid_sizes_fail_to_build() {
    let builder = PolicyBuilder::new(PolicyConfig::gaussian(0, 2));
    assert!(matches!(
        builder.build(),
        Err(PolicyError::InvalidConfiguration(_))
    ));
    let builder = PolicyBuilder::new(PolicyConfig::categorical(3, 5).with_hidden_sizes(vec![]));
    assert!(matches!(
        builder.build(),
        Err(PolicyError::InvalidConfiguration(_))
    ));
}
