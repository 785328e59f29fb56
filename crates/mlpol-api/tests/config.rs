use anyhow::Result;
use mlpol_api::{DeviceConfig, PolicyConfig, PolicyType};
use mlpol_core::{ActivationKind, PolicyError};

#[test]
fn defaults_fill_in_missing_fields() -> Result<()> {
    let config = PolicyConfig::from_json(
        r#"{ "input_size": 4, "output_size": 2, "policy": { "kind": "context_gaussian" } }"#,
    )?;
    assert_eq!(config.hidden_sizes, vec![100, 100]);
    assert_eq!(config.device, DeviceConfig::Cpu);
    assert_eq!(
        config.policy,
        PolicyType::ContextGaussian {
            activation: ActivationKind::Relu,
            context_size: 2
        }
    );
    assert_eq!(config, PolicyConfig::context_gaussian(4, 2));
    Ok(())
}

#[test]
fn json_round_trips() -> Result<()> {
    let config = PolicyConfig::gaussian(3, 1)
        .with_hidden_sizes(vec![16, 16, 16])
        .with_activation("tanh")?;
    let parsed = PolicyConfig::from_json(&config.to_json()?)?;
    assert_eq!(parsed, config);
    assert_eq!(parsed.mlp_config().activation, ActivationKind::Tanh);
    Ok(())
}

#[test]
fn unknown_activation_is_a_configuration_error() {
    let err = PolicyConfig::gaussian(3, 1).with_activation("sigmoid").unwrap_err();
    assert!(matches!(err, PolicyError::InvalidConfiguration(_)));

    let err = PolicyConfig::from_json(
        r#"{
            "input_size": 4,
            "output_size": 2,
            "policy": { "kind": "gaussian", "activation": "sigmoid" }
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, PolicyError::InvalidConfiguration(_)));
}

#[test]
fn categorical_rejects_gaussian_only_options() {
    assert!(matches!(
        PolicyConfig::categorical(3, 5).with_activation("tanh"),
        Err(PolicyError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        PolicyConfig::categorical(3, 5).with_context_size(4),
        Err(PolicyError::InvalidConfiguration(_))
    ));
}

#[test]
fn categorical_config_parses() -> Result<()> {
    let config = PolicyConfig::from_json(
        r#"{
            "input_size": 3,
            "output_size": 5,
            "hidden_sizes": [8],
            "policy": { "kind": "categorical" },
            "device": "cpu"
        }"#,
    )?;
    assert_eq!(config, PolicyConfig::categorical(3, 5).with_hidden_sizes(vec![8]));
    Ok(())
}
