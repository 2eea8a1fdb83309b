use std::path::Path;

use sustain_kube_calibration::{
    CalibrationError, ConfigError, ExperimentConfig, HardwareProfile, Scenario, UtilizationWave, WorkloadConfig,
};

#[test]
fn test_full_config() {
    let config = ExperimentConfig::from_yaml(
        r#"
workload:
  points: 500
  cycles: 2
  seed: 42
  cpu:
    base: 0.6
    amplitude: 0.3
    noise: 0.0
    min: 0.05
    max: 0.95
  memory:
    noise: 0.05
scenarios:
  - name: small
    cores: 2
    mem_gb: 4
    p_idle: 1.5
    p_max: 6
    mem_power_coeff: 0.3
"#,
    )
    .unwrap();

    assert_eq!(config.workload.points, 500);
    assert_eq!(config.workload.cycles, 2.);
    assert_eq!(config.workload.seed, 42);
    assert_eq!(
        config.workload.cpu,
        UtilizationWave {
            base: 0.6,
            amplitude: 0.3,
            noise: 0.,
            min: 0.05,
            max: 0.95
        }
    );
    assert_eq!(
        config.workload.memory,
        UtilizationWave {
            noise: 0.05,
            ..UtilizationWave::memory()
        }
    );
    assert_eq!(
        config.scenarios,
        vec![Scenario::new("small", HardwareProfile::new(2., 4., 1.5, 6., 0.3).unwrap())]
    );
}

#[test]
fn test_defaults() {
    let config = ExperimentConfig::from_yaml("{}").unwrap();
    assert_eq!(config, ExperimentConfig::default());
    assert_eq!(config.workload, WorkloadConfig::default());
    assert_eq!(config.scenarios.len(), 3);
}

#[test]
fn test_profile_fields_are_required() {
    let result = ExperimentConfig::from_yaml(
        r#"
scenarios:
  - name: incomplete
    cores: 2
    mem_gb: 4
    p_max: 6
    mem_power_coeff: 0.3
"#,
    );
    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}

#[test]
fn test_invalid_profile() {
    let result = ExperimentConfig::from_yaml(
        r#"
scenarios:
  - name: inverted
    cores: 2
    mem_gb: 4
    p_idle: 10
    p_max: 6
    mem_power_coeff: 0.3
"#,
    );
    assert!(matches!(
        result,
        Err(ConfigError::Calibration(CalibrationError::InvalidProfile(_)))
    ));
}

#[test]
fn test_unknown_field() {
    assert!(matches!(
        ExperimentConfig::from_yaml("workload:\n  length: 10\n"),
        Err(ConfigError::Yaml(_))
    ));
}

#[test]
fn test_missing_file() {
    let path = Path::new("no/such/config.yaml");
    match ExperimentConfig::from_file(path) {
        Err(ConfigError::Io { path: error_path, .. }) => assert_eq!(error_path, path),
        other => panic!("expected I/O error, got {:?}", other),
    }
    assert!(matches!(
        ExperimentConfig::from_file(path.to_path_buf()),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_profile_deserialization_is_validated() {
    let profile: HardwareProfile =
        serde_yaml::from_str("{cores: 8, mem_gb: 32, p_idle: 20, p_max: 120, mem_power_coeff: 0.392}").unwrap();
    assert_eq!(profile, HardwareProfile::new(8., 32., 20., 120., 0.392).unwrap());

    let yaml = "{cores: 8, mem_gb: 32, p_idle: 20, p_max: 10, mem_power_coeff: 0.392}";
    assert!(serde_yaml::from_str::<HardwareProfile>(yaml).is_err());
}
