use osc_project::schema::*;
use osc_project::{load, load_json, load_yaml, save_json, save_yaml, validate_problem};

#[test]
fn roundtrip_yaml_bridge() {
    let problem = ProblemDef::bridge_example();
    validate_problem(&problem).unwrap();

    let path = std::env::temp_dir().join("osc_project_roundtrip_bridge.yaml");
    save_yaml(&path, &problem).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(problem, loaded);
}

#[test]
fn roundtrip_json_with_options() {
    let mut problem = ProblemDef::bridge_example();
    problem.name = "Coefficient damping".to_string();
    problem.parameters.damping = DampingDef::Coefficient { b_n_s_per_m: 4472.0 };
    problem.initial_state = Some([0.001, 0.0]);
    problem.comparison = ComparisonDef {
        reference: Some(MethodDef::RungeKutta5),
        zero_reference: ZeroReferenceDef::AbsoluteFallback,
        max_index: Some(500),
    };

    let path = std::env::temp_dir().join("osc_project_roundtrip_options.json");
    save_json(&path, &problem).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(problem, loaded);

    let by_extension = load(&path).unwrap();
    assert_eq!(problem, by_extension);
}

#[test]
fn minimal_yaml_fills_defaults() {
    let yaml = r#"
version: 1
name: Minimal
parameters:
  mass_kg: 1.0
  stiffness_n_per_m: 4.0
  damping:
    type: Ratio
    zeta: 0.05
time:
  t0_s: 0.0
  t1_s: 5.0
  h_s: 0.01
"#;
    let problem: ProblemDef = serde_yaml::from_str(yaml).unwrap();
    validate_problem(&problem).unwrap();

    assert_eq!(problem.parameters.force_amplitude_n, 0.0);
    assert_eq!(problem.output.precision, 5);
    assert_eq!(problem.compliance.threshold_m, 0.04);
    assert_eq!(problem.limits.max_steps, 100_000);
    assert_eq!(problem.comparison, ComparisonDef::default());
    assert!(problem.starts_at_rest());
}

#[test]
fn invalid_file_is_rejected_on_load() {
    let yaml = r#"
version: 1
name: Broken
parameters:
  mass_kg: -5.0
  stiffness_n_per_m: 4.0
  damping: { type: Coefficient, b_n_s_per_m: 0.0 }
time: { t0_s: 0.0, t1_s: 1.0, h_s: 0.1 }
"#;
    let path = std::env::temp_dir().join("osc_project_invalid.yaml");
    std::fs::write(&path, yaml).unwrap();
    let err = load_yaml(&path).unwrap_err();
    assert!(err.to_string().contains("mass_kg"));
}
