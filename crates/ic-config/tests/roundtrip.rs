use ic_config::*;
use ic_controls::ControllerParams;

fn params() -> ControllerParams {
    ControllerParams {
        reference: 100.0,
        min: 100.0,
        max: 200.0,
        initial: 200.0,
        k_i: 0.25,
    }
}

#[test]
fn parses_minimal_yaml() {
    let yaml = r#"
version: 1
controller:
  reference: 100.0
  min: 100.0
  max: 200.0
  initial: 150.0
"#;
    let cfg = from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.controller.k_i, 0.0);
    assert_eq!(cfg.controller.initial, 150.0);
    assert_eq!(cfg.log_capacity(), 0);
    assert!(cfg.log_path().is_none());
}

#[test]
fn parses_logging_section() {
    let yaml = r#"
version: 1
controller: { reference: 5.0, min: 1.0, max: 10.0, initial: 2.0, k_i: 0.5 }
logging:
  capacity: 16
  path: control.log
"#;
    let cfg = from_yaml_str(yaml).unwrap();
    assert_eq!(cfg.log_capacity(), 16);
    assert_eq!(cfg.log_path(), Some(std::path::Path::new("control.log")));
}

#[test]
fn rejects_invalid_initial() {
    let yaml = r#"
version: 1
controller: { reference: 5.0, min: 1.0, max: 10.0, initial: 20.0 }
"#;
    let err = from_yaml_str(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));
}

#[test]
fn rejects_malformed_yaml() {
    let err = from_yaml_str("version: [").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[test]
fn save_and_load() {
    let dir = std::env::temp_dir().join("ic_config_roundtrip_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("controller.yaml");

    let cfg = ControllerConfig::new(params()).with_logging(8, Some("run.log".into()));
    save_yaml(&path, &cfg).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn save_refuses_invalid_config() {
    let dir = std::env::temp_dir().join("ic_config_roundtrip_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("invalid.yaml");
    let _ = std::fs::remove_file(&path);

    let mut cfg = ControllerConfig::new(params());
    cfg.controller.reference = -1.0;
    assert!(save_yaml(&path, &cfg).is_err());
    assert!(!path.exists());
}
