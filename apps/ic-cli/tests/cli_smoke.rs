use std::path::PathBuf;
use std::process::Command;

fn workdir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("ic_cli_smoke").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_config(dir: &std::path::Path, log_line: &str) -> PathBuf {
    let path = dir.join("controller.yaml");
    let yaml = format!(
        "version: 1\n\
         controller:\n  reference: 100.0\n  min: 100.0\n  max: 200.0\n  initial: 200.0\n\
         logging:\n  capacity: 3\n{log_line}"
    );
    std::fs::write(&path, yaml).unwrap();
    path
}

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ic-cli"))
}

#[test]
fn validate_prints_summary() {
    let dir = workdir("validate");
    let config = write_config(&dir, "");

    let output = cli().arg("validate").arg(&config).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("estimated on first step"));
    assert!(stdout.contains("Config is valid"));
}

#[test]
fn validate_rejects_bad_bounds() {
    let dir = workdir("invalid");
    let config = dir.join("controller.yaml");
    std::fs::write(
        &config,
        "version: 1\ncontroller: { reference: 1.0, min: 5.0, max: 2.0, initial: 3.0 }\n",
    )
    .unwrap();

    let output = cli().arg("validate").arg(&config).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn run_log_flag_overrides_configured_path() {
    let dir = workdir("run");
    let configured = dir.join("configured.log");
    let override_log = dir.join("override.log");
    let config = write_config(&dir, &format!("  path: {}\n", configured.display()));

    let input = dir.join("measurements.txt");
    std::fs::write(&input, "# scenario\n150\n50\n200\n66.667\n").unwrap();

    let output = cli()
        .arg("run")
        .arg(&config)
        .arg("--input")
        .arg(&input)
        .arg("--log")
        .arg(&override_log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let signals: Vec<f64> = stdout
        .lines()
        .map(|l| l.split_whitespace().nth(2).unwrap().parse().unwrap())
        .collect();
    assert_eq!(signals.len(), 4);
    assert!((signals[0] - 400.0 / 3.0).abs() < 0.01);
    assert_eq!(signals[1], 200.0);
    assert_eq!(signals[2], 100.0);
    assert!((signals[3] - 1300.0 / 9.0).abs() < 0.01);

    assert!(!configured.exists());
    let log = std::fs::read_to_string(&override_log).unwrap();
    let tags: Vec<&str> = log
        .lines()
        .skip(1)
        .map(|l| l.split_whitespace().nth(1).unwrap())
        .collect();
    // header, one wrap of 3, then the pending record on close
    assert_eq!(tags, ["2", "3", "4", "5"]);
}
