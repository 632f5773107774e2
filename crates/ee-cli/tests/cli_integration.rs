//! End-to-end tests driving the `energy-estimator` binary over stdin.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::{NamedTempFile, TempDir};

fn estimator_binary() -> &'static str {
    env!("CARGO_BIN_EXE_energy-estimator")
}

/// Runs the binary in an isolated home so no user config leaks in.
fn run_with_input(input: &str, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let home = TempDir::new().unwrap();
    let mut command = Command::new(estimator_binary());
    command
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("EE_POWER_WATTS")
        .env_remove("EE_PRECISION")
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        command.env(key, value);
    }

    let mut child = command.spawn().expect("failed to spawn energy-estimator");
    {
        // The binary may exit before reading stdin (e.g. on a config error).
        let stdin = child.stdin.as_mut().unwrap();
        let _ = stdin.write_all(input.as_bytes());
    }
    child
        .wait_with_output()
        .expect("failed to wait for energy-estimator")
}

fn estimate(input: &str) -> String {
    let output = run_with_input(input, &[], &[]);
    assert!(
        output.status.success(),
        "energy-estimator failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

const SCENARIO_TWO_BODY: &str = "> 1544206562 TurnOff\n\
                                 > 1544206563 Delta +0.5\n\
                                 > 1544210163 Delta -0.25\n\
                                 > 1544210163 Delta -0.25\n\
                                 > 1544211963 Delta +0.75\n";

#[test]
fn test_estimate_two_and_a_half_wh() {
    let input = "> 1544206562 TurnOff\n\
                 > 1544206563 Delta +0.5\n\
                 > 1544210163 TurnOff\n\
                 EOF";
    assert_eq!(estimate(input), "Estimated energy used: 2.5 Wh");
}

#[test]
fn test_estimate_with_duplicate_timestamp() {
    let input = format!("{SCENARIO_TWO_BODY}> 1544213763 TurnOff\nEOF");
    assert_eq!(estimate(&input), "Estimated energy used: 5.625 Wh");
}

#[test]
fn test_sentinel_on_last_data_line() {
    let input = format!("{SCENARIO_TWO_BODY}> 1544213763 TurnOff EOF");
    assert_eq!(estimate(&input), "Estimated energy used: 5.625 Wh");
}

#[test]
fn test_sentinel_attached_to_last_token() {
    let input = format!("{SCENARIO_TWO_BODY}> 1544213763 TurnOffEOF");
    assert_eq!(estimate(&input), "Estimated energy used: 5.625 Wh");
}

#[test]
fn test_record_split_across_lines() {
    let input = format!("{SCENARIO_TWO_BODY}> 1544213763\nTurnOff EOF");
    assert_eq!(estimate(&input), "Estimated energy used: 5.625 Wh");
}

#[test]
fn test_every_token_on_its_own_line() {
    let input = "1544206562\nTurnOff\n1544206563\nDelta\n+0.5\n1544210163\nDelta\n-0.25\n\
                 1544211963\nDelta\n+0.75\n1544213763\nTurnOff\nEOF";
    assert_eq!(estimate(input), "Estimated energy used: 5.625 Wh");
}

#[test]
fn test_too_few_records_estimate_zero() {
    assert_eq!(
        estimate("> 1544206562 TurnOff\n> 1544206563 Delta +0.5\nEOF"),
        "Estimated energy used: 0 Wh"
    );
}

#[test]
fn test_malformed_record_is_skipped_and_logged() {
    let input = "> 1544206562 TurnOff\n\
                 > 1544206563 Delta +0.5\n\
                 > 1544208000 Delta bogus\n\
                 > 1544210163 TurnOff\n\
                 EOF";
    let output = run_with_input(input, &[], &[]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Estimated energy used: 2.5 Wh"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid delta"),
        "expected a parse warning on stderr: {stderr}"
    );
}

#[test]
fn test_input_ends_without_sentinel() {
    let input = "> 1544206562 TurnOff\n> 1544206563 Delta +0.5\n> 1544210163 TurnOff\n";
    assert_eq!(estimate(input), "Estimated energy used: 2.5 Wh");
}

#[test]
fn test_power_override_flag() {
    let input = "1544206562 TurnOff\n1544206563 Delta 1\n1544210163 TurnOff EOF";
    let output = run_with_input(input, &["--power-watts", "60"], &[]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Estimated energy used: 60 Wh"
    );
}

#[test]
fn test_power_from_environment() {
    let input = "1544206562 TurnOff\n1544206563 Delta 1\n1544210163 TurnOff EOF";
    let output = run_with_input(input, &[], &[("EE_POWER_WATTS", "12")]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Estimated energy used: 12 Wh"
    );
}

#[test]
fn test_config_file_sets_power() {
    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(config_file, "power_watts = 40.0").unwrap();
    config_file.flush().unwrap();
    let config_path = config_file.path().to_string_lossy().to_string();

    let input = "1544206562 TurnOff\n1544206563 Delta 0.5\n1544210163 TurnOff EOF";
    let output = run_with_input(input, &["--config", &config_path], &[]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Estimated energy used: 20 Wh"
    );
}

#[test]
fn test_invalid_power_fails() {
    let output = run_with_input("EOF", &["--power-watts=-5"], &[]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("power_watts"), "unexpected stderr: {stderr}");
}

#[test]
fn test_input_file_flag() {
    let mut events = NamedTempFile::new().unwrap();
    write!(
        events,
        "> 1544206562 TurnOff\n> 1544206563 Delta +0.5\n> 1544210163 TurnOff\nEOF"
    )
    .unwrap();
    events.flush().unwrap();
    let path = events.path().to_string_lossy().to_string();

    let output = run_with_input("", &["--input", &path], &[]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "Estimated energy used: 2.5 Wh"
    );
}

#[test]
fn test_dump_lists_ordered_records() {
    let input = format!("{SCENARIO_TWO_BODY}> 1544213763 TurnOff\nEOF");
    let output = run_with_input(&input, &["dump"], &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let timestamps: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(
        timestamps,
        vec![
            "1544206562",
            "1544206563",
            "1544210163",
            "1544211963",
            "1544213763"
        ]
    );
}
