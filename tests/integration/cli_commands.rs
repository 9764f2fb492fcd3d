//! Integration tests for the launchplan binary

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

struct Sandbox {
    temp: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("home")).unwrap();
        fs::create_dir_all(temp.path().join("xdg")).unwrap();
        fs::create_dir_all(temp.path().join("ws")).unwrap();
        Self { temp }
    }

    fn workspace(&self) -> PathBuf {
        self.temp.path().join("ws")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_launchplan"))
            .env("HOME", self.temp.path().join("home"))
            .env("XDG_CONFIG_HOME", self.temp.path().join("xdg"))
            .env_remove("LAUNCHPLAN_ENV")
            .env_remove("LAUNCHPLAN_LOG")
            .arg("--quiet")
            .arg("--workspace")
            .arg(self.workspace())
            .args(args)
            .output()
            .unwrap()
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "launchplan {:?} should succeed: stderr={:?}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_plan_json_for_key_file_accounts() {
    let sandbox = Sandbox::new();
    write(
        &sandbox.workspace().join("data").join("private_keys.txt"),
        "key-one\n\nkey-two\nkey-three\n",
    );

    let stdout = sandbox.run_ok(&["plan", "--seed", "8", "--format", "json"]);
    let plans: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let plans = plans.as_array().unwrap();
    assert_eq!(plans.len(), 3);
    assert_eq!(plans[2]["account"], 3);
    for plan in plans {
        assert_eq!(plan["actions"][0], "faucet");
        assert_eq!(plan["tail"].as_array().unwrap().last().unwrap(), "logs");
    }
}

#[test]
fn test_shared_plan_when_per_account_randomization_is_off() {
    let sandbox = Sandbox::new();
    write(
        &sandbox.workspace().join("config").join("config.toml"),
        "[run]\nrandom_for_each_account = false\n",
    );

    let stdout = sandbox.run_ok(&["plan", "--accounts", "4", "--format", "json"]);
    let plans: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let plans = plans.as_array().unwrap();
    assert_eq!(plans.len(), 4);
    assert!(plans.iter().all(|p| p["actions"] == plans[0]["actions"]));
}

#[test]
fn test_schedule_json_spans_window() {
    let sandbox = Sandbox::new();
    let stdout = sandbox.run_ok(&[
        "schedule", "--hours", "24", "--accounts", "10", "--format", "json",
    ]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let offsets: Vec<u64> = value["launches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["offset_secs"].as_u64().unwrap())
        .collect();
    assert_eq!(offsets.len(), 10);
    assert_eq!(offsets[0], 0);
    assert_eq!(offsets[9], 86_400);
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_manifest_then_simulate() {
    let sandbox = Sandbox::new();
    let manifest = sandbox.temp.path().join("runs").join("run.json");
    let manifest_str = manifest.to_string_lossy().to_string();

    let stdout = sandbox.run_ok(&[
        "manifest", "--output", &manifest_str, "--hours", "1", "--accounts", "3", "--seed",
        "4",
    ]);
    assert!(stdout.contains("Wrote manifest for 3 accounts"));
    assert!(manifest.exists());

    let stdout = sandbox.run_ok(&[
        "simulate", "--manifest", &manifest_str, "--speedup", "3600", "--format", "json",
    ]);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let outcomes = report["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 3);
    assert!(outcomes
        .iter()
        .all(|o| o["status"]["status"] == "completed"));
}

#[test]
fn test_defaults_round_trip_through_validate() {
    let sandbox = Sandbox::new();
    let defaults = sandbox.run_ok(&["defaults"]);
    let path = sandbox.temp.path().join("defaults.toml");
    fs::write(&path, defaults).unwrap();

    let stdout = sandbox.run_ok(&["--config", path.to_str().unwrap(), "validate"]);
    assert!(stdout.contains("Configuration is valid"));
}

#[test]
fn test_validate_fails_with_every_error() {
    let sandbox = Sandbox::new();
    write(
        &sandbox.workspace().join("config").join("config.toml"),
        "[accounts]\nrange = [9, 2]\n\n[logging]\nformat = \"xml\"\n",
    );

    let output = sandbox.run(&["validate"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Configuration validation failed"));
    assert!(stderr.contains("Accounts:"));
    assert!(stderr.contains("Logging:"));
}

#[test]
fn test_missing_key_file_exits_nonzero() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["plan"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Key file not found"));
}
