//! Integration tests for layered configuration loading

use launchplan::config::{ConfigLoader, LaunchConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::integration::with_xdg_env;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    fs::create_dir_all(&workspace).unwrap();

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace).unwrap());
    assert_eq!(config, LaunchConfig::default());
}

#[test]
fn test_global_file_is_loaded() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    fs::create_dir_all(&workspace).unwrap();
    write(
        &test_dir.path().join("launchplan").join("config.toml"),
        "[schedule]\nenabled = true\nwindow_hours = 6\n",
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace).unwrap());
    assert!(config.schedule.enabled);
    assert_eq!(config.window_secs().unwrap(), 6 * 3_600);
    assert_eq!(config.categories.len(), 8);
}

#[test]
fn test_workspace_file_overrides_global() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write(
        &test_dir.path().join("launchplan").join("config.toml"),
        "[schedule]\nenabled = true\nwindow_hours = 6\n\n[run]\nseed = 5\n",
    );
    write(
        &workspace.join("config").join("config.toml"),
        "[schedule]\nwindow_hours = 3\n",
    );

    let config = with_xdg_env(&test_dir, || ConfigLoader::load(&workspace).unwrap());
    assert!(config.schedule.enabled);
    assert_eq!(config.schedule.window_hours, 3);
    assert_eq!(config.run.seed, Some(5));
}

#[test]
fn test_env_specific_workspace_file() {
    let test_dir = TempDir::new().unwrap();
    let workspace = test_dir.path().join("ws");
    write(
        &workspace.join("config").join("config.toml"),
        "[accounts]\nrange = [1, 10]\n",
    );
    write(
        &workspace.join("config").join("staging.toml"),
        "[accounts]\nrange = [4, 6]\n",
    );

    let config = with_xdg_env(&test_dir, || {
        std::env::set_var("LAUNCHPLAN_ENV", "staging");
        ConfigLoader::load(&workspace).unwrap()
    });
    assert_eq!(config.accounts.range, [4, 6]);
    assert_eq!(config.accounts.resolve(&workspace).unwrap(), vec![4, 5, 6]);
}

#[test]
fn test_categories_replace_builtin_layout() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("custom.toml");
    write(
        &config_file,
        r#"
[[categories]]
name = "INITIAL"
role = "head"
rule = { kind = "fixed_all" }
candidates = [{ action = "faucet" }, { action = "dusted" }]

[[categories]]
name = "OTHER"
role = "body"
rule = { kind = "probability_single", probability = 250 }
candidates = [{ action = "nad_domains" }]

[[categories]]
name = "TERMINAL"
role = "terminal"
rule = { kind = "fixed_terminal" }
candidates = [{ action = "logs" }]
"#,
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());
    let layout = config.plan_layout().unwrap();
    assert_eq!(layout.head()[0].enabled_actions(), vec!["faucet", "dusted"]);
    // Out-of-range probabilities are clamped, not rejected
    let mut rng = launchplan::random::run_rng(Some(1)).unwrap();
    let plan = config.generator().unwrap().generate(&mut rng);
    assert_eq!(plan.actions(), ["faucet", "dusted", "nad_domains", "logs"]);
}

#[test]
fn test_misplaced_category_fails_validation() {
    let test_dir = TempDir::new().unwrap();
    let config_file = test_dir.path().join("bad.toml");
    write(
        &config_file,
        r#"
[[categories]]
name = "SWAPS"
role = "head"
rule = { kind = "range_sample", min = 1, max = 3 }
candidates = [{ action = "bean" }]
"#,
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().contains("not allowed in the head role"));
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let test_dir = TempDir::new().unwrap();
    assert!(ConfigLoader::load_from_file(&test_dir.path().join("absent.toml")).is_err());
}

#[test]
fn test_global_config_path_follows_xdg_config_home() {
    let test_dir = TempDir::new().unwrap();
    let path = with_xdg_env(&test_dir, ConfigLoader::global_config_path);
    assert_eq!(
        path,
        Some(test_dir.path().join("launchplan").join("config.toml"))
    );
}
