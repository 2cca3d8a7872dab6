use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn modkit() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_modkit"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn runs_the_configured_sides_and_writes_options() {
    let dir = tempdir().unwrap();
    let options_dir = dir.path().join("options");
    let config = dir.path().join("host.toml");
    fs::write(
        &config,
        format!(
            "id = \"charmony\"\nname = \"Charmony\"\nsides = [\"common\", \"server\"]\n\n\
             [options]\ndir = {:?}\n",
            options_dir.display().to_string()
        ),
    )
    .unwrap();

    modkit()
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Running common features for Charmony"))
        .stdout(predicate::str::contains("No server features to set up for Charmony, skipping"));

    assert!(options_dir.join("charmony-common.toml").exists());
    assert!(!options_dir.join("charmony-server.toml").exists());
}

#[test]
fn mixin_disable_mode_is_announced() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("charmony-common.toml"),
        "[diagnostics]\nmixins_disable_mode = true\n",
    )
    .unwrap();

    modkit()
        .args(["--id", "charmony", "--side", "common", "--options-dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CHARMONY IS RUNNING IN MIXIN DISABLE MODE"));
}

#[test]
fn invalid_mod_id_fails() {
    let dir = tempdir().unwrap();

    modkit()
        .args(["--id", "Not Valid", "--options-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mod id"));
}

#[test]
fn unknown_side_is_a_usage_error() {
    modkit()
        .args(["--side", "physical"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown side"));
}
