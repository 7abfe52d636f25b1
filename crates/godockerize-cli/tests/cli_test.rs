use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn godockerize() -> assert_cmd::Command {
    cargo_bin_cmd!("godockerize")
}

// ── Help / Version ──

#[test]
fn shows_help() {
    godockerize()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build Docker images from Go packages"));
}

#[test]
fn shows_version() {
    godockerize()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("godockerize"));
}

#[test]
fn build_help_lists_flags() {
    godockerize()
        .args(["build", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--tag"))
        .stdout(predicate::str::contains("--base"))
        .stdout(predicate::str::contains("--env"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("entrypoint"));
}

// ── Usage errors ──

#[test]
fn build_without_packages_fails() {
    let tmp = TempDir::new().unwrap();

    godockerize()
        .current_dir(tmp.path())
        .args(["build", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            r#""godockerize build" requires 1 or more arguments"#,
        ));
}

#[test]
fn missing_subcommand_fails() {
    godockerize().assert().failure();
}

#[test]
fn unknown_flag_fails() {
    godockerize()
        .args(["build", "--frobnicate", "./cmd/server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--frobnicate"));
}

// ── Config ──

#[test]
fn build_with_invalid_config_fails() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("godockerize.toml"), "[build\n").unwrap();

    godockerize()
        .current_dir(tmp.path())
        .args(["build", "--dry-run", "./cmd/server"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config"));
}
