//! Command-line behaviour of the `license-sniff` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("license-sniff").unwrap();
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_json_report_for_arguments() {
    let dir = TempDir::new().unwrap();
    let output = cmd(&dir)
        .args(["--report", "json", "MIT", "asdf\nISC\nasdf", "this is empty, hi"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let findings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let findings = findings.as_array().unwrap();
    assert_eq!(findings.len(), 3);
    assert_eq!(findings[0]["license"], "MIT");
    assert_eq!(findings[0]["verdict"], "pass");
    assert_eq!(findings[1]["license"], "ISC*");
    assert_eq!(findings[2]["license"], serde_json::Value::Null);
    assert_eq!(findings[2]["verdict"], "warn");
}

#[test]
fn test_error_verdict_sets_exit_code() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--quiet", "GNU GENERAL PUBLIC LICENSE\nVersion 3, 29 June 2007"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Error: 1"));
}

#[test]
fn test_reads_stdin_when_no_input() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["--report", "json"])
        .write_stdin("DO WHAT THE FUCK YOU WANT TO PUBLIC LICENSE\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("WTFPL*"))
        .stdout(predicate::str::contains("stdin"));
}

#[test]
fn test_file_input() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("LICENSE");
    std::fs::write(
        &path,
        "Apache License\nVersion 2.0, January 2004\nhttp://www.apache.org/licenses/\n",
    )
    .unwrap();
    cmd(&dir)
        .args(["--report", "json", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Apache-2.0*"));
}

#[test]
fn test_package_descriptor() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("package.json");
    std::fs::write(&path, r#"{ "name": "demo", "license": "SEE LICENSE IN LICENSE.md" }"#).unwrap();
    cmd(&dir)
        .args(["--report", "json", "--package"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom: LICENSE.md"));
}

#[test]
fn test_package_with_non_string_license_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("package.json");
    std::fs::write(&path, r#"{ "name": "demo", "license": 42 }"#).unwrap();
    cmd(&dir)
        .arg("--package")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("license must be a string"));
}

#[test]
fn test_project_config_is_used() {
    let dir = TempDir::new().unwrap();
    let cfg_dir = dir.path().join(".license-sniff");
    std::fs::create_dir(&cfg_dir).unwrap();
    std::fs::write(
        cfg_dir.join("config.toml"),
        "[policy]\ndefault = \"pass\"\n\n[policy.licenses]\n\"MIT*\" = \"error\"\n",
    )
    .unwrap();

    cmd(&dir).args(["--quiet", "MIT"]).assert().success();
    cmd(&dir)
        .args(["--quiet", "asdf MIT asdf"])
        .assert()
        .code(1);
}

#[test]
fn test_terminal_report_lists_warnings() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("See license at http://example.com/foo")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUMMARY"))
        .stdout(predicate::str::contains("Custom: http://example.com/foo"));
}
