//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("sitepulse").unwrap()
}

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

#[test]
fn test_cli_file_input() {
    cmd().arg(get_fixture_path("healthy.html")).assert().success();
}

#[test]
fn test_cli_stdin_input() {
    let html = std::fs::read_to_string(get_fixture_path("healthy.html")).unwrap();
    cmd().arg("-").write_stdin(html).assert().success();
}

#[test]
fn test_cli_text_format() {
    cmd()
        .args(["-f", "text", &get_fixture_path("healthy.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score:"));
}

#[test]
fn test_cli_json_format() {
    let output = cmd()
        .args(["-f", "json", &get_fixture_path("healthy.html")])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert!(json.get("score").is_some());
    assert!(json.get("features").is_some());
    assert!(json.get("issues").is_some());
}

#[test]
fn test_cli_degraded_page_lists_issues() {
    cmd()
        .arg(get_fixture_path("degraded.html"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing <title>"))
        .stdout(predicate::str::contains("Use exactly one <h1>"));
}

#[test]
fn test_cli_advanced_tier() {
    cmd()
        .args(["-t", "advanced", "-f", "json", &get_fixture_path("healthy.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""tier": "advanced""#));
}

#[test]
fn test_cli_tier_aliases() {
    cmd()
        .args(["-t", "pro", "-f", "json", &get_fixture_path("healthy.html")])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""tier": "advanced""#));
}

#[test]
fn test_cli_invalid_tier() {
    cmd()
        .args(["-t", "enterprise", &get_fixture_path("healthy.html")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid tier"));
}

#[test]
fn test_cli_output_file() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("report.json");

    cmd()
        .args(["-f", "json", "-o", output.to_str().unwrap()])
        .arg(get_fixture_path("healthy.html"))
        .assert()
        .success();

    assert!(output.exists());
    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert!(json.get("score").is_some());
}

#[test]
fn test_cli_invalid_file() {
    cmd().arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_invalid_url() {
    cmd().arg("ftp://example.com/page").assert().failure();
}

#[test]
fn test_cli_unfetchable_url_reports_failure() {
    // Rejected during URL validation, before any request is made.
    cmd()
        .arg("https://")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Analysis failed"));
}

#[test]
fn test_cli_verbose_logs_to_stderr() {
    cmd()
        .args(["-v", &get_fixture_path("healthy.html")])
        .assert()
        .success()
        .stderr(predicate::str::contains("SitePulse"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analyze the health of a web page"));
}
