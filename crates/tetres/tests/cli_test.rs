//! Integration tests for the `tetres` CLI binary.
//!
//! Argument parsing, help output, completions and error exits run without
//! a server; the record tests point `--server` at a wiremock instance.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `tetres` binary with env isolation.
///
/// Clears all `TETRES_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn tetres_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tetres");
    cmd.env("HOME", "/tmp/tetres-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/tetres-cli-test-nonexistent")
        .env_remove("TETRES_PROFILE")
        .env_remove("TETRES_SERVER")
        .env_remove("TETRES_OUTPUT")
        .env_remove("TETRES_INSECURE")
        .env_remove("TETRES_TIMEOUT")
        .env_remove("TETRES_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn ok(obj: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "code": 1, "message": "", "obj": obj }))
}

fn event(id: i64, name: &str, start: &str) -> Value {
    json!({
        "__class__": "SpecialEventInfo",
        "id": id,
        "name": name,
        "start_time": start,
        "end_time": start,
        "attendance": 1000,
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = tetres_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    tetres_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("TeTRES")
            .and(predicate::str::contains("special-events"))
            .and(predicate::str::contains("work-zones"))
            .and(predicate::str::contains("snow-management"))
            .and(predicate::str::contains("action-logs")),
    );
}

#[test]
fn test_version_flag() {
    tetres_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tetres"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    tetres_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    tetres_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = tetres_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_list_without_server_is_usage_error() {
    tetres_cmd()
        .args(["special-events", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("server").or(predicate::str::contains("config")));
}

#[test]
fn test_unknown_profile_is_usage_error() {
    tetres_cmd()
        .args(["--profile", "nope", "work-zones", "list", "--group", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_invalid_output_format() {
    let output = tetres_cmd()
        .args(["--output", "invalid", "special-events", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("possible values"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_config_show_no_config() {
    tetres_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_path_prints_toml_location() {
    tetres_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_special_events_subcommands_exist() {
    tetres_cmd()
        .args(["special-events", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("years"))
                .and(predicate::str::contains("insert-all"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_action_logs_subcommands_exist() {
    tetres_cmd()
        .args(["action-logs", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list").and(predicate::str::contains("proceed")));
}

#[test]
fn test_reliability_routes_subcommands_exist() {
    tetres_cmd()
        .args(["reliability-routes", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("opposite"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_work_zone_groups_alias() {
    tetres_cmd()
        .args(["wzg", "list", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--year"));
}

// ── Against a server ────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_special_events_list_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tetres/adm/sevent/list"))
        .respond_with(ok(json!({ "list": [
            event(1, "Concert", "2024-05-01 18:00:00"),
            event(2, "State Fair", "2024-08-22 09:00:00"),
        ] })))
        .mount(&server)
        .await;

    let output = tetres_cmd()
        .args(["--server", &server.uri(), "-o", "json", "special-events", "list"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let listed: Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Concert"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_years_filter_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/list/year"))
        .and(body_string_contains("year=2024"))
        .respond_with(ok(json!({ "list": [event(7, "Marathon", "2024-10-06 07:00:00")] })))
        .expect(1)
        .mount(&server)
        .await;

    tetres_cmd()
        .args(["-s", &server.uri(), "-o", "plain", "se", "ls", "--year", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_delete_exits_with_rejection_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/delete"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "code": -1, "message": "in use", "obj": null })),
        )
        .mount(&server)
        .await;

    tetres_cmd()
        .args(["-s", &server.uri(), "--yes", "special-events", "delete", "4"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("in use"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_reports_server_confirmed_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/sevent/delete"))
        .and(body_string_contains("ids=%5B4%2C5%5D"))
        .respond_with(ok(json!([4])))
        .expect(1)
        .mount(&server)
        .await;

    tetres_cmd()
        .args(["-s", &server.uri(), "--yes", "special-events", "delete", "4", "5"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Deleted 1 special event records"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_work_zone_groups_list_plain_ids_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tetres/adm/wz_group/list"))
        .respond_with(ok(json!({ "list": [
            { "id": 4, "name": "Unweave the Weave" },
            { "id": 2, "name": "I-94 rebuild" },
        ] })))
        .expect(1)
        .mount(&server)
        .await;

    tetres_cmd()
        .args(["-s", &server.uri(), "-o", "plain", "work-zone-groups", "list"])
        .assert()
        .success()
        .stdout("2\n4\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_opposite_route_printed_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tetres/adm/route/opposite_route"))
        .and(body_string_contains("id=7"))
        .respond_with(ok(json!({ "name": "I-494 EB", "rnodes": ["rnd_88", "rnd_87"] })))
        .expect(1)
        .mount(&server)
        .await;

    let output = tetres_cmd()
        .args(["-s", &server.uri(), "-o", "json", "rr", "opposite", "7"])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", combined_output(&output));
    let route: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(route["name"], json!("I-494 EB"));
}

#[test]
fn test_reliability_routes_have_no_years() {
    tetres_cmd()
        .args(["-s", "http://127.0.0.1:9", "reliability-routes", "years"])
        .assert()
        .code(5);
}

#[test]
fn test_unsupported_operation_exits_without_request() {
    // Snow routes have no years endpoint; nothing listens on port 9.
    tetres_cmd()
        .args(["-s", "http://127.0.0.1:9", "snow-routes", "years"])
        .assert()
        .code(5);
}

#[test]
fn test_unreachable_server_is_connection_error() {
    tetres_cmd()
        .args(["-s", "http://127.0.0.1:9", "--timeout", "2", "snow-events", "years"])
        .assert()
        .code(7);
}
