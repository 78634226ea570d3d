#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::net::TcpListener;
use std::process::Output;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin_cmd;
use predicates::prelude::{PredicateBooleanExt, predicate};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOLIDAYS_US_2026: &str = include_str!("../../../fixtures/festivo/holidays_us_2026.json");
const HOLIDAYS_GB_SCT_2026: &str =
    include_str!("../../../fixtures/festivo/holidays_gb_sct_2026.json");
const CHECK_US_2026_12_25: &str =
    include_str!("../../../fixtures/festivo/check_us_2026_12_25.json");

/// Runs `festivo` with `args` against `base_url` on a blocking thread.
async fn run_against(base_url: String, args: &'static [&'static str]) -> Output {
    tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().unwrap();
        cargo_bin_cmd!("festivo")
            .arg("--dir")
            .arg(dir.path())
            .arg("--base-url")
            .arg(&base_url)
            .args(args)
            .env_remove("FESTIVO_KEY")
            .env_remove("RUST_LOG")
            .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

#[test]
fn test_help() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("festivo");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("holidays"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_holidays_missing_country() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("festivo");
    cmd.args(["holidays", "--year", "2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--country"));
}

#[test]
fn test_holidays_empty_country_fails_validation() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("festivo");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["holidays", "--country", "", "--year", "2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("country must not be empty"));
}

#[test]
fn test_city_empty_code_fails_validation() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("festivo");
    cmd.arg("--dir")
        .arg(dir.path())
        .args(["city", "--country", "IT", "--city", " ", "--year", "2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("city_code must not be empty"));
}

#[test]
fn test_region_missing_region() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("festivo");
    cmd.args(["region", "--country", "GB"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--region"));
}

#[test]
fn test_invalid_base_url_is_rejected_by_parser() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("festivo");
    cmd.args(["--base-url", "not a url", "holidays", "--country", "US"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base-url"));
}

#[test]
fn test_config_init_then_show() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cargo_bin_cmd!("festivo")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .success();
    let written = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(written.contains("timeout_secs = 30"));

    cargo_bin_cmd!("festivo")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "show"])
        .env_remove("FESTIVO_KEY")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.getfestivo.com/"))
        .stdout(predicate::str::contains("Timeout: 30s"))
        .stdout(predicate::str::contains("API key: not set"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[api]\n").unwrap();

    // Act & Assert
    cargo_bin_cmd!("festivo")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file already exists"));
}

#[test]
fn test_config_show_uses_configured_base_url_and_hides_key() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[api]\nbase_url = \"http://127.0.0.1:9/festivo\"\n",
    )
    .unwrap();

    // Act & Assert
    cargo_bin_cmd!("festivo")
        .arg("--dir")
        .arg(dir.path())
        .args(["config", "show"])
        .env("FESTIVO_KEY", "very-secret-key")
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://127.0.0.1:9/festivo/"))
        .stdout(predicate::str::contains("API key: set"))
        .stdout(predicate::str::contains("very-secret-key").not());
}

#[tokio::test]
async fn test_holidays_against_mock_server() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/public-holidays/list"))
        .and(query_param("country", "US"))
        .and(query_param("year", "2026"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOLIDAYS_US_2026))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let output = run_against(
        server.uri(),
        &["holidays", "--country", "US", "--year", "2026"],
    )
    .await;

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("New Year's Day"))
        .stdout(predicate::str::contains("2026-07-04\t2026-07-03"))
        .stdout(predicate::str::contains("Total: 3 holidays"));
}

#[tokio::test]
async fn test_region_against_mock_server() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/public-holidays/list"))
        .and(query_param("country", "GB"))
        .and(query_param("regions", "GB-SCT"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOLIDAYS_GB_SCT_2026))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let output = run_against(
        server.uri(),
        &["region", "--country", "GB", "--region", "GB-SCT", "--year", "2026"],
    )
    .await;

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "St Andrew's Day (Latha Naomh Anndrais)",
        ));
}

#[tokio::test]
async fn test_check_against_mock_server() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/public-holidays/check"))
        .and(query_param("country", "US"))
        .and(query_param("date", "2026-12-25"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHECK_US_2026_12_25))
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let output = run_against(
        server.uri(),
        &["check", "--country", "US", "--date", "2026-12-25"],
    )
    .await;

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2026-12-25 is a holiday in US: Christmas Day",
        ));
}

#[tokio::test]
async fn test_api_error_status_is_reported() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/public-holidays/list"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"invalid api key"}"#))
        .mount(&server)
        .await;

    // Act
    let output = run_against(
        server.uri(),
        &["holidays", "--country", "US", "--year", "2026"],
    )
    .await;

    // Assert
    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 401"))
        .stderr(predicate::str::contains("invalid api key"));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Arrange
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    // Act
    let output = run_against(
        format!("http://127.0.0.1:{port}/"),
        &["holidays", "--country", "US", "--year", "2026"],
    )
    .await;

    // Assert
    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("network error"));
}

#[tokio::test]
async fn test_api_key_flag_overrides_environment() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/public-holidays/list"))
        .and(header("Authorization", "Bearer from-flag"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HOLIDAYS_US_2026))
        .expect(1)
        .mount(&server)
        .await;
    let base_url = server.uri();

    // Act
    let output = tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().unwrap();
        cargo_bin_cmd!("festivo")
            .arg("--dir")
            .arg(dir.path())
            .arg("--base-url")
            .arg(&base_url)
            .args(["--api-key", "from-flag"])
            .args(["holidays", "--country", "US", "--year", "2026"])
            .env("FESTIVO_KEY", "from-env")
            .env_remove("RUST_LOG")
            .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    // Assert
    output.assert().success();
}

#[tokio::test]
async fn test_api_key_read_from_environment() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/public-holidays/check"))
        .and(header("Authorization", "Bearer from-env"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"is_holiday":false}"#))
        .expect(1)
        .mount(&server)
        .await;
    let base_url = server.uri();

    // Act
    let output = tokio::task::spawn_blocking(move || {
        let dir = tempfile::tempdir().unwrap();
        cargo_bin_cmd!("festivo")
            .arg("--dir")
            .arg(dir.path())
            .arg("--base-url")
            .arg(&base_url)
            .args(["check", "--country", "US", "--date", "2026-03-10"])
            .env("FESTIVO_KEY", "from-env")
            .env_remove("RUST_LOG")
            .env_remove("OTEL_EXPORTER_OTLP_ENDPOINT")
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    // Assert
    output
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-03-10 is not a holiday in US"));
}
