// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that run the `aix` binary against mock HTTP services.
//!
//! Each test owns a temp workspace and its own mock server, and runs the
//! binary with its working directory and config home pointed at the
//! workspace so no host configuration leaks in.

use std::path::Path;
use std::process::Output;

use aix_test_utils::TestWorkspace;
use tokio::process::Command;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_services() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bittensor"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"bittensor": {"usd": 400.0}})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "render-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"render-token": {"usd": 5.0}})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/pricing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "gpu_cost": 2.0,
            "cpu_cost": 0.5,
            "total_cost": 2.5,
            "price_per_token": 0.001
        })))
        .mount(&server)
        .await;

    server
}

fn aix(ws: &TestWorkspace, server: &MockServer) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_aix"));
    cmd.current_dir(ws.dir())
        .env("HOME", ws.dir())
        .env("XDG_CONFIG_HOME", ws.dir())
        .env_remove("RUST_LOG")
        .env_remove("PRIME_INTELLECT_API_KEY")
        .env("AIX_MARKET_BASE_URL", server.uri())
        .env("AIX_PRIME_INTELLECT_BASE_URL", server.uri())
        .env("AIX_PRIME_INTELLECT_API_KEY", "pi-test-key")
        .env("AIX_ANALYSIS_BASE_URL", server.uri());
    cmd
}

async fn run(mut cmd: Command, args: &[&str]) -> Output {
    cmd.args(args).output().await.expect("binary should start")
}

fn input_arg(ws: &TestWorkspace) -> String {
    ws.input().display().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn exists(p: &Path) -> bool {
    p.try_exists().unwrap_or(false)
}

// ---- convert ----

#[tokio::test]
async fn convert_writes_default_output() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder()
        .with_log("1. **Plan** the answer\n2. **Write** it")
        .build()
        .unwrap();

    let output = run(aix(&ws, &server), &["convert", &input_arg(&ws)]).await;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json = ws.read_json("cot.json").unwrap();
    // 7 tokens and 2 steps: cpu 7.5, gpu 5.1.
    assert_eq!(json[0]["CPU"], "7.50");
    assert_eq!(json[0]["GPU"], "5.10");
    assert!(stdout(&output).contains("Converted"));
}

#[tokio::test]
async fn convert_to_named_output() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder().with_log("a b").build().unwrap();
    let target = ws.path("named.json");

    let output = run(
        aix(&ws, &server),
        &["convert", &input_arg(&ws), &target.display().to_string()],
    )
    .await;
    assert!(output.status.success());
    assert!(exists(&target));
    assert!(!exists(&ws.path("cot.json")));
}

// ---- process ----

#[tokio::test]
async fn process_prices_every_provider() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder()
        .with_log(&"token ".repeat(20))
        .with_log("second entry")
        .build()
        .unwrap();

    let output = run(aix(&ws, &server), &["process", &input_arg(&ws)]).await;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let priced = ws.read_json("cot-with-pricing.json").unwrap();
    assert_eq!(priced.as_array().unwrap().len(), 2);

    let pricing = &priced[0]["providerPricing"];
    // 20 tokens: cpu 10, gpu 6.
    assert_eq!(pricing["aws"]["totalCost"], 2.0);
    assert_eq!(pricing["bittensor"]["tokenPrice"], 400.0);
    assert_eq!(pricing["render"]["tokenPrice"], 5.0);
    assert_eq!(pricing["superintelligence"]["tokenPrice"], 5.0);
    assert_eq!(pricing["primeIntellect"]["modelType"], "a10");
    assert_eq!(pricing["primeIntellect"]["estimatedTokens"], 220);

    let enriched = ws.read_json("cot.json").unwrap();
    assert!(enriched[0].get("providerPricing").is_none());
}

#[tokio::test]
async fn process_records_null_for_failed_providers() {
    // No mocks mounted: every HTTP-backed provider fails.
    let server = MockServer::start().await;
    let ws = TestWorkspace::builder().with_log("x y z").build().unwrap();

    let output = run(aix(&ws, &server), &["process", &input_arg(&ws)]).await;
    assert!(output.status.success());

    let priced = ws.read_json("cot-with-pricing.json").unwrap();
    let pricing = priced[0]["providerPricing"].as_object().unwrap();
    assert_eq!(pricing.len(), 5);
    assert!(pricing["bittensor"].is_null());
    assert!(pricing["render"].is_null());
    assert!(pricing["primeIntellect"].is_null());
    assert!(pricing["aws"].is_object());
    assert!(pricing["superintelligence"].is_object());
}

#[tokio::test]
async fn malformed_input_exits_1_without_output() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder()
        .with_log("ok")
        .with_raw_line("not json")
        .build()
        .unwrap();

    let output = run(aix(&ws, &server), &["process", &input_arg(&ws)]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("line 2"));
    assert!(!exists(&ws.path("cot.json")));
    assert!(!exists(&ws.path("cot-with-pricing.json")));
}

// ---- workflow ----

#[tokio::test]
async fn workflow_mints_for_first_entry() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder()
        .with_log(&"token ".repeat(20))
        .build()
        .unwrap();

    let output = run(aix(&ws, &server), &["workflow", &input_arg(&ws)]).await;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let out = stdout(&output);
    assert!(out.contains("Provider Pricing Comparison:"));
    assert!(out.contains("aws: $2.00"));
    assert!(out.contains("Selected provider: aws"));
    assert!(out.contains("Provider: AWS"));
    // 10 cpu units at 0.01 + 6 gpu units at 0.05 = 0.4 AIX.
    assert!(out.contains("Minted: 0.4 AIX tokens"), "stdout: {out}");
}

#[tokio::test]
async fn workflow_with_explicit_provider() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder().with_log("a b c d").build().unwrap();

    let output = run(
        aix(&ws, &server),
        &["workflow", &input_arg(&ws), "superintelligence"],
    )
    .await;
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Selected provider: superintelligence"));
    assert!(out.contains("Provider: Superintelligence"));
}

#[tokio::test]
async fn workflow_with_unknown_provider_exits_1() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder().with_log("a").build().unwrap();

    let output = run(aix(&ws, &server), &["workflow", &input_arg(&ws), "gcp"]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown provider `gcp`"));
}

// ---- argument and config errors ----

#[tokio::test]
async fn missing_input_argument_exits_1() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder().with_log("a").build().unwrap();

    for sub in ["convert", "process", "workflow"] {
        let output = run(aix(&ws, &server), &[sub]).await;
        assert_eq!(output.status.code(), Some(1), "subcommand {sub}");
    }
}

#[tokio::test]
async fn help_exits_0() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder().with_log("a").build().unwrap();

    let output = run(aix(&ws, &server), &["--help"]).await;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("workflow"));
}

#[tokio::test]
async fn invalid_local_config_exits_1() {
    let server = mock_services().await;
    let ws = TestWorkspace::builder().with_log("a").build().unwrap();
    std::fs::write(ws.path("aix.toml"), "[pricing]\nprovider_timeout_sec = 5\n").unwrap();

    let output = run(aix(&ws, &server), &["process", &input_arg(&ws)]).await;
    assert_eq!(output.status.code(), Some(1));
    assert!(!exists(&ws.path("cot.json")));
}
