//! End-to-end integration tests for cellchat.
//!
//! These tests exercise the full pipeline from a recorded session history on
//! disk to the JSON message list handed to a chat API, both through the
//! library crates and through the `cellchat` binary.

use std::io::Write;
use std::path::Path;
use std::process::Command;

use cellchat_config::AppConfig;
use cellchat_context::{ContextAssembler, PlainRenderer};
use cellchat_core::{HistorySource, Message, Role, SessionHistory};
use serde_json::{Value, json};

// ── Fixtures ─────────────────────────────────────────────────────────────

fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

fn session_json() -> String {
    json!({
        "inputs": {
            "1": "%load_ext genai",
            "2": "import pandas as pd",
            "3": "df = pd.read_csv('sales.csv')",
            "4": "df",
            "5": "# ignore\nsecret = 1",
            "6": "   ",
            "7": "df.total.sum()",
            "8": null
        },
        "outputs": {
            "4": {
                "type": "table",
                "columns": ["region", "total"],
                "data": [
                    ["north", 10], ["south", 20], ["east", 30], ["west", 40],
                    ["north", 11], ["south", 21], ["east", 31], ["west", 41]
                ]
            },
            "5": {"type": "value", "value": 1},
            "7": {"type": "value", "value": 204}
        }
    })
    .to_string()
}

fn cellchat(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cellchat"))
        .args(args)
        .env_remove("CELLCHAT_NUM_MESSAGES")
        .env_remove("CELLCHAT_RENDERER")
        .env_remove("CELLCHAT_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

// ── Library pipeline ─────────────────────────────────────────────────────

#[test]
fn history_file_to_context() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = write_file(dir.path(), "session.json", &session_json());

    let history = SessionHistory::load_from(&history_path).unwrap();
    let context = ContextAssembler::default().get_historical_context(&history, 5);

    let users: Vec<&str> = context
        .iter()
        .filter(|m| m.role() == Role::User)
        .map(Message::content)
        .collect();
    assert_eq!(
        users,
        vec![
            "import pandas as pd",
            "df = pd.read_csv('sales.csv')",
            "df",
            "df.total.sum()",
        ]
    );

    // df → sampled markdown table, df.total.sum() → 204
    assert_eq!(context.len(), 6);
    let table = context.messages()[3].content();
    assert_eq!(context.messages()[3].role(), Role::System);
    assert_eq!(table.lines().count(), 2 + 5);
    assert_eq!(context.messages()[5], Message::system("204"));
}

#[test]
fn config_file_drives_assembly() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        dir.path(),
        "config.toml",
        r#"
        [context]
        num_messages = 2
        extra_ignore_tokens = ["import pandas"]

        [display]
        renderer = "plain"
        "#,
    );
    let history_path = write_file(dir.path(), "session.json", &session_json());

    let config = AppConfig::load_from(&config_path).unwrap();
    let history = SessionHistory::load_from(&history_path).unwrap();
    let context = ContextAssembler::from_config(&config).assemble(&history);

    let repr = history.output(4).map(|v| v.repr()).unwrap();
    assert_eq!(
        context.messages(),
        &[
            Message::user("df"),
            Message::system(repr),
            Message::user("df.total.sum()"),
            Message::system("204"),
        ]
    );
}

#[test]
fn context_serializes_as_chat_messages() {
    let history = SessionHistory::from_json_str(
        r##"{"inputs": {"1": "# ignore\nx=1", "2": "y=2", "3": "z=3"},
            "outputs": {"2": {"type": "value", "value": 4},
                        "3": {"type": "value", "value": 9}}}"##,
    )
    .unwrap();
    let context = ContextAssembler::default()
        .with_renderer(Box::new(PlainRenderer))
        .get_historical_context(&history, 5);

    assert_eq!(
        serde_json::to_value(&context).unwrap(),
        json!([
            {"content": "y=2", "role": "user"},
            {"content": "4", "role": "system"},
            {"content": "z=3", "role": "user"},
            {"content": "9", "role": "system"},
        ])
    );
}

// ── Binary ───────────────────────────────────────────────────────────────

#[test]
fn binary_prints_context_json() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = write_file(dir.path(), "session.json", &session_json());
    let config_path = dir.path().join("missing.toml");

    let output = cellchat(&[
        "--config",
        config_path.to_str().unwrap(),
        "context",
        "--history",
        history_path.to_str().unwrap(),
        "--num-messages",
        "1",
        "--compact",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!([
            {"content": "df.total.sum()", "role": "user"},
            {"content": "204", "role": "system"},
        ])
    );
}

#[test]
fn binary_seeded_output_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let history_path = write_file(dir.path(), "session.json", &session_json());
    let config_path = dir.path().join("missing.toml");
    let args = [
        "--config",
        config_path.to_str().unwrap(),
        "context",
        "--history",
        history_path.to_str().unwrap(),
        "--seed",
        "5",
    ];

    let first = cellchat(&args);
    let second = cellchat(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn binary_reports_missing_history() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("missing.toml");
    let output = cellchat(&[
        "--config",
        config_path.to_str().unwrap(),
        "context",
        "--history",
        "/nonexistent/session.json",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/session.json"));
}

#[test]
fn binary_lists_configured_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        dir.path(),
        "config.toml",
        "[context]\nextra_ignore_tokens = [\"%%sql\"]\n",
    );

    let output = cellchat(&["--config", config_path.to_str().unwrap(), "tokens"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("%%assist"));
    assert!(stdout.lines().any(|l| l.starts_with("%%sql") && l.ends_with("config")));
}
