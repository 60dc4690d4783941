// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSONL input and pretty JSON output for workflow files.

use std::path::{Path, PathBuf};

use aix_core::{AixError, LogEntry};
use serde::Serialize;
use tracing::debug;

const INPUT_EXTENSION: &str = ".jsonl";

/// Reads one [`LogEntry`] per non-blank line.
///
/// The first malformed line aborts the load with its 1-based line number.
pub async fn load_log_entries(path: &Path) -> Result<Vec<LogEntry>, AixError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AixError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
    let entries = parse_log_entries(&content)?;
    debug!(path = %path.display(), entries = entries.len(), "input loaded");
    Ok(entries)
}

/// Parses JSONL text. Blank lines are skipped.
pub fn parse_log_entries(content: &str) -> Result<Vec<LogEntry>, AixError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<LogEntry>(line).map_err(|e| AixError::Input {
                line: idx + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Writes `value` as pretty-printed JSON (two-space indent).
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), AixError> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .map_err(|e| AixError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
    debug!(path = %path.display(), "output written");
    Ok(())
}

/// `cot.jsonl` -> `cot.json`. Inputs without the `.jsonl` suffix get `.json` appended.
pub fn enriched_output_path(input: &Path) -> PathBuf {
    with_suffix(input, ".json")
}

/// `cot.jsonl` -> `cot-with-pricing.json`.
pub fn priced_output_path(input: &Path) -> PathBuf {
    with_suffix(input, "-with-pricing.json")
}

fn with_suffix(input: &Path, suffix: &str) -> PathBuf {
    let raw = input.as_os_str().to_string_lossy();
    let stem = raw.strip_suffix(INPUT_EXTENSION).unwrap_or(&raw[..]);
    PathBuf::from(format!("{stem}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_skips_blank_lines() {
        let content = "{\"log\":\"a\"}\n\n   \n{\"log\":\"b\",\"agent\":\"x\"}\n";
        let entries = parse_log_entries(content).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].log, "a");
        assert_eq!(entries[1].extra["agent"], "x");
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let content = "{\"log\":\"a\"}\n\n{not json}\n{\"log\":\"c\"}";
        match parse_log_entries(content).unwrap_err() {
            AixError::Input { line, .. } => assert_eq!(line, 3),
            other => panic!("expected input error, got {other:?}"),
        }
    }

    #[test]
    fn missing_log_field_is_an_input_error() {
        let err = parse_log_entries("{\"text\":\"a\"}").unwrap_err();
        assert!(err.to_string().contains("line 1"), "got: {err}");
        assert!(err.to_string().contains("log"), "got: {err}");
    }

    #[test]
    fn output_paths() {
        let input = Path::new("/data/agent-cots/cot.jsonl");
        assert_eq!(
            enriched_output_path(input),
            PathBuf::from("/data/agent-cots/cot.json")
        );
        assert_eq!(
            priced_output_path(input),
            PathBuf::from("/data/agent-cots/cot-with-pricing.json")
        );
        assert_eq!(
            enriched_output_path(Path::new("run.log")),
            PathBuf::from("run.log.json")
        );
    }

    #[tokio::test]
    async fn save_json_uses_two_space_indent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        save_json(&path, &serde_json::json!([{"log": "a"}])).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  {\n    \"log\": \"a\"\n  }\n]");
    }

    #[tokio::test]
    async fn missing_input_is_an_io_error() {
        let err = load_log_entries(Path::new("/nonexistent/cot.jsonl"))
            .await
            .unwrap_err();
        assert!(matches!(err, AixError::Io { .. }));
    }
}
