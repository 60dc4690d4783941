// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary on-disk workspace for workflow and CLI tests.
//!
//! `TestWorkspace` owns a temp directory holding one JSONL input file and
//! offers helpers to read back the JSON files the workflow writes next to it.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Builder for a test input file.
pub struct TestWorkspaceBuilder {
    file_name: String,
    lines: Vec<String>,
}

impl TestWorkspaceBuilder {
    fn new() -> Self {
        Self {
            file_name: "cot.jsonl".to_string(),
            lines: Vec::new(),
        }
    }

    /// Name of the input file inside the temp directory.
    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    /// Adds one `{"log": ...}` record.
    pub fn with_log(mut self, log: &str) -> Self {
        self.lines.push(serde_json::json!({ "log": log }).to_string());
        self
    }

    /// Adds an arbitrary JSON record.
    pub fn with_record(mut self, record: Value) -> Self {
        self.lines.push(record.to_string());
        self
    }

    /// Adds a raw line, written verbatim (may be invalid JSON).
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Writes the input file and returns the workspace.
    pub fn build(self) -> std::io::Result<TestWorkspace> {
        let dir = tempfile::TempDir::new()?;
        let input = dir.path().join(&self.file_name);
        let mut contents = self.lines.join("\n");
        contents.push('\n');
        std::fs::write(&input, contents)?;
        Ok(TestWorkspace { dir, input })
    }
}

/// A temp directory with a JSONL input file. Removed on drop.
pub struct TestWorkspace {
    dir: tempfile::TempDir,
    input: PathBuf,
}

impl TestWorkspace {
    pub fn builder() -> TestWorkspaceBuilder {
        TestWorkspaceBuilder::new()
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Path of a file inside the workspace directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Reads and parses a JSON output file from the workspace.
    pub fn read_json(&self, name: &str) -> std::io::Result<Value> {
        let text = std::fs::read_to_string(self.path(name))?;
        serde_json::from_str(&text).map_err(std::io::Error::other)
    }
}
