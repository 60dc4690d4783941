// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the AIX pricing pipeline.

use thiserror::Error;

use crate::types::MintStage;

/// The primary error type used across all AIX crates.
#[derive(Debug, Error)]
pub enum AixError {
    /// Configuration errors (invalid TOML, missing API keys, bad header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A JSONL input record could not be turned into a log entry.
    #[error("invalid input at line {line}: {message}")]
    Input { line: usize, message: String },

    /// Filesystem errors while loading or saving workflow files.
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// JSON serialization of output records failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A pricing provider failed (network, auth, malformed response, missing rate).
    #[error("pricing provider `{provider}` failed: {message}")]
    Provider {
        provider: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The external chain-of-thought analysis service failed.
    #[error("analysis service error: {message}")]
    Analysis {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A ledger call failed; the mint is aborted at `stage`.
    #[error("ledger error during {stage}: {message}")]
    Ledger { stage: MintStage, message: String },

    /// No pricing quote could be selected for minting.
    #[error("provider selection failed: {0}")]
    Selection(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AixError {
    /// Shorthand for a provider failure without an underlying source error.
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        AixError::Provider {
            provider: provider.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a ledger failure at the given stage.
    pub fn ledger(stage: MintStage, message: impl Into<String>) -> Self {
        AixError::Ledger {
            stage,
            message: message.into(),
        }
    }
}
