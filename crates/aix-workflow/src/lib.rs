// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workflow orchestration for the AIX pipeline.
//!
//! Reads chain-of-thought JSONL, enriches every entry with a resource
//! estimate and a pricing bundle, writes the JSON outputs, and mints AIX
//! tokens for a selected provider quote on the ledger.

pub mod io;
pub mod orchestrator;
pub mod selection;

pub use orchestrator::{ProcessOutput, WorkflowOrchestrator, WorkflowReport};
pub use selection::{Cheapest, FirstAvailable, Preferred, ProviderSelector, selector_for};
