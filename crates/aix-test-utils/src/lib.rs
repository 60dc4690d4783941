// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for AIX integration tests.
//!
//! Provides mock adapters and a temp-file workspace for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockPricingProvider`] - Pricing provider with a fixed behavior
//! - [`MockAnalysisService`] - Analysis oracle with a canned answer
//! - [`MockLedger`] - Ledger with scriptable stage failures
//! - [`TestWorkspace`] - Temp directory holding a JSONL input file

pub mod harness;
pub mod mock_analysis;
pub mod mock_ledger;
pub mod mock_provider;

pub use harness::TestWorkspace;
pub use mock_analysis::MockAnalysisService;
pub use mock_ledger::{LedgerCall, MockLedger};
pub use mock_provider::MockPricingProvider;
