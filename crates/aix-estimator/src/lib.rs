// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resource estimation for chain-of-thought logs.
//!
//! [`ResourceEstimator`] is the local text heuristic. [`EnhancedResourceEstimator`]
//! refines it with the Prime Intellect analysis API through [`AnalysisClient`],
//! falling back to the heuristic whenever the remote call is unusable.

pub mod basic;
pub mod client;
pub mod enhanced;

pub use basic::ResourceEstimator;
pub use client::AnalysisClient;
pub use enhanced::EnhancedResourceEstimator;
