// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ledger trait for the value-transfer contract that records and pays tasks.

use async_trait::async_trait;

use crate::error::AixError;
use crate::types::{LedgerReceipt, PaymentReceipt, TaskId};

/// The contract a mint runs against: submit, then verify, then pay.
///
/// Implementations own their retry policy; callers treat every error as fatal
/// to the mint in progress.
#[async_trait]
pub trait Ledger: Send + Sync + 'static {
    /// Records a task with its payload and integer usage units.
    async fn submit_task(
        &self,
        task_id: &TaskId,
        payload: &[u8],
        cpu_units: u64,
        gpu_units: u64,
    ) -> Result<LedgerReceipt, AixError>;

    /// Asks the ledger to verify a submitted task. `false` means rejected.
    async fn verify_task(&self, task_id: &TaskId) -> Result<bool, AixError>;

    /// Pays for a verified task, minting tokens to the submitter.
    async fn pay_for_task(&self, task_id: &TaskId) -> Result<PaymentReceipt, AixError>;
}
