// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scriptable ledger for mint workflow tests.
//!
//! `MockLedger` succeeds by default and can be told to fail at a chosen
//! stage, reject verification, or pay without emitting a mint event.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use aix_core::{AixError, Ledger, LedgerReceipt, MintStage, PaymentReceipt, TaskId};

/// One call made against the mock ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    Submit {
        task_id: TaskId,
        payload: Vec<u8>,
        cpu_units: u64,
        gpu_units: u64,
    },
    Verify(TaskId),
    Pay(TaskId),
}

/// A ledger whose responses are configured up front.
#[derive(Debug, Clone)]
pub struct MockLedger {
    fail_at: Option<MintStage>,
    verifies: bool,
    minted_amount_wei: Option<u128>,
    calls: Arc<Mutex<Vec<LedgerCall>>>,
    tx_counter: Arc<AtomicU64>,
}

impl MockLedger {
    /// A ledger that accepts every task and mints `minted_amount_wei`.
    pub fn new(minted_amount_wei: u128) -> Self {
        Self {
            fail_at: None,
            verifies: true,
            minted_amount_wei: Some(minted_amount_wei),
            calls: Arc::new(Mutex::new(Vec::new())),
            tx_counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Fails the call that would advance the mint to `stage`.
    ///
    /// `Submitted` fails `submit_task`, `Verified` fails `verify_task`, and
    /// `Paid` fails `pay_for_task`.
    pub fn failing_at(mut self, stage: MintStage) -> Self {
        self.fail_at = Some(stage);
        self
    }

    /// `verify_task` answers `false`.
    pub fn rejecting_verification(mut self) -> Self {
        self.verifies = false;
        self
    }

    /// `pay_for_task` succeeds without a minted amount.
    pub fn without_mint_event(mut self) -> Self {
        self.minted_amount_wei = None;
        self
    }

    pub async fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().await.clone()
    }

    fn next_tx(&self) -> String {
        let n = self.tx_counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("0x{n:064x}")
    }

    fn check(&self, stage: MintStage) -> Result<(), AixError> {
        if self.fail_at == Some(stage) {
            return Err(AixError::ledger(stage, "mock ledger failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn submit_task(
        &self,
        task_id: &TaskId,
        payload: &[u8],
        cpu_units: u64,
        gpu_units: u64,
    ) -> Result<LedgerReceipt, AixError> {
        self.calls.lock().await.push(LedgerCall::Submit {
            task_id: *task_id,
            payload: payload.to_vec(),
            cpu_units,
            gpu_units,
        });
        self.check(MintStage::Submitted)?;
        Ok(LedgerReceipt {
            tx_hash: self.next_tx(),
        })
    }

    async fn verify_task(&self, task_id: &TaskId) -> Result<bool, AixError> {
        self.calls.lock().await.push(LedgerCall::Verify(*task_id));
        self.check(MintStage::Verified)?;
        Ok(self.verifies)
    }

    async fn pay_for_task(&self, task_id: &TaskId) -> Result<PaymentReceipt, AixError> {
        self.calls.lock().await.push(LedgerCall::Pay(*task_id));
        self.check(MintStage::Paid)?;
        Ok(PaymentReceipt {
            tx_hash: self.next_tx(),
            minted_amount_wei: self.minted_amount_wei,
        })
    }
}
