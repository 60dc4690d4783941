// SPDX-FileCopyrightText: 2026 AIX Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process AIX validator ledger.
//!
//! Enforces the contract's task lifecycle (submit, then verify, then pay) and
//! mints `cpu_units * cpu_reward + gpu_units * gpu_reward` wei on payment.
//! State lives in memory for the lifetime of the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use aix_config::model::LedgerConfig;
use aix_core::{AixError, Ledger, LedgerReceipt, MintStage, PaymentReceipt, TaskId};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Lifecycle state of a task on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Submitted,
    Verified,
    Paid,
}

#[derive(Debug, Clone)]
struct TaskRecord {
    state: TaskState,
    payload: Vec<u8>,
    cpu_units: u64,
    gpu_units: u64,
}

/// Ledger kept in process memory.
pub struct InMemoryLedger {
    cpu_reward_wei: u128,
    gpu_reward_wei: u128,
    tasks: Mutex<HashMap<TaskId, TaskRecord>>,
    minted_total: Mutex<u128>,
    nonce: AtomicU64,
}

impl InMemoryLedger {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            cpu_reward_wei: u128::from(config.cpu_reward_wei),
            gpu_reward_wei: u128::from(config.gpu_reward_wei),
            tasks: Mutex::new(HashMap::new()),
            minted_total: Mutex::new(0),
            nonce: AtomicU64::new(0),
        }
    }

    /// Current state of a task, if it was ever submitted.
    pub async fn task_state(&self, task_id: &TaskId) -> Option<TaskState> {
        self.tasks.lock().await.get(task_id).map(|t| t.state)
    }

    /// Total wei minted by this ledger.
    pub async fn minted_total(&self) -> u128 {
        *self.minted_total.lock().await
    }

    /// Reward in wei for the given usage units.
    pub fn reward_for(&self, cpu_units: u64, gpu_units: u64) -> Option<u128> {
        let cpu = u128::from(cpu_units).checked_mul(self.cpu_reward_wei)?;
        let gpu = u128::from(gpu_units).checked_mul(self.gpu_reward_wei)?;
        cpu.checked_add(gpu)
    }

    fn tx_hash(&self, task_id: &TaskId, action: &str) -> String {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let mut hasher = Sha256::new();
        hasher.update(task_id.0);
        hasher.update(action.as_bytes());
        hasher.update(nonce.to_be_bytes());
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

/// A payload verifies when it is a JSON object.
fn payload_is_valid(payload: &[u8]) -> bool {
    matches!(
        serde_json::from_slice::<serde_json::Value>(payload),
        Ok(serde_json::Value::Object(_))
    )
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn submit_task(
        &self,
        task_id: &TaskId,
        payload: &[u8],
        cpu_units: u64,
        gpu_units: u64,
    ) -> Result<LedgerReceipt, AixError> {
        let mut tasks = self.tasks.lock().await;
        if tasks.contains_key(task_id) {
            return Err(AixError::ledger(
                MintStage::Submitted,
                format!("task {task_id} already submitted"),
            ));
        }
        tasks.insert(
            *task_id,
            TaskRecord {
                state: TaskState::Submitted,
                payload: payload.to_vec(),
                cpu_units,
                gpu_units,
            },
        );
        debug!(task_id = %task_id, cpu_units, gpu_units, bytes = payload.len(), "task recorded");

        Ok(LedgerReceipt {
            tx_hash: self.tx_hash(task_id, "submit"),
        })
    }

    async fn verify_task(&self, task_id: &TaskId) -> Result<bool, AixError> {
        let mut tasks = self.tasks.lock().await;
        let record = tasks.get_mut(task_id).ok_or_else(|| {
            AixError::ledger(MintStage::Verified, format!("task {task_id} not found"))
        })?;
        if record.state != TaskState::Submitted {
            return Err(AixError::ledger(
                MintStage::Verified,
                format!("task {task_id} is {:?}, expected Submitted", record.state),
            ));
        }
        if !payload_is_valid(&record.payload) {
            debug!(task_id = %task_id, "payload rejected");
            return Ok(false);
        }
        record.state = TaskState::Verified;
        Ok(true)
    }

    async fn pay_for_task(&self, task_id: &TaskId) -> Result<PaymentReceipt, AixError> {
        let mut tasks = self.tasks.lock().await;
        let record = tasks.get_mut(task_id).ok_or_else(|| {
            AixError::ledger(MintStage::Paid, format!("task {task_id} not found"))
        })?;
        if record.state != TaskState::Verified {
            return Err(AixError::ledger(
                MintStage::Paid,
                format!("task {task_id} is {:?}, expected Verified", record.state),
            ));
        }

        let minted = self
            .reward_for(record.cpu_units, record.gpu_units)
            .ok_or_else(|| AixError::ledger(MintStage::Paid, "reward overflows u128"))?;
        record.state = TaskState::Paid;
        *self.minted_total.lock().await += minted;

        info!(task_id = %task_id, minted_wei = %minted, "task paid");
        Ok(PaymentReceipt {
            tx_hash: self.tx_hash(task_id, "pay"),
            minted_amount_wei: Some(minted),
        })
    }
}
