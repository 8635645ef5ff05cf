use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use quorum_types::{
    DaoId, LedgerProposalState, OperationRequest, Proposal, ProposalId, SubmissionHandle,
};
use tokio::sync::Mutex;

use crate::error::{ConfirmationError, IndexError, LedgerQueryError, SubmissionError};
use crate::traits::{IndexClient, LedgerClient, Receipt};

/// In-memory ledger replaying scripted outcomes.
///
/// Each call pops the next scripted outcome. Once a script is exhausted the
/// ledger accepts submissions with sequential handles and confirms them.
pub struct ScriptedLedger {
    submissions: Mutex<VecDeque<Result<SubmissionHandle, SubmissionError>>>,
    confirmations: Mutex<VecDeque<Result<Receipt, ConfirmationError>>>,
    states: DashMap<(DaoId, ProposalId), Result<LedgerProposalState, LedgerQueryError>>,
    submitted: Mutex<Vec<OperationRequest>>,
    submit_delay: Duration,
    confirm_delay: Duration,
    sequence: AtomicU64,
}

impl ScriptedLedger {
    pub fn new() -> Self {
        Self {
            submissions: Mutex::new(VecDeque::new()),
            confirmations: Mutex::new(VecDeque::new()),
            states: DashMap::new(),
            submitted: Mutex::new(Vec::new()),
            submit_delay: Duration::ZERO,
            confirm_delay: Duration::ZERO,
            sequence: AtomicU64::new(1),
        }
    }

    pub fn with_submission(mut self, outcome: Result<SubmissionHandle, SubmissionError>) -> Self {
        self.submissions.get_mut().push_back(outcome);
        self
    }

    pub fn with_confirmation(mut self, outcome: Result<Receipt, ConfirmationError>) -> Self {
        self.confirmations.get_mut().push_back(outcome);
        self
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn with_confirm_delay(mut self, delay: Duration) -> Self {
        self.confirm_delay = delay;
        self
    }

    pub fn with_proposal_state(
        self,
        dao: DaoId,
        proposal_id: ProposalId,
        state: Result<LedgerProposalState, LedgerQueryError>,
    ) -> Self {
        self.states.insert((dao, proposal_id), state);
        self
    }

    /// Every request handed to `submit`, in call order.
    pub async fn submitted(&self) -> Vec<OperationRequest> {
        self.submitted.lock().await.clone()
    }

    fn next_handle(&self) -> SubmissionHandle {
        let n = self.sequence.fetch_add(1, Ordering::Relaxed);
        SubmissionHandle::new(format!("0x{n:064x}"))
    }
}

impl Default for ScriptedLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerClient for ScriptedLedger {
    async fn submit(&self, request: &OperationRequest) -> Result<SubmissionHandle, SubmissionError> {
        self.submitted.lock().await.push(request.clone());
        if !self.submit_delay.is_zero() {
            tokio::time::sleep(self.submit_delay).await;
        }
        let scripted = self.submissions.lock().await.pop_front();
        scripted.unwrap_or_else(|| Ok(self.next_handle()))
    }

    async fn await_confirmation(
        &self,
        handle: &SubmissionHandle,
    ) -> Result<Receipt, ConfirmationError> {
        if !self.confirm_delay.is_zero() {
            tokio::time::sleep(self.confirm_delay).await;
        }
        let scripted = self.confirmations.lock().await.pop_front();
        scripted.unwrap_or_else(|| {
            Ok(Receipt {
                handle: handle.clone(),
                block_number: Some(1),
            })
        })
    }

    async fn proposal_state(
        &self,
        dao: &DaoId,
        proposal_id: &ProposalId,
    ) -> Result<LedgerProposalState, LedgerQueryError> {
        self.states
            .get(&(dao.clone(), proposal_id.clone()))
            .map(|state| state.clone())
            .unwrap_or(Ok(LedgerProposalState::Unborn))
    }
}

/// In-memory index replaying scripted reads.
///
/// Scripted reads are returned first; afterwards every read returns the
/// fallback entity, or `NotFound` when none is set.
pub struct ScriptedIndex {
    reads: Mutex<VecDeque<Result<Proposal, IndexError>>>,
    fallback: Mutex<Option<Proposal>>,
    read_count: AtomicU32,
}

impl ScriptedIndex {
    pub fn new() -> Self {
        Self {
            reads: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(None),
            read_count: AtomicU32::new(0),
        }
    }

    pub fn with_read(mut self, outcome: Result<Proposal, IndexError>) -> Self {
        self.reads.get_mut().push_back(outcome);
        self
    }

    pub fn with_fallback(mut self, proposal: Proposal) -> Self {
        *self.fallback.get_mut() = Some(proposal);
        self
    }

    /// Replace the fallback entity, as if the index ingested a new block.
    pub async fn set_fallback(&self, proposal: Proposal) {
        *self.fallback.lock().await = Some(proposal);
    }

    /// Number of reads served so far.
    pub fn reads(&self) -> u32 {
        self.read_count.load(Ordering::SeqCst)
    }
}

impl Default for ScriptedIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IndexClient for ScriptedIndex {
    async fn read(&self, _dao: &DaoId, proposal_id: &ProposalId) -> Result<Proposal, IndexError> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        if let Some(scripted) = self.reads.lock().await.pop_front() {
            return scripted;
        }
        self.fallback
            .lock()
            .await
            .clone()
            .ok_or_else(|| IndexError::NotFound(proposal_id.clone()))
    }
}
