use std::sync::Arc;

use quorum_types::{OperationRequest, SubmissionHandle};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::SubmissionConfig;
use crate::error::{ConfirmationError, SubmissionError};
use crate::traits::{LedgerClient, Receipt};

/// Hands operation requests to the ledger.
///
/// Exactly one ledger call per invocation. Failures are classified and
/// returned, never retried here.
#[derive(Clone)]
pub struct TransactionSubmitter {
    ledger: Arc<dyn LedgerClient>,
    config: SubmissionConfig,
}

impl TransactionSubmitter {
    pub fn new(ledger: Arc<dyn LedgerClient>, config: SubmissionConfig) -> Self {
        Self { ledger, config }
    }

    pub fn config(&self) -> &SubmissionConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Arc<dyn LedgerClient> {
        &self.ledger
    }

    pub async fn submit(
        &self,
        request: &OperationRequest,
    ) -> Result<SubmissionHandle, SubmissionError> {
        info!(
            proposal_id = %request.target(),
            dao = %request.dao(),
            chain = %request.chain(),
            method = request.method(),
            args = request.args().len(),
            gas_limit = ?request.overrides().gas_limit,
            "Submitting operation"
        );

        let outcome = match timeout(self.config.ack_timeout(), self.ledger.submit(request)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(SubmissionError::Timeout),
        };

        match &outcome {
            Ok(handle) => {
                info!(proposal_id = %request.target(), handle = %handle, "Operation accepted");
            }
            Err(SubmissionError::UserRejected) => {
                debug!(proposal_id = %request.target(), "Operation declined by signer");
            }
            Err(err) => {
                warn!(proposal_id = %request.target(), error = %err, "Operation submission failed");
            }
        }

        outcome
    }

    pub async fn await_confirmation(
        &self,
        handle: &SubmissionHandle,
    ) -> Result<Receipt, ConfirmationError> {
        debug!(handle = %handle, "Awaiting confirmation");

        let outcome = match timeout(
            self.config.confirmation_timeout(),
            self.ledger.await_confirmation(handle),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(ConfirmationError::Timeout),
        };

        match &outcome {
            Ok(receipt) => {
                info!(handle = %handle, block = ?receipt.block_number, "Operation confirmed");
            }
            Err(err) => {
                warn!(handle = %handle, error = %err, "Operation confirmation failed");
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use quorum_types::{ChainId, DaoId, OperationKind, ProposalId};

    use crate::mocks::ScriptedLedger;

    fn request() -> OperationRequest {
        OperationRequest::builder(
            OperationKind::Cancel,
            ChainId::new("0x64"),
            DaoId::new("0xdao"),
            ProposalId::new("2"),
        )
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn single_attempt_per_call() {
        let ledger = Arc::new(
            ScriptedLedger::new()
                .with_submission(Err(SubmissionError::TransportError("reset".into()))),
        );
        let submitter = TransactionSubmitter::new(ledger.clone(), SubmissionConfig::default());

        let err = submitter.submit(&request()).await.unwrap_err();
        assert_eq!(err, SubmissionError::TransportError("reset".into()));
        assert_eq!(ledger.submitted().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_acknowledgement_times_out() {
        let ledger = Arc::new(ScriptedLedger::new().with_submit_delay(Duration::from_secs(600)));
        let submitter = TransactionSubmitter::new(ledger, SubmissionConfig::default());
        assert_eq!(
            submitter.submit(&request()).await,
            Err(SubmissionError::Timeout)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_inclusion_times_out() {
        let ledger = Arc::new(ScriptedLedger::new().with_confirm_delay(Duration::from_secs(900)));
        let submitter = TransactionSubmitter::new(ledger, SubmissionConfig::default());
        let handle = submitter.submit(&request()).await.unwrap();
        assert_eq!(
            submitter.await_confirmation(&handle).await,
            Err(ConfirmationError::Timeout)
        );
    }
}
