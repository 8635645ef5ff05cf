use std::sync::Arc;

use quorum_gate::{InFlightGuard, InFlightKey, InFlightRegistry};
use quorum_types::{Address, OperationRequest};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cancel::{cancel_pair, CancelSource, CancelToken};
use crate::config::{PollConfig, SubmissionConfig};
use crate::error::{CoordinatorError, PollError};
use crate::events::{CoordinatorState, LifecycleEvent};
use crate::poller::{ExpectedChange, IndexPoller, SyncWitness};
use crate::submitter::TransactionSubmitter;
use crate::traits::{IndexClient, LedgerClient};

/// Drives operations from request to terminal outcome.
///
/// Every [`LifecycleCoordinator::start`] spawns a fresh run on the current
/// tokio runtime. Runs share nothing but the in-flight registry.
#[derive(Clone)]
pub struct LifecycleCoordinator {
    submitter: TransactionSubmitter,
    poller: IndexPoller,
    registry: InFlightRegistry,
}

impl LifecycleCoordinator {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        index: Arc<dyn IndexClient>,
        registry: InFlightRegistry,
        submission: SubmissionConfig,
        poll: PollConfig,
    ) -> Self {
        Self {
            submitter: TransactionSubmitter::new(ledger, submission),
            poller: IndexPoller::new(index, poll),
            registry,
        }
    }

    pub fn registry(&self) -> &InFlightRegistry {
        &self.registry
    }

    /// Start a run of `request` on behalf of `actor`.
    ///
    /// Fails with [`CoordinatorError::AlreadyInFlight`] when a run of the
    /// same kind by the same actor on the same proposal of the same DAO has
    /// not finished. Must be called from within a tokio runtime.
    pub fn start(
        &self,
        actor: Address,
        request: OperationRequest,
        expected: ExpectedChange,
    ) -> Result<LifecycleHandle, CoordinatorError> {
        let key = InFlightKey::new(
            actor,
            request.dao().clone(),
            request.target().clone(),
            request.kind().clone(),
        );
        let guard = self.registry.try_register(key.clone())?;
        let run_id = guard.run_id();

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(CoordinatorState::Idle);
        let (cancel_source, cancel_token) = cancel_pair();

        info!(
            run_id = %run_id,
            key = %key,
            method = request.method(),
            "Lifecycle run started"
        );

        let run = Run {
            guard,
            request,
            expected,
            submitter: self.submitter.clone(),
            poller: self.poller.clone(),
            events: events_tx,
            state: state_tx,
            cancel: cancel_token,
        };
        let task = tokio::spawn(run.drive());

        Ok(LifecycleHandle {
            run_id,
            key,
            events: events_rx,
            state: state_rx,
            cancel: cancel_source,
            task,
        })
    }
}

/// Caller's view of one run.
///
/// Dropping the handle cancels the run.
pub struct LifecycleHandle {
    run_id: Uuid,
    key: InFlightKey,
    events: mpsc::UnboundedReceiver<LifecycleEvent>,
    state: watch::Receiver<CoordinatorState>,
    cancel: CancelSource,
    task: JoinHandle<CoordinatorState>,
}

impl LifecycleHandle {
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn key(&self) -> &InFlightKey {
        &self.key
    }

    /// Next event in emission order; `None` once the run has finished and
    /// every event was received.
    pub async fn next_event(&mut self) -> Option<LifecycleEvent> {
        self.events.recv().await
    }

    pub fn state(&self) -> CoordinatorState {
        *self.state.borrow()
    }

    pub fn watch_state(&self) -> watch::Receiver<CoordinatorState> {
        self.state.clone()
    }

    /// Stop the run. Nothing is emitted afterwards; a ledger mutation that
    /// already happened is not undone.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the terminal state.
    pub async fn join(self) -> Result<CoordinatorState, CoordinatorError> {
        let LifecycleHandle { task, cancel, .. } = self;
        let outcome = task.await;
        drop(cancel);
        outcome.map_err(|err| CoordinatorError::TaskFailed(err.to_string()))
    }

    /// Receive every remaining event, then wait for the terminal state.
    pub async fn collect(mut self) -> Result<(Vec<LifecycleEvent>, CoordinatorState), CoordinatorError> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event().await {
            events.push(event);
        }
        let state = self.join().await?;
        Ok((events, state))
    }
}

struct Run {
    guard: InFlightGuard,
    request: OperationRequest,
    expected: ExpectedChange,
    submitter: TransactionSubmitter,
    poller: IndexPoller,
    events: mpsc::UnboundedSender<LifecycleEvent>,
    state: watch::Sender<CoordinatorState>,
    cancel: CancelToken,
}

impl Run {
    async fn drive(mut self) -> CoordinatorState {
        let terminal = self.advance().await;
        self.transition(terminal);
        info!(
            run_id = %self.guard.run_id(),
            key = %self.guard.key(),
            state = ?terminal,
            "Lifecycle run finished"
        );
        // Registry entry released here, with the guard.
        terminal
    }

    async fn advance(&mut self) -> CoordinatorState {
        self.transition(CoordinatorState::Submitting);
        let submitted = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return CoordinatorState::Cancelled,
            submitted = self.submitter.submit(&self.request) => submitted,
        };
        let handle = match submitted {
            Ok(handle) => handle,
            Err(reason) => {
                return self.finish(
                    LifecycleEvent::SubmissionFailed { reason },
                    CoordinatorState::SubmissionFailed,
                );
            }
        };
        if !self.emit(LifecycleEvent::Submitted {
            handle: handle.clone(),
        }) {
            return CoordinatorState::Cancelled;
        }

        self.transition(CoordinatorState::AwaitingConfirmation);
        let confirmed = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return CoordinatorState::Cancelled,
            confirmed = self.submitter.await_confirmation(&handle) => confirmed,
        };
        if let Err(reason) = confirmed {
            return self.finish(
                LifecycleEvent::ConfirmationFailed { handle, reason },
                CoordinatorState::ConfirmationFailed,
            );
        }
        self.transition(CoordinatorState::Confirmed);
        if !self.emit(LifecycleEvent::Confirmed {
            handle: handle.clone(),
        }) {
            return CoordinatorState::Cancelled;
        }

        self.transition(CoordinatorState::Indexing);
        let witness = SyncWitness::new(self.request.dao().clone(), self.request.target().clone())
            .with_handle(handle.clone());
        match self
            .poller
            .poll_until_synced(&witness, &self.expected, &self.cancel)
            .await
        {
            Ok(report) => self.finish(
                LifecycleEvent::Synced {
                    handle,
                    attempts: report.attempts,
                },
                CoordinatorState::Synced,
            ),
            Err(PollError::Cancelled) => CoordinatorState::Cancelled,
            Err(reason) => {
                warn!(handle = %handle, error = %reason, "Confirmed operation not yet indexed");
                self.finish(
                    LifecycleEvent::IndexPollFailed { handle, reason },
                    CoordinatorState::IndexTimeout,
                )
            }
        }
    }

    fn transition(&self, next: CoordinatorState) {
        debug!(run_id = %self.guard.run_id(), state = ?next, "Lifecycle transition");
        self.state.send_replace(next);
    }

    /// Emit `event` unless the run was cancelled. A caller that stopped
    /// listening does not stop the run.
    fn emit(&self, event: LifecycleEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        let _ = self.events.send(event);
        true
    }

    fn finish(&self, event: LifecycleEvent, terminal: CoordinatorState) -> CoordinatorState {
        if self.emit(event) {
            terminal
        } else {
            CoordinatorState::Cancelled
        }
    }
}
