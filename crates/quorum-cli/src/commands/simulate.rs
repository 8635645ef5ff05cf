//! Dry-run a cancellation lifecycle against scripted ledger and index clients

use std::sync::Arc;

use chrono::Utc;
use clap::{Args, ValueEnum};
use colored::*;
use quorum_gate::InFlightRegistry;
use quorum_lifecycle::{
    cancel_request, CoordinatorState, ExpectedChange, LifecycleCoordinator, LifecycleEvent,
    Notice, ScriptedIndex, ScriptedLedger, SubmissionError,
};
use quorum_types::{Address, CancellationMarker, ChainId, DaoId, OperationKind, Proposal, ProposalId};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::config::QuorumConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

/// Scripted outcome of the simulated run
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Outcome {
    /// Confirmed, and the index catches up on the third read
    Synced,
    /// The submission never reaches the ledger
    Transport,
    /// The ledger refuses the request
    Rejected,
    /// The signer declines the request
    Declined,
    /// Confirmed, but the index never reflects the change
    IndexTimeout,
}

#[derive(Args)]
pub struct SimulateArgs {
    #[arg(long, value_enum, default_value = "synced")]
    outcome: Outcome,

    /// Override the configured index poll interval
    #[arg(long)]
    interval_ms: Option<u64>,
}

#[derive(Serialize)]
struct Step {
    event: &'static str,
    handle: Option<String>,
    notice: Notice,
}

#[derive(Serialize)]
struct Simulation {
    steps: Vec<Step>,
    final_state: CoordinatorState,
}

/// Table row for one emitted event
#[derive(Debug, Serialize, Tabled)]
struct StepRow {
    event: &'static str,
    title: String,
    description: String,
    /// Submission handle, when the event carries one
    tx: String,
}

impl From<&Step> for StepRow {
    fn from(step: &Step) -> Self {
        Self {
            event: step.event,
            title: step.notice.title.clone(),
            description: step.notice.description.clone(),
            tx: step.handle.clone().unwrap_or_default(),
        }
    }
}

fn colorize_state(state: CoordinatorState) -> ColoredString {
    let label = format!("{state:?}");
    match state {
        CoordinatorState::Synced => label.green(),
        CoordinatorState::IndexTimeout => label.yellow(),
        CoordinatorState::Cancelled => label.dimmed(),
        _ if state.is_terminal() => label.red(),
        _ => label.normal(),
    }
}

fn event_name(event: &LifecycleEvent) -> &'static str {
    match event {
        LifecycleEvent::Submitted { .. } => "submitted",
        LifecycleEvent::Confirmed { .. } => "confirmed",
        LifecycleEvent::Synced { .. } => "synced",
        LifecycleEvent::SubmissionFailed { .. } => "submission_failed",
        LifecycleEvent::ConfirmationFailed { .. } => "confirmation_failed",
        LifecycleEvent::IndexPollFailed { .. } => "index_poll_failed",
    }
}

fn scripted(outcome: Outcome, open: &Proposal) -> (ScriptedLedger, ScriptedIndex) {
    let mut cancelled = open.clone();
    cancelled.cancellation = Some(CancellationMarker {
        at: Some(Utc::now()),
        by: Some(open.created_by.clone()),
        tx: None,
    });

    let ledger = ScriptedLedger::new();
    let index = ScriptedIndex::new().with_fallback(open.clone());
    match outcome {
        Outcome::Synced => (
            ledger,
            ScriptedIndex::new()
                .with_read(Ok(open.clone()))
                .with_read(Ok(open.clone()))
                .with_fallback(cancelled),
        ),
        Outcome::Transport => (
            ledger.with_submission(Err(SubmissionError::TransportError(
                "connection refused".into(),
            ))),
            index,
        ),
        Outcome::Rejected => (
            ledger.with_submission(Err(SubmissionError::LedgerRejected {
                decoded_reason: "proposal is not cancellable".into(),
            })),
            index,
        ),
        Outcome::Declined => (ledger.with_submission(Err(SubmissionError::UserRejected)), index),
        Outcome::IndexTimeout => (ledger, index),
    }
}

pub async fn execute(
    args: SimulateArgs,
    config: &QuorumConfig,
    format: OutputFormat,
) -> CliResult<()> {
    let proposal = Proposal::new(
        ProposalId::new("1"),
        DaoId::new("0x0000000000000000000000000000000000000da0"),
        Address::new("0x00000000000000000000000000000000000000a1"),
        Utc::now(),
    );
    let chain = ChainId::new("0x64");
    let request = cancel_request(&chain, &proposal)?;

    let mut poll = config.poll.clone();
    if let Some(interval_ms) = args.interval_ms {
        poll.interval_ms = interval_ms;
    }

    let (ledger, index) = scripted(args.outcome, &proposal);
    let coordinator = LifecycleCoordinator::new(
        Arc::new(ledger),
        Arc::new(index),
        InFlightRegistry::new(),
        config.submission.clone(),
        poll,
    );

    info!(outcome = ?args.outcome, "Starting simulated cancellation");
    let handle = coordinator.start(
        proposal.created_by.clone(),
        request,
        ExpectedChange::is_cancelled(),
    )?;
    let (events, final_state) = handle.collect().await?;

    let kind = OperationKind::Cancel;
    let simulation = Simulation {
        steps: events
            .iter()
            .map(|event| Step {
                event: event_name(event),
                handle: event.handle().map(ToString::to_string),
                notice: event.notice(&kind),
            })
            .collect(),
        final_state,
    };

    match format {
        OutputFormat::Json => output::print_single(&simulation),
        OutputFormat::Table => {
            output::print_output(simulation.steps.iter().map(StepRow::from).collect(), format)?;
            println!("Final state: {}", colorize_state(simulation.final_state));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_lifecycle::{PollConfig, SubmissionConfig};

    async fn run(outcome: Outcome) -> (Vec<LifecycleEvent>, CoordinatorState) {
        let proposal = Proposal::new(
            ProposalId::new("1"),
            DaoId::new("0xdao"),
            Address::new("0xa1"),
            Utc::now(),
        );
        let request = cancel_request(&ChainId::new("0x64"), &proposal).unwrap();
        let (ledger, index) = scripted(outcome, &proposal);
        let coordinator = LifecycleCoordinator::new(
            Arc::new(ledger),
            Arc::new(index),
            InFlightRegistry::new(),
            SubmissionConfig::default(),
            PollConfig::default(),
        );
        coordinator
            .start(proposal.created_by.clone(), request, ExpectedChange::is_cancelled())
            .unwrap()
            .collect()
            .await
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_outcomes_reach_their_terminal_state() {
        assert_eq!(run(Outcome::Synced).await.1, CoordinatorState::Synced);
        assert_eq!(run(Outcome::Transport).await.1, CoordinatorState::SubmissionFailed);
        assert_eq!(run(Outcome::Rejected).await.1, CoordinatorState::SubmissionFailed);
        assert_eq!(run(Outcome::IndexTimeout).await.1, CoordinatorState::IndexTimeout);
    }

    #[tokio::test(start_paused = true)]
    async fn declined_run_is_silent() {
        let (events, _) = run(Outcome::Declined).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].notice(&OperationKind::Cancel).tone, quorum_lifecycle::Tone::Silent);
        assert_eq!(event_name(&events[0]), "submission_failed");
    }

    #[tokio::test(start_paused = true)]
    async fn rows_carry_notice_and_handle() {
        let (events, _) = run(Outcome::Synced).await;
        let steps: Vec<Step> = events
            .iter()
            .map(|event| Step {
                event: event_name(event),
                handle: event.handle().map(ToString::to_string),
                notice: event.notice(&OperationKind::Cancel),
            })
            .collect();
        let rows: Vec<StepRow> = steps.iter().map(StepRow::from).collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].event, "synced");
        assert_eq!(rows[2].title, "Cancel Success");
        assert!(rows[2].tx.starts_with("tx:0x"));
    }
}
