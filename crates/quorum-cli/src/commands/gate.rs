//! Eligibility check for an operation

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use quorum_gate::{CallerContext, InFlightRegistry, PriorProposalCheck, StandardRules};
use quorum_status::StatusDeriver;
use quorum_types::{Address, ChainId, DaoSnapshot, LedgerProposalState, OperationKind, Proposal};
use serde::Serialize;
use tabled::Tabled;

use super::{parse_instant, read_json};
use crate::config::QuorumConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Sponsor,
    Vote,
    Cancel,
    Process,
}

impl From<KindArg> for OperationKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Sponsor => OperationKind::Sponsor,
            KindArg::Vote => OperationKind::Vote,
            KindArg::Cancel => OperationKind::Cancel,
            KindArg::Process => OperationKind::Process,
        }
    }
}

/// Table row for a blocking reason
#[derive(Debug, Serialize, Tabled)]
struct ReasonRow {
    /// Position in the rule set order
    #[tabled(rename = "#")]
    position: usize,
    reason: String,
}

fn reason_rows(reasons: &[String]) -> Vec<ReasonRow> {
    reasons
        .iter()
        .enumerate()
        .map(|(index, reason)| ReasonRow {
            position: index + 1,
            reason: reason.clone(),
        })
        .collect()
}

#[derive(Args)]
pub struct GateArgs {
    /// Proposal JSON file
    proposal: PathBuf,

    /// DAO snapshot JSON file
    dao: PathBuf,

    /// Address attempting the operation
    #[arg(long)]
    actor: String,

    /// Chain the actor is connected to
    #[arg(long)]
    chain: String,

    /// Operation to check
    #[arg(long, value_enum)]
    kind: KindArg,

    /// Ledger state code of the prior proposal, when already looked up
    #[arg(long)]
    prior_state: Option<u8>,

    /// Evaluate at this instant instead of now (RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,
}

pub fn execute(args: GateArgs, config: &QuorumConfig, format: OutputFormat) -> CliResult<()> {
    let proposal: Proposal = read_json(&args.proposal)?;
    let dao: DaoSnapshot = read_json(&args.dao)?;
    let caller = CallerContext::new(Address::new(args.actor), ChainId::new(args.chain));
    let prior = match args.prior_state {
        Some(code) => PriorProposalCheck::Resolved(LedgerProposalState::from_code(code)),
        None => PriorProposalCheck::Pending,
    };

    let kind = OperationKind::from(args.kind);

    let deriver = StatusDeriver::new(config.governance.clone());
    let registry = InFlightRegistry::new();
    let decision = StandardRules::new(&deriver, &registry).evaluate(
        &kind,
        &proposal,
        &dao,
        &caller,
        &prior,
        args.at.unwrap_or_else(Utc::now),
    );

    match format {
        OutputFormat::Json => output::print_single(&decision),
        OutputFormat::Table if decision.allowed => {
            output::print_success(&format!("{} allowed", kind.label()));
            Ok(())
        }
        OutputFormat::Table => {
            output::print_error(&format!("{} denied", kind.label()));
            output::print_output(reason_rows(&decision.blocking_reasons), format)
        }
    }
}
