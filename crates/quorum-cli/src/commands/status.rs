//! Derived status of a proposal

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use colored::*;
use quorum_status::{percent_no, percent_yes, StatusDeriver};
use quorum_types::{Proposal, ProposalId, Status};
use serde::Serialize;

use super::{parse_instant, read_json};
use crate::config::QuorumConfig;
use crate::error::CliResult;
use crate::output::{emit, OutputFormat};

#[derive(Args)]
pub struct StatusArgs {
    /// Proposal JSON file, as read from the index
    proposal: PathBuf,

    /// Evaluate at this instant instead of now (RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct StatusReport {
    proposal_id: ProposalId,
    at: DateTime<Utc>,
    status: Status,
    verdict: Option<Status>,
    percent_yes: f64,
    percent_no: f64,
}

pub fn execute(args: StatusArgs, config: &QuorumConfig, format: OutputFormat) -> CliResult<()> {
    let proposal: Proposal = read_json(&args.proposal)?;
    let at = args.at.unwrap_or_else(Utc::now);
    let deriver = StatusDeriver::new(config.governance.clone());

    let report = StatusReport {
        proposal_id: proposal.id.clone(),
        at,
        status: deriver.derive(&proposal, at),
        verdict: deriver.verdict(&proposal),
        percent_yes: percent_yes(&proposal),
        percent_no: percent_no(&proposal),
    };

    emit(&report, format, |report| {
        println!("Proposal: {}", report.proposal_id);
        println!("At: {}", report.at.to_rfc3339());
        println!("Status: {}", colorize_status(report.status));
        if let Some(verdict) = report.verdict {
            println!("Verdict: {}", colorize_status(verdict));
        }
        println!("Yes: {:.2}%  No: {:.2}%", report.percent_yes, report.percent_no);
    })
}

fn colorize_status(status: Status) -> ColoredString {
    let label = status.to_string();
    match status {
        Status::Passed | Status::ReadyForProcessing => label.green(),
        Status::Failed => label.red(),
        Status::Cancelled => label.dimmed(),
        Status::Voting | Status::GracePeriod => label.yellow(),
        _ => label.normal(),
    }
}
