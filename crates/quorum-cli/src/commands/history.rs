//! Proposal timeline

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use quorum_status::HistoryReconstructor;
use quorum_types::{HistoryElement, Proposal};
use serde::Serialize;
use tabled::Tabled;

use super::{parse_instant, read_json};
use crate::config::QuorumConfig;
use crate::error::CliResult;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct HistoryArgs {
    /// Proposal JSON file, as read from the index
    proposal: PathBuf,

    /// Hide period boundaries not yet crossed at this instant (RFC 3339)
    #[arg(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,
}

/// Table row for timeline display
#[derive(Debug, Serialize, Tabled)]
struct HistoryRow {
    /// When the milestone happened
    at: String,
    milestone: String,
    description: String,
    /// Time inferred from neighbouring milestones
    derived: String,
}

impl From<&HistoryElement> for HistoryRow {
    fn from(element: &HistoryElement) -> Self {
        let payload = element.payload();
        Self {
            at: element.at().format("%Y-%m-%d %H:%M:%S").to_string(),
            milestone: payload.title.clone(),
            description: payload.description.clone(),
            derived: if payload.derived { "yes" } else { "" }.to_string(),
        }
    }
}

pub fn execute(args: HistoryArgs, config: &QuorumConfig, format: OutputFormat) -> CliResult<()> {
    let proposal: Proposal = read_json(&args.proposal)?;
    let reconstructor = HistoryReconstructor::new(config.governance.clone());
    let timeline = reconstructor.build_until(&proposal, args.at.unwrap_or_else(Utc::now));

    match format {
        OutputFormat::Json => output::print_single(&timeline),
        OutputFormat::Table => {
            output::print_output(timeline.iter().map(HistoryRow::from).collect(), format)
        }
    }
}
