use quorum_types::Proposal;

/// Yes votes as a percentage of the voting power snapshot, rounded to two
/// decimals. Zero when the snapshot is empty.
pub fn percent_yes(proposal: &Proposal) -> f64 {
    rounded_percentage(proposal.yes_votes, proposal.total_voting_power)
}

/// No votes as a percentage of the voting power snapshot.
pub fn percent_no(proposal: &Proposal) -> f64 {
    rounded_percentage(proposal.no_votes, proposal.total_voting_power)
}

fn rounded_percentage(part: u128, total: u128) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let ratio = part as f64 / total as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}
