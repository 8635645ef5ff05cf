//! CLI command implementations

pub mod gate;
pub mod history;
pub mod simulate;
pub mod status;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

use crate::error::{CliError, CliResult};

/// Read and parse a JSON document from `path`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: display,
        source,
    })
}

/// Parse an RFC 3339 instant for `--at` arguments.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp {raw:?}: {e}"))
}
