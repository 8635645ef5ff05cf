//! Process-local registry of operations that have not reached a terminal state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use quorum_types::{Address, DaoId, OperationKind, ProposalId};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::RegistryError;

/// At most one non-terminal run exists per key.
///
/// Proposal ids are sequence numbers scoped to their DAO, so the DAO is part
/// of the target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InFlightKey {
    pub actor: Address,
    pub dao: DaoId,
    pub target: ProposalId,
    pub kind: OperationKind,
}

impl InFlightKey {
    pub fn new(actor: Address, dao: DaoId, target: ProposalId, kind: OperationKind) -> Self {
        Self {
            actor,
            dao,
            target,
            kind,
        }
    }
}

impl std::fmt::Display for InFlightKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}/{}", self.actor, self.dao, self.target, self.kind)
    }
}

/// Bookkeeping for one registered run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InFlightEntry {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
}

/// Registry of in-flight runs, shared by every coordinator in the process.
///
/// Cloning is cheap and clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct InFlightRegistry {
    entries: Arc<DashMap<InFlightKey, InFlightEntry>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically claim `key`.
    ///
    /// The claim lasts as long as the returned guard. A second claim on the
    /// same key fails until the guard is dropped, even when both calls race.
    pub fn try_register(&self, key: InFlightKey) -> Result<InFlightGuard, RegistryError> {
        match self.entries.entry(key.clone()) {
            Entry::Occupied(_) => {
                debug!(key = %key, "Registration refused, run already in flight");
                Err(RegistryError::AlreadyInFlight(key))
            }
            Entry::Vacant(slot) => {
                let run_id = Uuid::new_v4();
                slot.insert(InFlightEntry {
                    run_id,
                    started_at: Utc::now(),
                });
                debug!(key = %key, run_id = %run_id, "Run registered");
                Ok(InFlightGuard {
                    entries: Arc::clone(&self.entries),
                    key,
                    run_id,
                })
            }
        }
    }

    pub fn is_in_flight(&self, key: &InFlightKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entry(&self, key: &InFlightKey) -> Option<InFlightEntry> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Releases its registry entry when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    entries: Arc<DashMap<InFlightKey, InFlightEntry>>,
    key: InFlightKey,
    run_id: Uuid,
}

impl InFlightGuard {
    pub fn key(&self) -> &InFlightKey {
        &self.key
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let run_id = self.run_id;
        if self
            .entries
            .remove_if(&self.key, |_, entry| entry.run_id == run_id)
            .is_some()
        {
            debug!(key = %self.key, run_id = %run_id, "Run released");
        }
    }
}
