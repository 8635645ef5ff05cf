use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{Address, ChainId, DaoId, ProposalId};

/// The kind of state-changing operation performed on a proposal.
///
/// Part of the in-flight registry key: two operations of different kinds on
/// the same proposal may run concurrently.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Sponsor,
    Vote,
    Cancel,
    Process,
    Custom(String),
}

impl OperationKind {
    /// Ledger method invoked by default for this kind.
    pub fn default_method(&self) -> Option<&str> {
        match self {
            OperationKind::Sponsor => Some("sponsorProposal"),
            OperationKind::Vote => Some("submitVote"),
            OperationKind::Cancel => Some("cancelProposal"),
            OperationKind::Process => Some("processProposal"),
            OperationKind::Custom(_) => None,
        }
    }

    /// Label used when presenting outcomes to a person.
    pub fn label(&self) -> &str {
        match self {
            OperationKind::Sponsor => "Sponsor",
            OperationKind::Vote => "Vote",
            OperationKind::Cancel => "Cancel",
            OperationKind::Process => "Execution",
            OperationKind::Custom(name) => name,
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Sponsor => f.write_str("sponsor"),
            OperationKind::Vote => f.write_str("vote"),
            OperationKind::Cancel => f.write_str("cancel"),
            OperationKind::Process => f.write_str("process"),
            OperationKind::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// A single positional argument. The ledger encoding is opaque to the core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OperationArg {
    Uint(u128),
    Bool(bool),
    Address(Address),
    /// Hex-encoded bytes
    Bytes(String),
    Text(String),
}

/// Optional per-request overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrides {
    /// Gas ceiling for the transaction
    #[serde(default)]
    pub gas_limit: Option<u64>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("operation kind {0} has no default method; set one explicitly")]
    MissingMethod(OperationKind),

    #[error("method name must not be empty")]
    EmptyMethod,

    #[error("{0} is not a ledger sequence number")]
    InvalidProposalId(ProposalId),
}

/// An operation bound for the ledger.
///
/// Immutable once built; the coordinator invocation that receives it owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    kind: OperationKind,
    chain: ChainId,
    dao: DaoId,
    target: ProposalId,
    method: String,
    args: Vec<OperationArg>,
    overrides: Overrides,
}

impl OperationRequest {
    pub fn builder(
        kind: OperationKind,
        chain: ChainId,
        dao: DaoId,
        target: ProposalId,
    ) -> OperationRequestBuilder {
        OperationRequestBuilder {
            kind,
            chain,
            dao,
            target,
            method: None,
            args: Vec::new(),
            overrides: Overrides::default(),
        }
    }

    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    pub fn chain(&self) -> &ChainId {
        &self.chain
    }

    /// Ledger address the operation is sent to.
    pub fn dao(&self) -> &DaoId {
        &self.dao
    }

    /// The proposal the operation acts upon.
    pub fn target(&self) -> &ProposalId {
        &self.target
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[OperationArg] {
        &self.args
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }
}

pub struct OperationRequestBuilder {
    kind: OperationKind,
    chain: ChainId,
    dao: DaoId,
    target: ProposalId,
    method: Option<String>,
    args: Vec<OperationArg>,
    overrides: Overrides,
}

impl OperationRequestBuilder {
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn arg(mut self, arg: OperationArg) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = OperationArg>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn gas_limit(mut self, gas_limit: u64) -> Self {
        self.overrides.gas_limit = Some(gas_limit);
        self
    }

    pub fn build(self) -> Result<OperationRequest, RequestError> {
        let method = match self.method {
            Some(method) => method,
            None => self
                .kind
                .default_method()
                .map(str::to_owned)
                .ok_or_else(|| RequestError::MissingMethod(self.kind.clone()))?,
        };

        if method.trim().is_empty() {
            return Err(RequestError::EmptyMethod);
        }

        Ok(OperationRequest {
            kind: self.kind,
            chain: self.chain,
            dao: self.dao,
            target: self.target,
            method,
            args: self.args,
            overrides: self.overrides,
        })
    }
}
