use lathe_kernel::{DraftConfig, LatheConfig, LatheError, ScoringConfig};
use lathe_types::Domain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session-wide tunables.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub draft: DraftConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub lathe: LatheConfig,
}

/// What the host should ask the user next, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Prompt {
    /// Drafting is gated on a domain choice.
    SelectDomain { suggested: Domain },
    /// A face closed or a proposal arrived: continue or materialize.
    FaceWorkflow,
}

/// Result of offering a raw point to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AddOutcome {
    /// No domain selected yet. Nothing was drafted.
    DomainRequired { suggested: Domain },
    /// The draft is closed and awaits continue, commit or purge.
    Ignored,
    /// The point had a non-finite coordinate.
    Rejected,
    /// Appended at `index`, loop still open.
    Added { index: usize, point: [f64; 3] },
    /// Appended at `index` and the loop closed.
    Closed { index: usize, point: [f64; 3] },
}

/// Result of a commit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new blueprint was built from the manual draft.
    Materialized { id: String },
    /// A pending ghost was approved in place.
    Promoted { id: String },
    /// No face had three or more points.
    NothingToCommit,
}

/// Result of staging an AI proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalOutcome {
    Staged { id: String },
    /// Same geometry is already a committed blueprint.
    AlreadyCommitted { id: String },
    /// Only ghost objects can be staged as proposals.
    NotAGhost { id: String },
}

/// How much a purge throws away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PurgeScope {
    /// Active draft and cached faces.
    #[default]
    Draft,
    /// Draft, cached faces and every assembly instance.
    Everything,
}

/// Errors from the editor session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("blueprint not found: {id}")]
    BlueprintNotFound { id: String },

    #[error("instance not found: {id}")]
    InstanceNotFound { id: Uuid },

    #[error("session state is corrupt: {reason}")]
    CorruptState { reason: String },

    #[error("lathe error: {0}")]
    Lathe(#[from] LatheError),
}

/// Whether the commit path serves the manual draft or an AI proposal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Workflow {
    #[default]
    Manual,
    /// A ghost blueprint awaits approval through the next commit.
    Stabilizing { pending_id: String },
}
