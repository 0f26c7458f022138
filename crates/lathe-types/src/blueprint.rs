use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::disassembly::DisassemblyData;
use crate::domain::{Domain, UnitScale};
use crate::polar::PolarPoint;

/// Where a blueprint's geometry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Origin {
    /// Drawn by hand in the drafting session.
    Manual,
    /// Synthesized from an AI action token.
    NeuroCore,
}

/// Confirmation state of a blueprint.
///
/// `Ghost` objects are previews awaiting human approval. The only way out of
/// `Ghost` is [`StagedObject::promote`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeometryStatus {
    Ghost { origin: Origin },
    Committed { origin: Origin },
}

impl GeometryStatus {
    pub fn origin(&self) -> Origin {
        match self {
            GeometryStatus::Ghost { origin } | GeometryStatus::Committed { origin } => *origin,
        }
    }

    pub fn is_ghost(&self) -> bool {
        matches!(self, GeometryStatus::Ghost { .. })
    }
}

/// A catalogued blueprint in the digital stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedObject {
    pub id: String,
    pub name: String,
    /// Cartesian points in drawing order.
    pub points: Vec<[f64; 3]>,
    /// Canonical polar geometry for AI-authored objects.
    #[serde(default)]
    pub polar_instructions: Option<Vec<PolarPoint>>,
    pub layer: f64,
    pub domain: Domain,
    pub unit_scale: UnitScale,
    pub description: String,
    /// Recoverability score in [0, 1].
    pub recovery_score: f64,
    pub timestamp: DateTime<Utc>,
    /// Revolution sweep in degrees, [0, 360].
    pub revolution_angle: f64,
    pub is_lathe: bool,
    pub status: GeometryStatus,
    pub disassembly: DisassemblyData,
    /// Identifier supplied by an external producer, never used for identity.
    #[serde(default)]
    pub external_ref: Option<String>,
}

impl StagedObject {
    pub fn is_ghost(&self) -> bool {
        self.status.is_ghost()
    }

    pub fn origin(&self) -> Origin {
        self.status.origin()
    }

    /// Confirm a ghost object under the chosen domain.
    /// Returns false (and changes nothing) if the object is already committed.
    pub fn promote(&mut self, domain: Domain, unit_scale: UnitScale, recovery_score: f64) -> bool {
        let origin = match self.status {
            GeometryStatus::Ghost { origin } => origin,
            GeometryStatus::Committed { .. } => return false,
        };
        self.status = GeometryStatus::Committed { origin };
        self.domain = domain;
        self.unit_scale = unit_scale;
        self.recovery_score = recovery_score;
        true
    }
}
