//! The in-progress sketch and its phase transitions.

use lathe_kernel::{is_closed_loop, Point3d};
use serde::{Deserialize, Serialize};

/// Drafting phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DraftPhase {
    /// No active points and no cached faces.
    #[default]
    Idle,
    /// Points accumulate.
    Drafting,
    /// First and last point met. Adds are ignored.
    Closed,
}

/// Inputs that move the draft between phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftEvent {
    PointAdded,
    LoopClosed,
    Continued,
    /// Last point removed. `empty` when nothing is left in the draft or the
    /// face cache; `closed` when the shortened draft still closes.
    Undone { empty: bool, closed: bool },
    Committed,
    Purged,
}

impl DraftPhase {
    /// Transition table. `None` means the event is not valid in this phase.
    pub fn on(self, event: DraftEvent) -> Option<DraftPhase> {
        use DraftEvent::*;
        use DraftPhase::*;

        match (self, event) {
            (Idle | Drafting, PointAdded) => Some(Drafting),
            (Drafting, LoopClosed) => Some(Closed),
            (Closed, Continued) => Some(Drafting),
            (Idle, Undone { .. }) => Some(Idle),
            (Drafting | Closed, Undone { empty: true, .. }) => Some(Idle),
            (Drafting | Closed, Undone { closed: true, .. }) => Some(Closed),
            (Drafting | Closed, Undone { .. }) => Some(Drafting),
            (_, Committed) | (_, Purged) => Some(Idle),
            _ => None,
        }
    }
}

/// Active points plus the faces already closed in this object.
#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub(crate) points: Vec<Point3d>,
    pub(crate) faces: Vec<Vec<Point3d>>,
    pub(crate) phase: DraftPhase,
}

impl Draft {
    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    pub fn faces(&self) -> &[Vec<Point3d>] {
        &self.faces
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == DraftPhase::Closed
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.faces.is_empty()
    }

    /// Apply `event`. Invalid events leave the phase untouched and return false.
    pub(crate) fn apply(&mut self, event: DraftEvent) -> bool {
        match self.phase.on(event) {
            Some(next) => {
                self.phase = next;
                true
            }
            None => false,
        }
    }

    /// Append a point and evaluate closure. Returns true if the loop closed.
    pub(crate) fn push(&mut self, point: Point3d, threshold: f64) -> bool {
        self.points.push(point);
        self.apply(DraftEvent::PointAdded);
        if is_closed_loop(&self.points, threshold) {
            self.apply(DraftEvent::LoopClosed);
            true
        } else {
            false
        }
    }

    /// Archive a closed face and start a fresh one.
    pub(crate) fn continue_face(&mut self) -> bool {
        if self.phase != DraftPhase::Closed || self.points.len() < 3 {
            return false;
        }
        self.faces.push(std::mem::take(&mut self.points));
        self.apply(DraftEvent::Continued)
    }

    /// Drop the last active point. Cached faces are never touched.
    pub(crate) fn undo(&mut self, threshold: f64) -> Option<Point3d> {
        let removed = self.points.pop()?;
        let closed = is_closed_loop(&self.points, threshold);
        let empty = self.is_empty();
        self.apply(DraftEvent::Undone { empty, closed });
        Some(removed)
    }

    /// Every face with at least three points, cached faces first, flattened.
    /// Returns the face count alongside.
    pub(crate) fn consolidate(&self) -> (usize, Vec<Point3d>) {
        let faces: Vec<&Vec<Point3d>> = self
            .faces
            .iter()
            .chain(std::iter::once(&self.points))
            .filter(|f| f.len() >= 3)
            .collect();
        let count = faces.len();
        (count, faces.into_iter().flatten().copied().collect())
    }

    pub(crate) fn clear(&mut self, event: DraftEvent) {
        self.points.clear();
        self.faces.clear();
        self.apply(event);
    }
}
