//! Digital stock: blueprints, AI proposals and their approval.

use lathe_kernel::{analyze_disassembly, lathe_mesh, LatheMesh, Point3d};
use lathe_types::{AppMode, Domain, StagedObject, UnitScale};
use tracing::{info, warn};

use crate::types::{ProposalOutcome, Prompt, SessionError, Workflow};
use crate::EditorSession;

impl EditorSession {
    /// Find a blueprint by id.
    pub fn blueprint(&self, id: &str) -> Option<&StagedObject> {
        self.stock.iter().find(|o| o.id == id)
    }

    /// Stage an AI-produced ghost for approval.
    ///
    /// Switches to lathe mode, raises the face workflow prompt and marks the
    /// ghost as pending. Re-submitting identical geometry replaces the
    /// earlier ghost rather than duplicating it. A new proposal supersedes a
    /// different pending one, whose ghost is discarded.
    pub fn receive_proposal(&mut self, object: StagedObject) -> ProposalOutcome {
        let id = object.id.clone();
        if !object.is_ghost() {
            warn!(%id, "proposal is not a ghost, refusing");
            return ProposalOutcome::NotAGhost { id };
        }

        match self.stock.iter().position(|o| o.id == id) {
            Some(pos) if !self.stock[pos].is_ghost() => {
                info!(%id, "proposal matches a committed blueprint, skipping");
                return ProposalOutcome::AlreadyCommitted { id };
            }
            Some(pos) => {
                self.stock.remove(pos);
            }
            None => {}
        }

        if let Workflow::Stabilizing { pending_id } = &self.workflow {
            if *pending_id != id {
                let superseded = pending_id.clone();
                self.stock.retain(|o| !(o.id == superseded && o.is_ghost()));
                info!(id = %superseded, by = %id, "pending proposal superseded");
            }
        }

        info!(%id, points = object.points.len(), lathe = object.is_lathe, "proposal staged");
        self.stock.insert(0, object);
        self.mode = AppMode::Lathe;
        self.workflow = Workflow::Stabilizing {
            pending_id: id.clone(),
        };
        self.prompt = Some(Prompt::FaceWorkflow);
        self.status = format!("PROPOSAL {} | AWAITING STABILIZATION", id);
        ProposalOutcome::Staged { id }
    }

    /// Discard the pending ghost and return to manual drafting.
    /// Returns the id of the discarded ghost.
    pub fn reject_proposal(&mut self) -> Option<String> {
        let Workflow::Stabilizing { pending_id } = std::mem::take(&mut self.workflow) else {
            return None;
        };
        self.stock.retain(|o| !(o.id == pending_id && o.is_ghost()));
        if self.prompt == Some(Prompt::FaceWorkflow) && !self.draft.is_closed() {
            self.prompt = None;
        }
        self.status = format!("PROPOSAL {} DISCARDED", pending_id);
        info!(id = %pending_id, "proposal rejected");
        Some(pending_id)
    }

    /// Promote the ghost `id` in place. `None` if it is missing or already
    /// committed.
    pub(crate) fn promote(
        &mut self,
        id: &str,
        domain: Domain,
        unit_scale: UnitScale,
    ) -> Option<String> {
        let scoring = self.config.scoring;
        let object = self.stock.iter_mut().find(|o| o.id == id)?;
        let points: Vec<Point3d> = object.points.iter().copied().map(Point3d::from).collect();
        let score = analyze_disassembly(&points, &scoring);
        if !object.promote(domain, unit_scale, score) {
            return None;
        }
        info!(%id, %domain, score, "proposal promoted");
        Some(object.id.clone())
    }

    /// Remove a blueprint. Instances that reference it are left dangling and
    /// are skipped by [`EditorSession::resolved_instances`]. Removing a pending
    /// ghost leaves the workflow as is; the next commit falls back to the draft.
    pub fn remove_blueprint(&mut self, id: &str) -> Result<StagedObject, SessionError> {
        let pos = self
            .stock
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| SessionError::BlueprintNotFound { id: id.to_string() })?;
        Ok(self.stock.remove(pos))
    }

    /// Revolution mesh for a blueprint. Ghosts are tessellated coarser.
    pub fn lathe_preview(&self, id: &str) -> Result<LatheMesh, SessionError> {
        let object = self
            .blueprint(id)
            .ok_or_else(|| SessionError::BlueprintNotFound { id: id.to_string() })?;
        let profile: Vec<Point3d> = object.points.iter().copied().map(Point3d::from).collect();
        let segments = self.config.lathe.segments_for(object.is_ghost());
        Ok(lathe_mesh(&profile, object.revolution_angle, segments)?)
    }
}
