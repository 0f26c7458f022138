//! Assembly scene: placing blueprints and scoring placed instances.

use lathe_kernel::recoverability_score;
use lathe_types::{AssemblyInstance, StagedObject};
use tracing::{info, warn};
use uuid::Uuid;

use crate::types::SessionError;
use crate::EditorSession;

impl EditorSession {
    /// Place a committed blueprint at `position`.
    ///
    /// A missing blueprint or a ghost is a no-op and returns `None`. The
    /// blueprint itself is never modified.
    pub fn deploy(&mut self, blueprint_id: &str, position: [f64; 3]) -> Option<Uuid> {
        let blueprint = match self.blueprint(blueprint_id) {
            Some(b) if b.is_ghost() => {
                warn!(%blueprint_id, "ghost blueprints cannot be deployed");
                return None;
            }
            Some(b) => b,
            None => {
                warn!(%blueprint_id, "deploy skipped: blueprint not found");
                return None;
            }
        };
        if !position.iter().all(|c| c.is_finite()) {
            warn!(%blueprint_id, ?position, "deploy skipped: non-finite position");
            return None;
        }

        let instance = AssemblyInstance {
            id: Uuid::new_v4(),
            blueprint_id: blueprint.id.clone(),
            position,
            rotation: 0.0,
            layer: self.layer,
            render_mode: self.render_mode,
            manifestation: self.manifestation,
            dfd: blueprint.disassembly.clone(),
        };
        let id = instance.id;
        info!(%id, %blueprint_id, "instance deployed");
        self.instances.push(instance);
        Some(id)
    }

    pub fn instance(&self, id: Uuid) -> Option<&AssemblyInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn remove_instance(&mut self, id: Uuid) -> Result<AssemblyInstance, SessionError> {
        let pos = self
            .instances
            .iter()
            .position(|i| i.id == id)
            .ok_or(SessionError::InstanceNotFound { id })?;
        Ok(self.instances.remove(pos))
    }

    /// Instances paired with their blueprints. Dangling references are skipped.
    pub fn resolved_instances(&self) -> impl Iterator<Item = (&AssemblyInstance, &StagedObject)> {
        self.instances
            .iter()
            .filter_map(|i| self.blueprint(&i.blueprint_id).map(|b| (i, b)))
    }

    /// Recoverability of one instance against the whole scene.
    pub fn instance_recoverability(&self, id: Uuid) -> Result<f64, SessionError> {
        let instance = self.instance(id).ok_or(SessionError::InstanceNotFound { id })?;
        Ok(recoverability_score(
            instance,
            &self.instances,
            &self.config.scoring,
        ))
    }
}
