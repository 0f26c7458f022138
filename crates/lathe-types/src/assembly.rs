use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::disassembly::DisassemblyData;
use crate::domain::{Manifestation, RenderMode};

/// A placed occurrence of a blueprint in the assembly scene.
///
/// Holds the blueprint id by reference only. A dangling id means the blueprint
/// was removed and the instance is skipped when resolving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyInstance {
    pub id: Uuid,
    pub blueprint_id: String,
    pub position: [f64; 3],
    /// Rotation about the vertical axis, radians.
    pub rotation: f64,
    pub layer: f64,
    pub render_mode: RenderMode,
    pub manifestation: Manifestation,
    pub dfd: DisassemblyData,
}
