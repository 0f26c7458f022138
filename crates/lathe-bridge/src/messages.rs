use draft_engine::{DraftPhase, EditorSession, Prompt, PurgeScope, Workflow};
use lathe_kernel::LatheMesh;
use lathe_types::{
    AppMode, AssemblyInstance, Domain, Manifestation, RenderMode, StagedObject, UnitScale,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Messages from the UI thread to the engine.
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    // -- Drafting --
    SelectDomain {
        domain: Domain,
    },
    /// A raw click on the working sphere.
    AddPoint {
        point: [f64; 3],
    },
    ContinueDrawing,
    /// Materialize the draft, or approve the pending proposal.
    Commit {
        domain: Domain,
        unit_scale: UnitScale,
    },
    Undo,
    Purge {
        #[serde(default)]
        scope: PurgeScope,
    },

    // -- Settings --
    SetLayer {
        layer: f64,
    },
    SetPrecisionLines {
        enabled: bool,
    },
    SetMode {
        mode: AppMode,
    },
    SetManifestation {
        manifestation: Manifestation,
    },
    SetRenderMode {
        render_mode: RenderMode,
    },
    SetRevolutionAngle {
        degrees: f64,
    },

    // -- Stock and assembly --
    Deploy {
        blueprint_id: String,
        position: [f64; 3],
    },
    RemoveBlueprint {
        id: String,
    },
    RemoveInstance {
        id: Uuid,
    },
    RejectProposal,

    // -- Assistant --
    /// The UI is about to send a prompt to the model.
    BeginAssistant,
    /// The model answered with an action token.
    CompleteAssistant {
        generation: u64,
        token: Value,
    },
    /// The model call failed. Frees the gate.
    FailAssistant {
        generation: u64,
        message: String,
    },

    // -- Queries --
    GetState,
    LathePreview {
        id: String,
    },
    DraftOutline {
        segments: usize,
    },
    InstanceRecoverability {
        id: Uuid,
    },

    // -- Export --
    ExportBoard {
        id: String,
    },
    ExportDisassembly {
        instance_id: Uuid,
    },
    ExportManifest {
        name: String,
    },
}

/// What kind of document an export produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportKind {
    TechnicalBoard,
    Disassembly,
    Manifest,
}

/// Messages from the engine back to the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    /// Full session state after a mutation.
    StateUpdated { state: SessionSnapshot },

    /// Drafting is gated on a domain choice.
    DomainRequired { suggested: Domain },

    /// A point landed in the draft.
    PointAdded {
        index: usize,
        point: [f64; 3],
        closed: bool,
    },

    /// The point was not drafted (closed draft or invalid coordinate).
    PointIgnored,

    /// A blueprint was materialized or a proposal approved.
    Committed {
        id: String,
        promoted: bool,
        state: SessionSnapshot,
    },

    NothingToCommit,

    /// The assistant may now be called with this generation.
    AssistantStarted { generation: u64, radius: f64 },

    /// An AI proposal is staged as a ghost.
    ProposalStaged { id: String, state: SessionSnapshot },

    /// The action token produced no geometry, or matched committed stock.
    ProposalIgnored { reason: String },

    /// A late assistant response was dropped.
    Stale { generation: u64 },

    Deployed { instance_id: Uuid },

    /// The blueprint or instance did not exist. Nothing changed.
    NotFound { id: String },

    MeshReady { id: String, mesh: LatheMesh },

    Outline { points: Vec<[f64; 3]> },

    Recoverability { instance_id: Uuid, score: f64 },

    ExportReady { kind: ExportKind, data: String },

    Error { message: String },
}

/// Serializable view of the editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: DraftPhase,
    pub workflow: Workflow,
    pub prompt: Option<Prompt>,
    pub domain: Option<Domain>,
    pub mode: AppMode,
    pub layer: f64,
    pub active_radius: f64,
    pub precision_lines: bool,
    pub manifestation: Manifestation,
    pub render_mode: RenderMode,
    pub revolution_angle: f64,
    pub points: Vec<[f64; 3]>,
    pub faces: Vec<Vec<[f64; 3]>>,
    pub stock: Vec<StagedObject>,
    pub instances: Vec<AssemblyInstance>,
    pub status: String,
}

impl SessionSnapshot {
    pub fn of(session: &EditorSession) -> Self {
        let draft = session.draft();
        Self {
            phase: draft.phase(),
            workflow: session.workflow().clone(),
            prompt: session.prompt(),
            domain: session.domain(),
            mode: session.mode(),
            layer: session.layer(),
            active_radius: session.active_radius(),
            precision_lines: session.precision_lines(),
            manifestation: session.manifestation(),
            render_mode: session.render_mode(),
            revolution_angle: session.revolution_angle(),
            points: draft.points().iter().map(|p| p.to_array()).collect(),
            faces: draft
                .faces()
                .iter()
                .map(|f| f.iter().map(|p| p.to_array()).collect())
                .collect(),
            stock: session.stock().to_vec(),
            instances: session.instances().to_vec(),
            status: session.status().to_string(),
        }
    }
}
