//! The editor session: drafting, the digital stock and the assembly scene.
//!
//! All state lives in one owned [`EditorSession`]. Every operation is a
//! synchronous method on it.

pub mod assembly;
pub mod draft;
pub mod stock;
pub mod types;

use chrono::Utc;
use lathe_kernel::{
    analyze_disassembly, great_arc, is_closed_loop, snap_point_to_precision_grid, suggest_domain,
    to_polar, Point3d,
};
use lathe_types::{
    AppMode, AssemblyInstance, DisassemblyData, Domain, GeometryStatus, Manifestation, Origin,
    RenderMode, StagedObject, UnitScale,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub use draft::{Draft, DraftEvent, DraftPhase};
pub use types::{
    AddOutcome, CommitOutcome, Prompt, PurgeScope, ProposalOutcome, SessionConfig, SessionError,
    Workflow,
};

const IDLE_STATUS: &str = "IDLE | WAITING COMMAND";

/// The editor aggregate.
#[derive(Debug, Clone)]
pub struct EditorSession {
    pub config: SessionConfig,
    draft: Draft,
    /// Most recent first.
    stock: Vec<StagedObject>,
    instances: Vec<AssemblyInstance>,
    workflow: Workflow,
    prompt: Option<Prompt>,
    domain: Option<Domain>,
    mode: AppMode,
    layer: f64,
    precision_lines: bool,
    manifestation: Manifestation,
    render_mode: RenderMode,
    revolution_angle: f64,
    status: String,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            draft: Draft::default(),
            stock: Vec::new(),
            instances: Vec::new(),
            workflow: Workflow::Manual,
            prompt: None,
            domain: None,
            mode: AppMode::Lathe,
            layer: config.draft.default_layer,
            precision_lines: true,
            manifestation: Manifestation::Wireframe,
            render_mode: RenderMode::Euclidian,
            revolution_angle: 360.0,
            status: IDLE_STATUS.to_string(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn phase(&self) -> DraftPhase {
        self.draft.phase()
    }

    pub fn stock(&self) -> &[StagedObject] {
        &self.stock
    }

    pub fn instances(&self) -> &[AssemblyInstance] {
        &self.instances
    }

    pub fn workflow(&self) -> &Workflow {
        &self.workflow
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.prompt
    }

    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn layer(&self) -> f64 {
        self.layer
    }

    pub fn precision_lines(&self) -> bool {
        self.precision_lines
    }

    pub fn manifestation(&self) -> Manifestation {
        self.manifestation
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn revolution_angle(&self) -> f64 {
        self.revolution_angle
    }

    /// Radius of the working sphere for the current layer.
    pub fn active_radius(&self) -> f64 {
        self.config.draft.active_radius(self.layer)
    }

    /// Human-readable status line for the HUD.
    pub fn status(&self) -> &str {
        &self.status
    }

    // ── Settings ─────────────────────────────────────────────────────────

    /// Satisfies the domain gate. Clears a pending domain prompt.
    pub fn select_domain(&mut self, domain: Domain) {
        self.domain = Some(domain);
        if matches!(self.prompt, Some(Prompt::SelectDomain { .. })) {
            self.prompt = None;
        }
        self.status = format!("DOMAIN {} | READY", domain);
    }

    /// Move to another layer. Points already placed keep their positions.
    pub fn set_layer(&mut self, layer: f64) {
        if layer.is_finite() && layer > 0.0 {
            self.layer = layer;
        } else {
            warn!(layer, "ignoring invalid layer");
        }
    }

    pub fn set_precision_lines(&mut self, enabled: bool) {
        self.precision_lines = enabled;
    }

    pub fn set_mode(&mut self, mode: AppMode) {
        self.mode = mode;
    }

    pub fn set_manifestation(&mut self, manifestation: Manifestation) {
        self.manifestation = manifestation;
    }

    pub fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Clamped to [0, 360]. Non-finite input is ignored.
    pub fn set_revolution_angle(&mut self, degrees: f64) {
        if degrees.is_finite() {
            self.revolution_angle = degrees.clamp(0.0, 360.0);
        }
    }

    // ── Drafting ─────────────────────────────────────────────────────────

    /// Offer a raw point to the draft.
    ///
    /// With precision lines on, the point is snapped to the angular grid and
    /// re-projected onto the working sphere. Otherwise a point outside the
    /// sphere is pulled back onto it.
    pub fn add_point(&mut self, raw: Point3d) -> AddOutcome {
        let Some(domain) = self.domain else {
            let suggested = self.suggested_domain();
            warn!(%suggested, "point refused: no domain selected");
            self.prompt = Some(Prompt::SelectDomain { suggested });
            return AddOutcome::DomainRequired { suggested };
        };
        if self.draft.is_closed() {
            debug!("point ignored: draft is closed");
            return AddOutcome::Ignored;
        }
        if !(raw.x.is_finite() && raw.y.is_finite() && raw.z.is_finite()) {
            warn!(?raw, "point refused: non-finite coordinate");
            return AddOutcome::Rejected;
        }

        let radius = self.active_radius();
        let point = if self.precision_lines {
            snap_point_to_precision_grid(&raw, radius, self.config.draft.snap_divisions)
        } else if raw.norm() > radius {
            raw.with_norm(radius)
        } else {
            raw
        };

        let polar = to_polar(&point);
        debug!(
            %domain,
            x = point.x,
            y = point.y,
            z = point.z,
            theta_deg = polar.theta.to_degrees(),
            phi_deg = polar.phi.to_degrees(),
            "point drafted"
        );

        let index = self.draft.points().len();
        let closed = self.draft.push(point, self.config.draft.closure_threshold);
        if closed {
            self.prompt = Some(Prompt::FaceWorkflow);
            self.status = "FACE CRYSTALLIZED | TOPOLOGY STABILIZED".to_string();
            AddOutcome::Closed {
                index,
                point: point.to_array(),
            }
        } else {
            self.status = format!(
                "DRAWING | POINT [X:{:.2}, Y:{:.2}, Z:{:.2}] | POLAR [θ:{:.1}°, φ:{:.1}°]",
                point.x,
                point.y,
                point.z,
                polar.theta.to_degrees(),
                polar.phi.to_degrees()
            );
            AddOutcome::Added {
                index,
                point: point.to_array(),
            }
        }
    }

    /// Cache the closed face and keep drawing the same object.
    pub fn continue_drawing(&mut self) -> bool {
        if !self.draft.continue_face() {
            return false;
        }
        self.prompt = None;
        self.status = "DRAWING CONTINUITY | CACHED FACE".to_string();
        true
    }

    /// Remove the last active point. Cached faces and the stock are untouched.
    pub fn undo(&mut self) -> bool {
        let removed = self.draft.undo(self.config.draft.closure_threshold);
        if removed.is_none() {
            return false;
        }
        // A pending proposal keeps its prompt.
        let face_prompt = self.prompt == Some(Prompt::FaceWorkflow);
        if face_prompt && !self.draft.is_closed() && self.workflow == Workflow::Manual {
            self.prompt = None;
        }
        true
    }

    /// Discard drafting state. Irreversible.
    pub fn purge(&mut self, scope: PurgeScope) {
        self.draft.clear(DraftEvent::Purged);
        if scope == PurgeScope::Everything {
            self.instances.clear();
        }
        self.workflow = Workflow::Manual;
        self.prompt = None;
        self.status = IDLE_STATUS.to_string();
        info!(?scope, "session purged");
    }

    /// Materialize the draft, or approve the pending proposal.
    ///
    /// While a proposal is pending the ghost is promoted in place. If the
    /// ghost has disappeared from the stock the manual draft is committed
    /// instead.
    #[instrument(skip(self), fields(phase = ?self.draft.phase()))]
    pub fn commit(
        &mut self,
        domain: Domain,
        unit_scale: UnitScale,
    ) -> Result<CommitOutcome, SessionError> {
        if let Workflow::Stabilizing { pending_id } = std::mem::take(&mut self.workflow) {
            if let Some(id) = self.promote(&pending_id, domain, unit_scale) {
                self.domain = Some(domain);
                self.prompt = None;
                self.status = format!("STABILIZED {} TO {}/{}", id, domain, unit_scale.folder());
                return Ok(CommitOutcome::Promoted { id });
            }
            warn!(%pending_id, "pending proposal vanished, committing manual draft");
        }

        if self.draft.is_closed()
            && !is_closed_loop(self.draft.points(), self.config.draft.closure_threshold)
        {
            return Err(SessionError::CorruptState {
                reason: format!(
                    "draft marked closed with {} points that do not close",
                    self.draft.points().len()
                ),
            });
        }

        let (face_count, points) = self.draft.consolidate();
        if face_count == 0 {
            debug!("nothing to commit");
            return Ok(CommitOutcome::NothingToCommit);
        }

        let id = manual_id();
        let object = StagedObject {
            id: id.clone(),
            name: format!("UNIT-{}F", face_count),
            points: points.iter().map(Point3d::to_array).collect(),
            polar_instructions: None,
            layer: self.layer,
            domain,
            unit_scale,
            description: format!("ISO {} Active Topology", domain),
            recovery_score: analyze_disassembly(&points, &self.config.scoring),
            timestamp: Utc::now(),
            revolution_angle: self.revolution_angle,
            is_lathe: self.manifestation == Manifestation::Volume,
            status: GeometryStatus::Committed {
                origin: Origin::Manual,
            },
            disassembly: DisassemblyData::default(),
            external_ref: None,
        };
        info!(
            %id,
            faces = face_count,
            points = object.points.len(),
            score = object.recovery_score,
            "blueprint materialized"
        );

        self.stock.insert(0, object);
        self.draft.clear(DraftEvent::Committed);
        self.domain = Some(domain);
        self.prompt = None;
        self.status = format!("MATERIALIZED TO {}/{}", domain, unit_scale.folder());
        Ok(CommitOutcome::Materialized { id })
    }

    // ── Derived views ────────────────────────────────────────────────────

    /// Domain hint from the geometry drafted so far.
    pub fn suggested_domain(&self) -> Domain {
        let points: Vec<Point3d> = self
            .draft
            .faces()
            .iter()
            .flatten()
            .chain(self.draft.points())
            .copied()
            .collect();
        suggest_domain(&points)
    }

    /// The active draft as great-arc polylines on the working sphere,
    /// `segments` steps per edge, capped at `max_outline_segments`.
    pub fn draft_outline(&self, segments: usize) -> Vec<Point3d> {
        let max = self.config.draft.max_outline_segments;
        let segments = if segments > max {
            warn!(requested = segments, max, "outline segments clamped");
            max
        } else {
            segments
        };
        let radius = self.active_radius();
        let points = self.draft.points();
        let mut outline = Vec::new();
        for (i, pair) in points.windows(2).enumerate() {
            let arc = great_arc(&pair[0], &pair[1], radius, segments);
            // Arcs share endpoints.
            let skip = usize::from(i > 0);
            outline.extend(arc.into_iter().skip(skip));
        }
        outline
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

fn manual_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("ISO-{}", hex[..8].to_uppercase())
}
