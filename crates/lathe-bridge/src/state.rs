use draft_engine::{CommitOutcome, EditorSession, PurgeScope, SessionError};
use lathe_types::{Domain, UnitScale};
use neuro_core::NeuroCore;
use stock_export::ExportError;
use tracing::{debug, warn};

/// Single-flight guard for assistant requests.
///
/// Each request gets a generation number. A response is accepted only if it
/// carries the generation still in flight; anything the user did since that
/// invalidates the request turns its response stale.
#[derive(Debug, Clone, Default)]
pub struct AssistantGate {
    last_generation: u64,
    in_flight: Option<u64>,
}

impl AssistantGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Fails while another one is in flight.
    pub fn begin(&mut self) -> Result<u64, BridgeError> {
        if let Some(generation) = self.in_flight {
            return Err(BridgeError::AssistantBusy { generation });
        }
        self.last_generation += 1;
        self.in_flight = Some(self.last_generation);
        Ok(self.last_generation)
    }

    /// Accept the response for `generation`, closing the request.
    pub fn complete(&mut self, generation: u64) -> Result<(), BridgeError> {
        if self.in_flight != Some(generation) {
            return Err(BridgeError::StaleResponse { generation });
        }
        self.in_flight = None;
        Ok(())
    }

    /// Forget the in-flight request. Its response will be stale.
    pub fn invalidate(&mut self) {
        if let Some(generation) = self.in_flight.take() {
            debug!(generation, "assistant request invalidated");
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }
}

/// Everything the bridge owns: the session, the transmutation engine and
/// the assistant gate.
#[derive(Debug, Clone)]
pub struct BridgeState {
    pub session: EditorSession,
    pub neuro: NeuroCore,
    pub assistant: AssistantGate,
    /// Name stamped on exported manifests.
    pub project_name: String,
}

impl BridgeState {
    pub fn new() -> Self {
        Self {
            session: EditorSession::new(),
            neuro: NeuroCore::default(),
            assistant: AssistantGate::new(),
            project_name: "Untitled".to_string(),
        }
    }

    /// Commit through the session. Any in-flight assistant request is
    /// invalidated because the state it was asked about is gone.
    pub fn commit(
        &mut self,
        domain: Domain,
        unit_scale: UnitScale,
    ) -> Result<CommitOutcome, BridgeError> {
        self.assistant.invalidate();
        Ok(self.session.commit(domain, unit_scale)?)
    }

    pub fn purge(&mut self, scope: PurgeScope) {
        self.assistant.invalidate();
        self.session.purge(scope);
    }

    pub fn select_domain(&mut self, domain: Domain) {
        if self.session.domain() != Some(domain) {
            self.assistant.invalidate();
        }
        self.session.select_domain(domain);
    }

    /// Drop a failed request without touching the session.
    pub fn fail_assistant(&mut self, generation: u64, message: &str) -> Result<(), BridgeError> {
        self.assistant.complete(generation)?;
        warn!(generation, %message, "assistant request failed");
        Ok(())
    }
}

impl Default for BridgeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from the bridge layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BridgeError {
    #[error("assistant request {generation} is still in flight")]
    AssistantBusy { generation: u64 },

    #[error("assistant response {generation} is stale")]
    StaleResponse { generation: u64 },

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("export error: {0}")]
    Export(#[from] ExportError),

    #[error("serialization error: {reason}")]
    Serialization { reason: String },
}
