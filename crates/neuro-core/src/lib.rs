//! Translation of AI action tokens into ghost blueprints.
//!
//! Tokens are untrusted. Every rejection path yields `None` from the public
//! entry points. Nothing here panics on bad input.

pub mod hash;
pub mod token;
pub mod types;

use chrono::Utc;
use lathe_kernel::{generate_lattice, generate_spiral_helix, polar_to_cartesian};
use lathe_kernel::{LatticeParams, SpiralHelixParams};
use lathe_types::{DisassemblyData, GeometryStatus, Origin, PolarPoint, StagedObject};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

pub use hash::{canonical_string, topology_hash, topology_id};
pub use token::{ActionToken, DrawPayload, GeneratorCall, DRAW_OBJECT};
pub use types::{NeuroConfig, TransmuteError};

/// The transmutation engine.
#[derive(Debug, Clone, Default)]
pub struct NeuroCore {
    pub config: NeuroConfig,
}

impl NeuroCore {
    pub fn new(config: NeuroConfig) -> Self {
        Self { config }
    }

    /// Transmute a JSON token string. Unparseable text yields `None`.
    pub fn transmute_str(&self, json: &str, radius_factor: f64) -> Option<StagedObject> {
        match serde_json::from_str::<Value>(json) {
            Ok(value) => self.transmute(&value, radius_factor),
            Err(e) => {
                warn!(error = %e, "[NeuroCore] token is not valid JSON");
                None
            }
        }
    }

    /// Transmute a raw token. `None` means the token produced nothing to show.
    pub fn transmute(&self, token: &Value, radius_factor: f64) -> Option<StagedObject> {
        match self.try_transmute(token, radius_factor) {
            Ok(obj) => Some(obj),
            Err(e) => {
                log_rejection(&e);
                None
            }
        }
    }

    /// Transmute an already-parsed payload.
    pub fn transmute_payload(&self, payload: &DrawPayload, radius_factor: f64) -> Option<StagedObject> {
        match self.build(payload, radius_factor) {
            Ok(obj) => Some(obj),
            Err(e) => {
                log_rejection(&e);
                None
            }
        }
    }

    /// Fallible form of [`NeuroCore::transmute`], exposing the rejection reason.
    pub fn try_transmute(&self, token: &Value, radius_factor: f64) -> Result<StagedObject, TransmuteError> {
        let action = token.get("action").and_then(Value::as_str).unwrap_or_default();
        if action != DRAW_OBJECT {
            return Err(TransmuteError::UnrecognizedAction {
                action: action.to_string(),
            });
        }

        let payload = match token.get("payload") {
            Some(p) if !p.is_null() => p,
            _ => return Err(TransmuteError::MissingPayload),
        };
        let payload: DrawPayload =
            serde_json::from_value(payload.clone()).map_err(|e| TransmuteError::Malformed {
                reason: e.to_string(),
            })?;

        self.build(&payload, radius_factor)
    }

    /// Caller radius if positive and finite, otherwise the fallback.
    pub fn safe_radius(&self, radius_factor: f64) -> f64 {
        if radius_factor.is_finite() && radius_factor > 0.0 {
            radius_factor
        } else {
            warn!(
                radius_factor,
                fallback = self.config.fallback_radius,
                "[NeuroCore] radius factor invalid, using fallback"
            );
            self.config.fallback_radius
        }
    }

    #[instrument(skip(self, payload), fields(name = ?payload.name))]
    fn build(&self, payload: &DrawPayload, radius_factor: f64) -> Result<StagedObject, TransmuteError> {
        let polar = match &payload.generator_call {
            // Generator failures degrade to "no points" rather than propagating.
            Some(call) => match run_generator(call) {
                Ok(points) => points,
                Err(e) => {
                    error!(function = %call.function, error = %e, "[NeuroCore] procedural generator failure");
                    Vec::new()
                }
            },
            None => payload.points.clone().unwrap_or_default(),
        };

        if polar.is_empty() {
            return Err(TransmuteError::NoPoints);
        }
        if polar.len() > self.config.max_points {
            return Err(TransmuteError::TooManyPoints {
                count: polar.len(),
                max: self.config.max_points,
            });
        }
        if let Some(index) = polar
            .iter()
            .position(|p| !(p.theta.is_finite() && p.phi.is_finite()))
        {
            return Err(TransmuteError::NonFinitePoint { index });
        }

        let radius = self.safe_radius(radius_factor);
        let points: Vec<[f64; 3]> = polar
            .iter()
            .map(|p| polar_to_cartesian(p, radius).to_array())
            .collect();

        let id = topology_id(&polar, self.config.hash_precision);
        let revolution_angle = payload
            .revolution_angle
            .filter(|a| a.is_finite())
            .unwrap_or(360.0)
            .clamp(0.0, 360.0);
        let layer = payload
            .base_layer
            .filter(|l| l.is_finite() && *l > 0.0)
            .unwrap_or(radius / self.config.radius_scale);
        let domain = payload.domain.unwrap_or_default();

        info!(%id, points = points.len(), %domain, "[NeuroCore] ghost object synthesized");

        Ok(StagedObject {
            id,
            name: payload
                .name
                .clone()
                .unwrap_or_else(|| "AI_SYNTH_OBJECT".to_string()),
            points,
            polar_instructions: Some(polar),
            layer,
            domain,
            unit_scale: domain.default_unit_scale(),
            description: payload
                .description
                .clone()
                .unwrap_or_else(|| "Synthesized via NeuroCore".to_string()),
            recovery_score: self.config.provisional_recovery_score,
            timestamp: Utc::now(),
            revolution_angle,
            is_lathe: payload.requests_lathe(),
            status: GeometryStatus::Ghost {
                origin: Origin::NeuroCore,
            },
            disassembly: DisassemblyData::default(),
            external_ref: payload.id.clone(),
        })
    }
}

/// Dispatch a generator call by name. Params default field-by-field.
pub fn run_generator(call: &GeneratorCall) -> Result<Vec<PolarPoint>, TransmuteError> {
    let params = if call.params.is_null() {
        Value::Object(Default::default())
    } else {
        call.params.clone()
    };
    let malformed = |e: serde_json::Error| TransmuteError::Malformed {
        reason: format!("{} params: {}", call.function, e),
    };

    match call.function.as_str() {
        "generateSpiralHelix" => {
            let params: SpiralHelixParams = serde_json::from_value(params).map_err(malformed)?;
            Ok(generate_spiral_helix(&params)?)
        }
        "generateLattice" => {
            let params: LatticeParams = serde_json::from_value(params).map_err(malformed)?;
            Ok(generate_lattice(&params)?)
        }
        other => Err(TransmuteError::UnknownGenerator {
            name: other.to_string(),
        }),
    }
}

fn log_rejection(e: &TransmuteError) {
    match e {
        TransmuteError::UnrecognizedAction { .. } | TransmuteError::MissingPayload => {
            debug!(reason = %e, "[NeuroCore] token ignored")
        }
        _ => warn!(reason = %e, "[NeuroCore] token rejected"),
    }
}
