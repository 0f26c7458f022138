use lathe_types::{Domain, Manifestation, PolarPoint};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The only action tag the engine acts on.
pub const DRAW_OBJECT: &str = "DRAW_OBJECT";

/// Envelope emitted by the external model.
///
/// `payload` is kept as raw JSON so an unrecognized action is rejected on its
/// tag alone, before the payload shape matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionToken {
    pub action: String,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// Body of a `DRAW_OBJECT` token. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub points: Option<Vec<PolarPoint>>,
    #[serde(default)]
    pub generator_call: Option<GeneratorCall>,
    #[serde(default)]
    pub base_layer: Option<f64>,
    #[serde(default)]
    pub domain: Option<Domain>,
    #[serde(default)]
    pub manifestation: Option<Manifestation>,
    #[serde(default)]
    pub revolution_angle: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to build points procedurally instead of listing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorCall {
    pub function: String,
    /// Generator-specific parameters. Parsed only once the function is known.
    #[serde(default)]
    pub params: Value,
}

impl DrawPayload {
    /// True when the payload asks for a solid of revolution.
    /// A zero revolution angle counts as not specified.
    pub fn requests_lathe(&self) -> bool {
        self.manifestation == Some(Manifestation::Volume)
            || self.revolution_angle.is_some_and(|a| a != 0.0)
    }
}
