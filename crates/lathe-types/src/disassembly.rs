use serde::{Deserialize, Serialize};

/// How a part is joined to the rest of the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionType {
    #[default]
    MechanicalBolt,
    GravityFit,
    Welded,
    Adhesive,
}

impl ConnectionType {
    /// Base recoverability weight before obstruction and accessibility.
    pub fn base_weight(&self) -> f64 {
        match self {
            ConnectionType::MechanicalBolt => 1.0,
            ConnectionType::GravityFit => 0.9,
            ConnectionType::Welded => 0.3,
            ConnectionType::Adhesive => 0.1,
        }
    }

    /// Tool needed to undo this kind of joint.
    pub fn default_tool(&self) -> &'static str {
        match self {
            ConnectionType::MechanicalBolt => "Allen key 5mm",
            ConnectionType::GravityFit => "Hand",
            ConnectionType::Welded => "Cutting torch",
            ConnectionType::Adhesive => "Heat gun",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionType::MechanicalBolt => "MECHANICAL_BOLT",
            ConnectionType::GravityFit => "GRAVITY_FIT",
            ConnectionType::Welded => "WELDED",
            ConnectionType::Adhesive => "ADHESIVE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LifecyclePhase {
    #[default]
    Design,
    Production,
    Use,
    Maintenance,
    EndOfLife,
}

/// Design-for-disassembly record attached to blueprints and inherited by instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisassemblyData {
    pub connection_type: ConnectionType,
    pub disassembly_tool: String,
    /// Fraction of material recoverable at end of life, 0..=1.
    pub recyclability_index: f64,
    pub lifecycle_phase: LifecyclePhase,
    /// Ordered human-readable disassembly instructions.
    pub steps: Vec<String>,
    /// How reachable the joint is, 0..=1. Multiplies the recoverability score.
    #[serde(default = "full_access")]
    pub accessibility: f64,
}

fn full_access() -> f64 {
    1.0
}

impl DisassemblyData {
    /// Default record for a joint type, with a generic two-step procedure.
    pub fn for_connection(connection_type: ConnectionType) -> Self {
        let tool = connection_type.default_tool();
        Self {
            connection_type,
            disassembly_tool: tool.to_string(),
            recyclability_index: connection_type.base_weight(),
            lifecycle_phase: LifecyclePhase::Design,
            steps: vec![
                format!("Release {} joint using {}", connection_type.label(), tool),
                "Lift component clear along its radial axis".to_string(),
            ],
            accessibility: 1.0,
        }
    }
}

impl Default for DisassemblyData {
    fn default() -> Self {
        Self::for_connection(ConnectionType::default())
    }
}
