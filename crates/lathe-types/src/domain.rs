use serde::{Deserialize, Serialize};

/// Unit-scale regime a blueprint is catalogued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Domain {
    /// Architectural, meters.
    #[default]
    #[serde(rename = "BIM")]
    Bim,
    /// Mechanical, ISO metric.
    #[serde(rename = "AUTO")]
    Auto,
    /// Micro-fabrication.
    #[serde(rename = "CHIP")]
    Chip,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Bim => "BIM",
            Domain::Auto => "AUTO",
            Domain::Chip => "CHIP",
        }
    }

    /// The unit scale a domain stores under unless told otherwise.
    pub fn default_unit_scale(&self) -> UnitScale {
        match self {
            Domain::Bim => UnitScale::Meters,
            Domain::Auto => UnitScale::IsoMetrical,
            Domain::Chip => UnitScale::Micrometer,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stock sub-folder, which also fixes the export unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UnitScale {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "ISO-Metrical")]
    IsoMetrical,
    #[serde(rename = "Micrometer")]
    Micrometer,
}

impl UnitScale {
    /// Parse a stock folder name. Unknown folders are treated as ISO metric,
    /// which exports in millimetres.
    pub fn from_folder(folder: &str) -> Self {
        match folder {
            "m" => UnitScale::Meters,
            "Micrometer" => UnitScale::Micrometer,
            _ => UnitScale::IsoMetrical,
        }
    }

    pub fn folder(&self) -> &'static str {
        match self {
            UnitScale::Meters => "m",
            UnitScale::IsoMetrical => "ISO-Metrical",
            UnitScale::Micrometer => "Micrometer",
        }
    }

    pub fn unit_symbol(&self) -> &'static str {
        match self {
            UnitScale::Meters => "m",
            UnitScale::IsoMetrical => "mm",
            UnitScale::Micrometer => "μm",
        }
    }
}

/// How a blueprint or instance is manifested in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Manifestation {
    #[default]
    Wireframe,
    Surface,
    Volume,
}

/// Projection used when rendering instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Euclidian,
    Ramanujan,
}

/// Top-level editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AppMode {
    #[default]
    Lathe,
    Assembly,
}
