use serde::{Deserialize, Serialize};

fn unit_radius() -> f64 {
    1.0
}

/// A direction plus scale on the working sphere.
///
/// `theta` is the azimuth in the XZ plane, `phi` the polar angle measured
/// from +Y. `radius` is a multiplier on the session radius, nominally 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarPoint {
    pub theta: f64,
    pub phi: f64,
    #[serde(default = "unit_radius")]
    pub radius: f64,
}

impl PolarPoint {
    pub fn new(theta: f64, phi: f64, radius: f64) -> Self {
        Self { theta, phi, radius }
    }

    /// A point on the unit shell (radius multiplier 1).
    pub fn unit(theta: f64, phi: f64) -> Self {
        Self {
            theta,
            phi,
            radius: 1.0,
        }
    }

    /// The radius multiplier actually applied during conversion.
    /// Zero or non-finite multipliers fall back to 1.
    pub fn effective_radius(&self) -> f64 {
        if self.radius == 0.0 || !self.radius.is_finite() {
            1.0
        } else {
            self.radius
        }
    }
}
