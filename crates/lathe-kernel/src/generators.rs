//! Procedural point generators in angular space.
//!
//! Both generators emit unit-multiplier [`PolarPoint`]s. Scaling to a session
//! radius happens at conversion time.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use lathe_types::PolarPoint;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

/// Upper bound on the number of points a single generator call may emit.
pub const MAX_GENERATED_POINTS: usize = 100_000;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    #[error("parameter {name} is not finite")]
    NonFinite { name: &'static str },

    #[error("generator would produce no points: {reason}")]
    Empty { reason: String },

    #[error("generator would produce {requested} points (max {max})")]
    TooManyPoints { requested: usize, max: usize },
}

/// Parameters for [`generate_spiral_helix`]. Missing JSON fields take the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpiralHelixParams {
    pub turns: f64,
    /// Total sweep of `phi` from start to end.
    #[serde(alias = "totalHeightInPhi")]
    pub total_height: f64,
    pub start_phi: f64,
    pub start_theta: f64,
    #[serde(deserialize_with = "whole_number")]
    pub points_per_turn: u32,
}

impl Default for SpiralHelixParams {
    fn default() -> Self {
        Self {
            turns: 2.0,
            total_height: FRAC_PI_2,
            start_phi: FRAC_PI_4,
            start_theta: 0.0,
            points_per_turn: 24,
        }
    }
}

/// Parameters for [`generate_lattice`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LatticeParams {
    pub center_theta: f64,
    pub center_phi: f64,
    /// Angular span of the grid along each axis.
    pub size: f64,
    /// Points per axis.
    #[serde(deserialize_with = "whole_number")]
    pub resolution: u32,
}

impl Default for LatticeParams {
    fn default() -> Self {
        Self {
            center_theta: 0.0,
            center_phi: FRAC_PI_2,
            size: 0.5,
            resolution: 4,
        }
    }
}

/// Counts arrive from model output as JSON numbers; `3` and `3.0` are the same.
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(D::Error::custom(format!("expected a whole count, got {}", value)))
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64, GeneratorError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeneratorError::NonFinite { name })
    }
}

/// Helix: `floor(turns * points_per_turn) + 1` points, with `theta` and `phi`
/// both advancing linearly.
#[instrument]
pub fn generate_spiral_helix(params: &SpiralHelixParams) -> Result<Vec<PolarPoint>, GeneratorError> {
    let turns = finite("turns", params.turns)?;
    let total_height = finite("totalHeight", params.total_height)?;
    let start_phi = finite("startPhi", params.start_phi)?;
    let start_theta = finite("startTheta", params.start_theta)?;

    let steps = (turns * f64::from(params.points_per_turn)).floor();
    if steps < 1.0 {
        return Err(GeneratorError::Empty {
            reason: format!(
                "turns={} with {} points per turn",
                turns, params.points_per_turn
            ),
        });
    }
    if steps >= MAX_GENERATED_POINTS as f64 {
        return Err(GeneratorError::TooManyPoints {
            requested: steps as usize + 1,
            max: MAX_GENERATED_POINTS,
        });
    }
    let steps = steps as usize;

    let points: Vec<PolarPoint> = (0..=steps)
        .map(|i| {
            let progress = i as f64 / steps as f64;
            PolarPoint::unit(
                start_theta + progress * turns * TAU,
                start_phi + progress * total_height,
            )
        })
        .collect();

    debug!(count = points.len(), "spiral helix generated");
    Ok(points)
}

/// Square grid of `resolution^2` points laid out directly in (theta, phi),
/// centred on the given direction and spanning `size` on each axis.
///
/// Cells are uniform in angle, not in arc length, so they shrink towards the
/// poles.
#[instrument]
pub fn generate_lattice(params: &LatticeParams) -> Result<Vec<PolarPoint>, GeneratorError> {
    let center_theta = finite("centerTheta", params.center_theta)?;
    let center_phi = finite("centerPhi", params.center_phi)?;
    let size = finite("size", params.size)?;

    let resolution = params.resolution as usize;
    if resolution < 2 {
        return Err(GeneratorError::Empty {
            reason: format!("resolution {} cannot span a grid", resolution),
        });
    }
    let count = resolution.saturating_mul(resolution);
    if count > MAX_GENERATED_POINTS {
        return Err(GeneratorError::TooManyPoints {
            requested: count,
            max: MAX_GENERATED_POINTS,
        });
    }

    let step = size / (resolution - 1) as f64;
    let half = size / 2.0;
    let mut points = Vec::with_capacity(count);
    for i in 0..resolution {
        for j in 0..resolution {
            points.push(PolarPoint::unit(
                center_theta + i as f64 * step - half,
                center_phi + j as f64 * step - half,
            ));
        }
    }

    debug!(count = points.len(), "lattice generated");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn helix_two_turns_has_49_points() {
        let pts = generate_spiral_helix(&SpiralHelixParams::default()).unwrap();
        assert_eq!(pts.len(), 49);
    }

    #[test]
    fn helix_sweeps_full_turns_and_height() {
        let params = SpiralHelixParams {
            turns: 1.5,
            total_height: 0.6,
            start_phi: 0.2,
            start_theta: 0.1,
            points_per_turn: 10,
        };
        let pts = generate_spiral_helix(&params).unwrap();
        assert_eq!(pts.len(), 16);
        let last = pts.last().unwrap();
        assert_relative_eq!(last.theta, 0.1 + 1.5 * TAU, epsilon = 1e-12);
        assert_relative_eq!(last.phi, 0.8, epsilon = 1e-12);
        assert!(pts.iter().all(|p| p.radius == 1.0));
    }

    #[test]
    fn helix_with_zero_turns_fails() {
        let params = SpiralHelixParams {
            turns: 0.0,
            ..SpiralHelixParams::default()
        };
        assert!(matches!(
            generate_spiral_helix(&params),
            Err(GeneratorError::Empty { .. })
        ));
    }

    #[test]
    fn helix_rejects_nan() {
        let params = SpiralHelixParams {
            start_phi: f64::NAN,
            ..SpiralHelixParams::default()
        };
        assert_eq!(
            generate_spiral_helix(&params),
            Err(GeneratorError::NonFinite { name: "startPhi" })
        );
    }

    #[test]
    fn lattice_default_has_16_points_centred() {
        let pts = generate_lattice(&LatticeParams::default()).unwrap();
        assert_eq!(pts.len(), 16);
        assert_relative_eq!(pts[0].theta, -0.25, epsilon = 1e-12);
        assert_relative_eq!(pts[0].phi, FRAC_PI_2 - 0.25, epsilon = 1e-12);
        assert_relative_eq!(pts[15].theta, 0.25, epsilon = 1e-12);
        assert_relative_eq!(pts[15].phi, FRAC_PI_2 + 0.25, epsilon = 1e-12);
    }

    #[test]
    fn lattice_resolution_one_fails() {
        let params = LatticeParams {
            resolution: 1,
            ..LatticeParams::default()
        };
        assert!(generate_lattice(&params).is_err());
    }

    #[test]
    fn lattice_caps_point_count() {
        let params = LatticeParams {
            resolution: 1000,
            ..LatticeParams::default()
        };
        assert!(matches!(
            generate_lattice(&params),
            Err(GeneratorError::TooManyPoints { .. })
        ));
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let p: LatticeParams = serde_json::from_str(r#"{"resolution":3}"#).unwrap();
        assert_eq!(p.resolution, 3);
        assert_relative_eq!(p.size, 0.5);
    }

    #[test]
    fn counts_accept_integral_floats() {
        let p: LatticeParams = serde_json::from_str(r#"{"resolution":3.0}"#).unwrap();
        assert_eq!(p.resolution, 3);
        let h: SpiralHelixParams = serde_json::from_str(r#"{"pointsPerTurn":12.0}"#).unwrap();
        assert_eq!(h.points_per_turn, 12);
    }

    #[test]
    fn counts_reject_fractions_and_negatives() {
        assert!(serde_json::from_str::<LatticeParams>(r#"{"resolution":2.5}"#).is_err());
        assert!(serde_json::from_str::<LatticeParams>(r#"{"resolution":-3}"#).is_err());
        assert!(serde_json::from_str::<SpiralHelixParams>(r#"{"pointsPerTurn":1e12}"#).is_err());
    }
}
