//! Design-for-disassembly heuristics.
//!
//! These are rough recoverability estimates, not collision detection.

use lathe_types::{AssemblyInstance, Domain};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::geometry::point::Point3d;

/// Complexity score: `1 / (n * complexity_factor)` clamped to `[min_score, 1]`.
/// More vertices means lower assumed recoverability.
pub fn analyze_disassembly(points: &[Point3d], config: &ScoringConfig) -> f64 {
    let complexity = points.len() as f64 * config.complexity_factor;
    if complexity <= 0.0 {
        return 1.0;
    }
    (1.0 / complexity).clamp(config.min_score, 1.0)
}

/// Recoverability of one instance within an assembly.
///
/// Starts from the connection-type weight. Each other instance that sits
/// further out and within `obstruction_angle` of this one's direction
/// multiplies the score by `obstruction_penalty`. The result is then scaled by the
/// instance's accessibility. An instance at the assembly origin has no
/// extraction direction and is never obstructed.
pub fn recoverability_score(
    instance: &AssemblyInstance,
    all: &[AssemblyInstance],
    config: &ScoringConfig,
) -> f64 {
    let own = Point3d::from_array(instance.position).to_vec3();
    let own_radius = own.length();

    let obstructions = match own.normalized() {
        Some(direction) => all
            .iter()
            .filter(|other| other.id != instance.id)
            .filter(|other| {
                let pos = Point3d::from_array(other.position).to_vec3();
                pos.length() > own_radius && direction.angle_to(&pos) < config.obstruction_angle
            })
            .count(),
        None => 0,
    };

    let penalty = config.obstruction_penalty.powi(obstructions as i32);
    let accessibility = instance.dfd.accessibility.clamp(0.0, 1.0);
    let score = instance.dfd.connection_type.base_weight() * penalty * accessibility;

    debug!(
        instance = %instance.id,
        obstructions,
        score,
        "recoverability scored"
    );
    score.clamp(0.0, 1.0)
}

/// Guess a domain from the mean spacing of consecutive points.
pub fn suggest_domain(points: &[Point3d]) -> Domain {
    if points.len() < 3 {
        return Domain::Chip;
    }
    let total: f64 = points.windows(2).map(|w| w[0].distance_to(&w[1])).sum();
    let mean = total / (points.len() - 1) as f64;
    if mean > 50.0 {
        Domain::Bim
    } else {
        Domain::Auto
    }
}
