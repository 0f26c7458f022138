//! Tunable constants for drafting, scoring and lathe tessellation.

use serde::{Deserialize, Serialize};

/// Drafting tolerances and working-sphere scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DraftConfig {
    /// First/last point distance below which a draft closes.
    /// Fixed across domains; see DESIGN.md for the micro-scale caveat.
    pub closure_threshold: f64,
    /// Angular grid divisions per full turn (24 gives 15 degree steps).
    pub snap_divisions: u32,
    /// Active working radius is `layer * radius_scale`.
    pub radius_scale: f64,
    /// Layer a fresh session starts on.
    pub default_layer: f64,
    /// Upper bound on great-arc steps per edge in draft outlines.
    #[serde(default = "default_max_outline_segments")]
    pub max_outline_segments: usize,
}

fn default_max_outline_segments() -> usize {
    256
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            closure_threshold: 2.0,
            snap_divisions: 24,
            radius_scale: 2.5,
            default_layer: 32.5,
            max_outline_segments: default_max_outline_segments(),
        }
    }
}

impl DraftConfig {
    pub fn active_radius(&self, layer: f64) -> f64 {
        layer * self.radius_scale
    }
}

/// Disassembly heuristics. None of these have a derivation behind them,
/// so they stay adjustable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score is `1 / (vertex_count * complexity_factor)` before clamping.
    pub complexity_factor: f64,
    /// Lower clamp for the complexity score.
    pub min_score: f64,
    /// Angular proximity (radians) under which an outer instance obstructs.
    pub obstruction_angle: f64,
    /// Multiplier applied once per obstructing instance.
    pub obstruction_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            complexity_factor: 0.1,
            min_score: 0.1,
            obstruction_angle: 0.2, // ~11.5 degrees
            obstruction_penalty: 0.8,
        }
    }
}

/// Angular subdivisions for lathe previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatheConfig {
    pub committed_segments: usize,
    pub ghost_segments: usize,
}

impl Default for LatheConfig {
    fn default() -> Self {
        Self {
            committed_segments: 64,
            ghost_segments: 32,
        }
    }
}

impl LatheConfig {
    /// Segment count for an object in the given confirmation state.
    pub fn segments_for(&self, ghost: bool) -> usize {
        if ghost {
            self.ghost_segments
        } else {
            self.committed_segments
        }
    }
}
