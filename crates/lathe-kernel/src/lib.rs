pub mod analysis;
pub mod config;
pub mod generators;
pub mod geometry;
pub mod operations;
pub mod topology;

pub use analysis::{analyze_disassembly, recoverability_score, suggest_domain};
pub use config::{DraftConfig, LatheConfig, ScoringConfig};
pub use generators::{
    generate_lattice, generate_spiral_helix, GeneratorError, LatticeParams, SpiralHelixParams,
};
pub use geometry::arc::great_arc;
pub use geometry::point::Point3d;
pub use geometry::polar::{
    polar_to_cartesian, snap_point_to_precision_grid, snap_to_grid, to_cartesian, to_polar,
    Spherical, PHI,
};
pub use geometry::vector::Vec3;
pub use operations::lathe::{lathe_mesh, LatheMesh};
pub use operations::LatheError;
pub use topology::loops::{centroid, face_normal, is_closed_loop};
