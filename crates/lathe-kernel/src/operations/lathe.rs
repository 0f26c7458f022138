use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::LatheError;
use crate::geometry::point::Point3d;
use crate::geometry::vector::Vec3;

/// Triangle mesh of a solid of revolution, as flat buffers ready for upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatheMesh {
    /// [x0, y0, z0, x1, y1, z1, ...]
    pub vertices: Vec<f32>,
    /// Per-vertex unit normals, same layout as `vertices`.
    pub normals: Vec<f32>,
    /// Triangle indices into the vertex array.
    pub indices: Vec<u32>,
}

impl LatheMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Revolve a drafted profile around the Y axis.
///
/// Each point contributes its radial distance from the axis and its height,
/// so any 3D draft is first flattened into a meridian profile. The sweep
/// covers `angle_degrees` (clamped to [0, 360]) in `segments` steps, giving
/// `segments + 1` rings. A full turn duplicates the seam ring. That keeps
/// the indexing uniform.
#[instrument(skip(profile), fields(profile_len = profile.len()))]
pub fn lathe_mesh(
    profile: &[Point3d],
    angle_degrees: f64,
    segments: usize,
) -> Result<LatheMesh, LatheError> {
    if profile.len() < 2 {
        return Err(LatheError::InsufficientProfile {
            required: 2,
            provided: profile.len(),
        });
    }
    if segments < 3 {
        return Err(LatheError::InsufficientSegments {
            required: 3,
            provided: segments,
        });
    }
    if angle_degrees.is_nan() || angle_degrees.clamp(0.0, 360.0) < 1e-9 {
        return Err(LatheError::InvalidAngle {
            value: angle_degrees,
        });
    }
    let sweep = angle_degrees.clamp(0.0, 360.0).to_radians();

    let meridian: Vec<(f64, f64)> = profile
        .iter()
        .map(|p| ((p.x * p.x + p.z * p.z).sqrt(), p.y))
        .collect();
    let n = meridian.len();

    let mut positions: Vec<Point3d> = Vec::with_capacity((segments + 1) * n);
    for ring in 0..=segments {
        let angle = sweep * ring as f64 / segments as f64;
        let (sin_a, cos_a) = angle.sin_cos();
        positions.extend(
            meridian
                .iter()
                .map(|&(u, v)| Point3d::new(u * sin_a, v, u * cos_a)),
        );
    }

    let mut indices: Vec<u32> = Vec::with_capacity(segments * (n - 1) * 6);
    for ring in 0..segments {
        let base = ring * n;
        for j in 0..n - 1 {
            let a = (base + j) as u32;
            let b = (base + j + n) as u32;
            let c = (base + j + n + 1) as u32;
            let d = (base + j + 1) as u32;
            indices.extend_from_slice(&[a, b, d, c, d, b]);
        }
    }

    let normals = vertex_normals(&positions, &indices);

    let mesh = LatheMesh {
        vertices: flatten(positions.iter().map(|p| p.to_vec3())),
        normals: flatten(normals.into_iter()),
        indices,
    };
    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "lathe mesh built"
    );
    Ok(mesh)
}

/// Area-weighted vertex normals. Vertices on the axis with no
/// well-defined normal point up.
fn vertex_normals(positions: &[Point3d], indices: &[u32]) -> Vec<Vec3> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[i1] - positions[i0]).cross(&(positions[i2] - positions[i0]));
        acc[i0] = acc[i0] + face;
        acc[i1] = acc[i1] + face;
        acc[i2] = acc[i2] + face;
    }
    acc.into_iter()
        .map(|n| n.normalized().unwrap_or(Vec3::Y))
        .collect()
}

fn flatten(vectors: impl Iterator<Item = Vec3>) -> Vec<f32> {
    vectors
        .flat_map(|v| [v.x as f32, v.y as f32, v.z as f32])
        .collect()
}
