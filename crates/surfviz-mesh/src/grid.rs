//! Uniform grid tessellation of parametric equations.
//!
//! The `(u, v)` unit square is sampled on a `(segments + 1)²` lattice with `i`
//! (the u axis) as the outer loop and `j` (the v axis) as the inner loop, so the
//! vertex at grid `(i, j)` has index `i * (segments + 1) + j`. Boundary samples
//! are kept even when the surface is closed: seams at `u = 0/1` and `v = 0/1`
//! and collapsed poles are emitted as distinct vertices.

use serde::{Deserialize, Serialize};
use surfviz_core::{Result, SurfvizError};
use surfviz_geometry::ParametricEquation;
use surfviz_math::{Point2, Point3};
use tracing::debug;

use crate::TriangleMesh;

/// Grid subdivisions per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Resolution {
    segments: u32,
}

impl Resolution {
    pub const DEFAULT_SEGMENTS: u32 = 64;
    /// Largest resolution whose vertex indices still fit in `u32`.
    pub const MAX_SEGMENTS: u32 = 65535;

    /// Validate a requested segment count.
    pub fn new(segments: i64) -> Result<Self> {
        if segments < 1 || segments > Self::MAX_SEGMENTS as i64 {
            return Err(SurfvizError::InvalidResolution {
                segments,
                max: Self::MAX_SEGMENTS as i64,
            });
        }
        Ok(Self {
            segments: segments as u32,
        })
    }

    pub fn segments(self) -> usize {
        self.segments as usize
    }

    /// Samples along each axis, `segments + 1`.
    pub fn vertices_per_axis(self) -> usize {
        self.segments() + 1
    }

    pub fn vertex_count(self) -> usize {
        self.vertices_per_axis() * self.vertices_per_axis()
    }

    pub fn triangle_count(self) -> usize {
        2 * self.segments() * self.segments()
    }

    /// Flat vertex index of grid point `(i, j)`.
    pub fn vertex_index(self, i: usize, j: usize) -> usize {
        i * self.vertices_per_axis() + j
    }

    /// Domain parameter of grid line `k`; exactly `1.0` at `k == segments`.
    fn parameter(self, k: usize) -> f64 {
        k as f64 / self.segments as f64
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            segments: Self::DEFAULT_SEGMENTS,
        }
    }
}

impl TryFrom<i64> for Resolution {
    type Error = SurfvizError;

    fn try_from(segments: i64) -> Result<Self> {
        Self::new(segments)
    }
}

impl From<Resolution> for i64 {
    fn from(r: Resolution) -> i64 {
        r.segments as i64
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.segments, self.segments)
    }
}

/// One evaluated lattice point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub i: usize,
    pub j: usize,
    pub position: Point3,
    pub uv: Point2,
}

/// Evaluate `equation` on every lattice point, in vertex-index order.
///
/// Fails on the first non-finite coordinate with its grid index.
pub fn sample_grid<E>(equation: &E, resolution: Resolution) -> Result<Vec<SamplePoint>>
where
    E: ParametricEquation + ?Sized,
{
    let count = resolution.vertices_per_axis();
    let mut samples = Vec::with_capacity(resolution.vertex_count());

    for i in 0..count {
        let u = resolution.parameter(i);
        for j in 0..count {
            let v = resolution.parameter(j);
            let position = equation.evaluate(u, v);
            if !position.is_finite() {
                return Err(SurfvizError::NonFiniteVertex { i, j, u, v });
            }
            samples.push(SamplePoint {
                i,
                j,
                position,
                uv: Point2::new(u, v),
            });
        }
    }

    Ok(samples)
}

/// Triangle indices for the lattice, two triangles per cell.
///
/// Cell `(i, j)` with corners `a = (i, j)`, `b = (i, j+1)`, `c = (i+1, j)` and
/// `d = (i+1, j+1)` is split into `(a, b, c)` and `(b, d, c)`. Normal signs
/// depend on this winding.
pub fn grid_indices(resolution: Resolution) -> Vec<u32> {
    let segments = resolution.segments();
    let row = resolution.vertices_per_axis();
    let mut indices = Vec::with_capacity(resolution.triangle_count() * 3);

    for i in 0..segments {
        for j in 0..segments {
            let a = resolution.vertex_index(i, j) as u32;
            let b = a + 1;
            let c = a + row as u32;
            let d = c + 1;

            indices.extend_from_slice(&[a, b, c]);
            indices.extend_from_slice(&[b, d, c]);
        }
    }

    indices
}

/// Tessellate `equation` with `segments` subdivisions per axis.
///
/// Rejects `segments < 1` with [`SurfvizError::InvalidResolution`] before any
/// evaluation takes place.
pub fn tessellate<E>(equation: &E, segments: i64) -> Result<TriangleMesh>
where
    E: ParametricEquation + ?Sized,
{
    let resolution = Resolution::new(segments)?;
    tessellate_with(equation, resolution)
}

/// Tessellate `equation` at an already validated resolution.
pub fn tessellate_with<E>(equation: &E, resolution: Resolution) -> Result<TriangleMesh>
where
    E: ParametricEquation + ?Sized,
{
    let samples = sample_grid(equation, resolution)?;

    let mut mesh = TriangleMesh {
        positions: samples.iter().map(|s| s.position).collect(),
        normals: Vec::new(),
        indices: grid_indices(resolution),
        uvs: samples.iter().map(|s| s.uv).collect(),
    };
    mesh.compute_normals();

    debug!(
        %resolution,
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "tessellated surface"
    );
    Ok(mesh)
}
