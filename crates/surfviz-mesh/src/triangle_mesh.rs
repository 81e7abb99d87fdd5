use std::collections::HashSet;

use surfviz_core::{Result, SurfvizError, Tolerance, Validate};
use surfviz_math::{Aabb3, Point2, Point3, Vector3};

/// Indexed triangle mesh with per-vertex normals and texture coordinates.
///
/// `positions`, `normals` and `uvs` are parallel arrays; `indices` holds
/// three vertex indices per triangle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<Point2>,
}

impl TriangleMesh {
    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Recompute smooth vertex normals from the triangle list.
    ///
    /// Each face contributes its unnormalized cross product to its three
    /// vertices, so larger faces weigh more. A vertex whose accumulated normal
    /// is degenerate (all its faces have zero area, as on a pole row) takes
    /// the mean normal of the vertices sitting at the same position, or else
    /// of its edge neighbours. Only if neither has a normal does it keep a
    /// zero vector.
    pub fn compute_normals(&mut self) {
        let tolerance = Tolerance::default();
        let n = self.positions.len();
        self.normals.clear();
        self.normals.resize(n, Vector3::ZERO);

        for tri in self.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let p0 = self.positions[i0];
            let p1 = self.positions[i1];
            let p2 = self.positions[i2];
            let normal = (p1 - p0).cross(p2 - p0);
            self.normals[i0] += normal;
            self.normals[i1] += normal;
            self.normals[i2] += normal;
        }

        let mut unresolved = Vec::new();
        for (i, n) in self.normals.iter_mut().enumerate() {
            let len = n.length();
            if tolerance.is_degenerate(len) {
                *n = Vector3::ZERO;
                unresolved.push(i);
            } else {
                *n /= len;
            }
        }

        // Borrow only from normals resolved above, so the order of fixes is irrelevant
        let borrowed: Vec<(usize, Vector3)> = unresolved
            .into_iter()
            .filter_map(|i| self.borrowed_normal(i, tolerance).map(|n| (i, n)))
            .collect();
        for (i, n) in borrowed {
            self.normals[i] = n;
        }
    }

    fn borrowed_normal(&self, vertex: usize, tolerance: Tolerance) -> Option<Vector3> {
        let resolved = |n: &Vector3| !tolerance.is_degenerate(n.length());
        let p = self.positions[vertex];

        let coincident = self
            .positions
            .iter()
            .zip(&self.normals)
            .filter(|&(q, n)| tolerance.is_coincident(p.distance(*q)) && resolved(n))
            .fold(Vector3::ZERO, |acc, (_, n)| acc + *n);
        if resolved(&coincident) {
            return Some(coincident.normalize());
        }

        let v = vertex as u32;
        let ring = self
            .triangles()
            .filter(|t| t.contains(&v))
            .flatten()
            .filter(|&k| k != v)
            .map(|k| self.normals[k as usize])
            .filter(resolved)
            .fold(Vector3::ZERO, |acc, n| acc + n);
        if resolved(&ring) {
            return Some(ring.normalize());
        }
        None
    }

    /// Unique undirected edges, in order of first appearance.
    ///
    /// This is the line list the wireframe overlay draws.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut edges = Vec::with_capacity(self.indices.len());
        for [a, b, c] in self.triangles() {
            for (x, y) in [(a, b), (b, c), (c, a)] {
                let key = (x.min(y), x.max(y));
                if seen.insert(key) {
                    edges.push([key.0, key.1]);
                }
            }
        }
        edges
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(&self.positions).unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

impl Validate for TriangleMesh {
    fn validate(&self) -> Result<()> {
        let n = self.positions.len();
        if self.normals.len() != n || self.uvs.len() != n {
            return Err(SurfvizError::InvalidMesh(format!(
                "attribute lengths differ: {} positions, {} normals, {} uvs",
                n,
                self.normals.len(),
                self.uvs.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(SurfvizError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some((pos, &idx)) = self
            .indices
            .iter()
            .enumerate()
            .find(|&(_, &idx)| idx as usize >= n)
        {
            return Err(SurfvizError::InvalidMesh(format!(
                "index {} at position {} out of range (vertex count {})",
                idx, pos, n
            )));
        }

        let tolerance = Tolerance::default();
        for (i, normal) in self.normals.iter().enumerate() {
            let len = normal.length();
            if !tolerance.is_unit(len) && !tolerance.is_degenerate(len) {
                return Err(SurfvizError::InvalidMesh(format!(
                    "normal {} has length {}",
                    i, len
                )));
            }
        }
        Ok(())
    }
}
