use bytemuck::{Pod, Zeroable};
use surfviz_math::{Point2, Point3, Transform, Vector3};
use surfviz_mesh::TriangleMesh;

use crate::MaterialSettings;

/// Vertex with f32 data packed for GPU.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl GpuVertex {
    /// Create a GPU vertex from mesh vertex data.
    pub fn from_mesh_vertex(pos: Point3, normal: Vector3, uv: Point2) -> Self {
        Self {
            position: pos.as_vec3().to_array(),
            normal: normal.as_vec3().to_array(),
            uv: uv.as_vec2().to_array(),
        }
    }
}

/// Prepared render data ready for GPU upload.
///
/// `indices` is the triangle list of the surface pass, `line_indices` the
/// edge list of the wireframe pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<GpuVertex>,
    pub indices: Vec<u32>,
    pub line_indices: Vec<u32>,
}

impl RenderMesh {
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn line_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.line_indices)
    }
}

/// Convert a TriangleMesh to GPU-ready buffers.
pub fn prepare_mesh(mesh: &TriangleMesh) -> RenderMesh {
    let vertices = mesh
        .positions
        .iter()
        .enumerate()
        .map(|(i, &pos)| {
            let normal = mesh.normals.get(i).copied().unwrap_or(Vector3::ZERO);
            let uv = mesh.uvs.get(i).copied().unwrap_or(Point2::ZERO);
            GpuVertex::from_mesh_vertex(pos, normal, uv)
        })
        .collect();

    RenderMesh {
        vertices,
        indices: mesh.indices.clone(),
        line_indices: mesh.edges().into_iter().flatten().collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawPass {
    /// Lit, textured, double-sided triangles
    Surface,
    /// Unlit line overlay
    Wireframe,
}

/// Per-pass uniform block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub model: [[f32; 4]; 4],
    /// RGB plus opacity
    pub base_color: [f32; 4],
    pub metalness: f32,
    pub roughness: f32,
    /// 1 when the grid texture is sampled
    pub textured: u32,
    pub _pad: u32,
}

impl FrameUniforms {
    pub fn new(pass: DrawPass, transform: &Transform, material: &MaterialSettings) -> Self {
        let model = transform.to_cols_f32();
        match pass {
            DrawPass::Surface => {
                let [r, g, b] = material.color;
                Self {
                    model,
                    base_color: [r, g, b, material.opacity],
                    metalness: material.metalness,
                    roughness: material.roughness,
                    textured: 1,
                    _pad: 0,
                }
            }
            DrawPass::Wireframe => {
                let [r, g, b] = material.wireframe_color;
                Self {
                    model,
                    base_color: [r, g, b, material.wireframe_opacity],
                    metalness: 0.0,
                    roughness: 1.0,
                    textured: 0,
                    _pad: 0,
                }
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// One draw call of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassDescriptor {
    pub pass: DrawPass,
    pub uniforms: FrameUniforms,
}

/// Passes to draw for `material`: the surface, then the wireframe when enabled.
pub fn draw_passes(material: &MaterialSettings, transform: &Transform) -> Vec<PassDescriptor> {
    let mut passes = vec![DrawPass::Surface];
    if material.wireframe {
        passes.push(DrawPass::Wireframe);
    }
    passes
        .into_iter()
        .map(|pass| PassDescriptor {
            pass,
            uniforms: FrameUniforms::new(pass, transform, material),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_mesh() -> TriangleMesh {
        TriangleMesh {
            positions: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(0.0, 0.0, 1.0),
                Vector3::new(0.0, 0.0, 1.0),
            ],
            indices: vec![0, 1, 2],
            uvs: vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(0.0, 1.0),
            ],
        }
    }

    #[test]
    fn test_gpu_vertex_size() {
        // 3 floats (position) + 3 floats (normal) + 2 floats (uv) = 8 floats = 32 bytes
        assert_eq!(std::mem::size_of::<GpuVertex>(), 32);
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 96);
    }

    #[test]
    fn test_prepare_mesh() {
        let render_mesh = prepare_mesh(&create_test_mesh());
        assert_eq!(render_mesh.vertices.len(), 3);
        assert_eq!(render_mesh.indices, vec![0, 1, 2]);
        assert_eq!(render_mesh.line_indices, vec![0, 1, 1, 2, 0, 2]);
    }

    #[test]
    fn test_buffer_byte_sizes() {
        let render_mesh = prepare_mesh(&create_test_mesh());
        // 3 vertices * 32 bytes each
        assert_eq!(render_mesh.vertex_bytes().len(), 3 * 32);
        // 3 indices * 4 bytes each
        assert_eq!(render_mesh.index_bytes().len(), 3 * 4);
        assert_eq!(render_mesh.line_index_bytes().len(), 6 * 4);
    }

    #[test]
    fn test_gpu_vertex_from_mesh_vertex() {
        let vertex = GpuVertex::from_mesh_vertex(
            Point3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 1.0, 0.0),
            Point2::new(0.5, 0.5),
        );
        assert_eq!(vertex.position, [1.0, 2.0, 3.0]);
        assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
        assert_eq!(vertex.uv, [0.5, 0.5]);
    }

    #[test]
    fn test_mesh_with_missing_data() {
        let mesh = TriangleMesh {
            positions: vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            normals: vec![],
            indices: vec![],
            uvs: vec![],
        };
        let render_mesh = prepare_mesh(&mesh);
        assert_eq!(render_mesh.vertices.len(), 2);
        assert_eq!(render_mesh.vertices[0].normal, [0.0, 0.0, 0.0]);
        assert_eq!(render_mesh.vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_draw_passes() {
        let mut material = MaterialSettings::default();
        let transform = Transform::identity();

        let passes = draw_passes(&material, &transform);
        assert_eq!(passes.len(), 2);
        assert_eq!(passes[0].pass, DrawPass::Surface);
        assert_eq!(passes[0].uniforms.base_color[3], 0.9);
        assert_eq!(passes[0].uniforms.textured, 1);
        assert_eq!(passes[1].pass, DrawPass::Wireframe);
        assert_eq!(passes[1].uniforms.base_color, [0.0, 0.0, 0.0, 0.1]);

        material.wireframe = false;
        let passes = draw_passes(&material, &transform);
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].uniforms.as_bytes().len(), 96);
    }
}
