//! Standalone scene export: a self-contained three.js page and glTF 2.0 JSON.

use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::json;
use surfviz_core::{Result, SurfvizError};
use surfviz_math::{to_hex_color, Aabb3, DVec3, Point3};
use surfviz_mesh::TriangleMesh;
use tracing::info;

use crate::{MaterialSettings, ViewerSettings};

/// Space left between neighbouring surfaces when several are laid out.
const LAYOUT_GAP: f64 = 1.0;

/// A named mesh in the scene
#[derive(Debug, Clone)]
pub struct SceneMesh {
    pub name: String,
    pub mesh: TriangleMesh,
    pub material: MaterialSettings,
}

/// A set of surfaces to export, sharing animation and texture settings.
#[derive(Debug, Clone)]
pub struct Scene {
    pub meshes: Vec<SceneMesh>,
    /// Revolutions per second; zero disables the spin in the exported page
    pub rotation_speed: f64,
    pub texture_repeat: u32,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::from_settings(&ViewerSettings::default())
    }

    pub fn from_settings(settings: &ViewerSettings) -> Self {
        Self {
            meshes: Vec::new(),
            rotation_speed: if settings.rotating {
                settings.rotation_speed
            } else {
                0.0
            },
            texture_repeat: settings.texture_repeat,
        }
    }

    pub fn add_mesh(&mut self, name: &str, mesh: TriangleMesh, material: MaterialSettings) {
        self.meshes.push(SceneMesh {
            name: name.to_string(),
            mesh,
            material,
        });
    }

    /// Per-mesh translations placing the surfaces side by side along X,
    /// the whole row centered on the origin.
    pub fn layout_offsets(&self) -> Vec<DVec3> {
        let mut cursor = 0.0;
        let mut offsets: Vec<DVec3> = self
            .meshes
            .iter()
            .map(|m| {
                let bb = m.mesh.bounding_box();
                let c = bb.center();
                let r = bb.bounding_radius();
                let offset = DVec3::new(cursor + r - c.x, -c.y, -c.z);
                cursor += 2.0 * r + LAYOUT_GAP;
                offset
            })
            .collect();

        let width = (cursor - LAYOUT_GAP).max(0.0);
        for offset in &mut offsets {
            offset.x -= width * 0.5;
        }
        offsets
    }

    /// Bounding box of the laid-out scene.
    pub fn bounds(&self) -> Option<Aabb3> {
        self.meshes
            .iter()
            .zip(self.layout_offsets())
            .filter_map(|(m, offset)| {
                let bb = Aabb3::from_points(&m.mesh.positions)?;
                Some(Aabb3::new(bb.min + offset, bb.max + offset))
            })
            .reduce(|a, b| a.merge(&b))
    }

    /// Total triangle count across all meshes
    pub fn total_triangles(&self) -> usize {
        self.meshes.iter().map(|m| m.mesh.triangle_count()).sum()
    }

    /// Export scene as a standalone HTML file with embedded Three.js viewer
    pub fn export_html(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_html()?)?;
        info!(path = %path.display(), meshes = self.meshes.len(), "exported html viewer");
        Ok(())
    }

    pub fn to_html(&self) -> Result<String> {
        let bounds = self
            .bounds()
            .unwrap_or_else(|| Aabb3::new(Point3::splat(-1.0), Point3::splat(1.0)));
        let center = bounds.center();
        let camera_distance = (bounds.extents().length() * 1.2).max(3.0);

        let payload: Vec<HtmlMesh<'_>> = self
            .meshes
            .iter()
            .zip(self.layout_offsets())
            .map(|(m, offset)| HtmlMesh::new(m, offset))
            .collect();
        let mesh_json = serde_json::to_string(&payload)
            .map_err(|e| SurfvizError::Serialization(e.to_string()))?
            // Keep names from closing the script element
            .replace("</", "<\\/");

        let mut mesh_list = String::new();
        for m in &self.meshes {
            mesh_list.push_str(&format!(
                r#"        <div class="mesh-item">
            <div class="mesh-name">{}</div>
            <div class="mesh-stats">{} triangles</div>
        </div>
"#,
                escape_html(&m.name),
                m.mesh.triangle_count()
            ));
        }

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Surfviz Parametric Surfaces</title>
    <style>
        body {{
            margin: 0;
            overflow: hidden;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: #f0f0f0;
        }}
        #container {{
            width: 100vw;
            height: 100vh;
        }}
        #info {{
            position: absolute;
            top: 10px;
            left: 10px;
            background: rgba(255, 255, 255, 0.85);
            color: #222;
            padding: 15px;
            border-radius: 5px;
            font-size: 14px;
            max-width: 300px;
        }}
        #info h3 {{
            margin: 0 0 10px 0;
            font-size: 16px;
            border-bottom: 1px solid #ccc;
            padding-bottom: 5px;
        }}
        #info .mesh-item {{
            margin: 5px 0;
            padding: 5px;
            background: rgba(0, 0, 0, 0.05);
            border-radius: 3px;
        }}
        #info .mesh-name {{
            font-weight: bold;
        }}
        #info .mesh-stats {{
            font-size: 12px;
            color: #666;
        }}
        #error {{
            position: absolute;
            top: 50%;
            left: 50%;
            transform: translate(-50%, -50%);
            background: rgba(200, 0, 0, 0.9);
            color: white;
            padding: 20px;
            border-radius: 5px;
            display: none;
        }}
    </style>
</head>
<body>
    <div id="container"></div>
    <div id="info">
        <h3>Parametric Surfaces</h3>
        <div>Surfaces: {mesh_count}</div>
        <div>Triangles: {triangle_count}</div>
        <hr style="border: 1px solid #ccc; margin: 10px 0;">
{mesh_list}    </div>
    <div id="error">Failed to load Three.js from CDN. Please check your internet connection.</div>

    <script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
    <script>
        if (typeof THREE === 'undefined') document.getElementById('error').style.display = 'block';

        const meshData = {mesh_json};
        const rotationSpeed = {rotation_speed};

        function gridTexture() {{
            const canvas = document.createElement('canvas');
            canvas.width = {tex_size};
            canvas.height = {tex_size};
            const ctx = canvas.getContext('2d');
            ctx.fillStyle = '#ffffff';
            ctx.fillRect(0, 0, canvas.width, canvas.height);
            ctx.strokeStyle = '#e0e0e0';
            ctx.lineWidth = {tex_line};
            for (let i = 0; i <= canvas.width; i += {tex_cell}) {{
                ctx.beginPath();
                ctx.moveTo(i, 0);
                ctx.lineTo(i, canvas.height);
                ctx.stroke();
                ctx.beginPath();
                ctx.moveTo(0, i);
                ctx.lineTo(canvas.width, i);
                ctx.stroke();
            }}
            const texture = new THREE.CanvasTexture(canvas);
            texture.wrapS = THREE.RepeatWrapping;
            texture.wrapT = THREE.RepeatWrapping;
            texture.repeat.set({repeat}, {repeat});
            return texture;
        }}

        function initScene() {{
            const scene = new THREE.Scene();
            scene.background = new THREE.Color(0xf0f0f0);

            const camera = new THREE.PerspectiveCamera(50, window.innerWidth / window.innerHeight, 0.1, 1000);
            const renderer = new THREE.WebGLRenderer({{ antialias: true }});
            renderer.setSize(window.innerWidth, window.innerHeight);
            document.getElementById('container').appendChild(renderer.domElement);

            scene.add(new THREE.AmbientLight(0xffffff, 0.5));
            const dirLight = new THREE.DirectionalLight(0xffffff, 1);
            dirLight.position.set(10, 10, 5);
            scene.add(dirLight);
            const pointLight = new THREE.PointLight(0xffffff, 0.5);
            pointLight.position.set(-10, -10, -10);
            scene.add(pointLight);

            const texture = gridTexture();
            const groups = [];

            meshData.forEach(data => {{
                const geometry = new THREE.BufferGeometry();
                geometry.setAttribute('position', new THREE.Float32BufferAttribute(data.positions, 3));
                geometry.setAttribute('normal', new THREE.Float32BufferAttribute(data.normals, 3));
                geometry.setAttribute('uv', new THREE.Float32BufferAttribute(data.uvs, 2));
                geometry.setIndex(data.indices);

                const group = new THREE.Group();
                group.position.set(data.offset[0], data.offset[1], data.offset[2]);

                const material = new THREE.MeshStandardMaterial({{
                    color: new THREE.Color(data.color),
                    metalness: data.metalness,
                    roughness: data.roughness,
                    map: texture,
                    side: THREE.DoubleSide,
                    transparent: true,
                    opacity: data.opacity
                }});
                group.add(new THREE.Mesh(geometry, material));

                if (data.wireframe) {{
                    const wire = new THREE.MeshBasicMaterial({{
                        color: new THREE.Color(data.wireframeColor),
                        wireframe: true,
                        transparent: true,
                        opacity: data.wireframeOpacity
                    }});
                    group.add(new THREE.Mesh(geometry, wire));
                }}

                scene.add(group);
                groups.push(group);
            }});

            const center = new THREE.Vector3({cx:.3}, {cy:.3}, {cz:.3});
            const distance = {distance:.3};
            let theta = Math.PI / 4;
            let phi = Math.PI / 3;
            let radius = distance;

            function updateCameraPosition() {{
                camera.position.x = center.x + radius * Math.sin(phi) * Math.cos(theta);
                camera.position.y = center.y + radius * Math.cos(phi);
                camera.position.z = center.z + radius * Math.sin(phi) * Math.sin(theta);
                camera.lookAt(center);
            }}
            updateCameraPosition();

            let isDragging = false;
            let previousMousePosition = {{ x: 0, y: 0 }};

            renderer.domElement.addEventListener('mousedown', (e) => {{
                isDragging = true;
                previousMousePosition = {{ x: e.clientX, y: e.clientY }};
            }});

            renderer.domElement.addEventListener('mousemove', (e) => {{
                if (isDragging) {{
                    theta -= (e.clientX - previousMousePosition.x) * 0.01;
                    phi = Math.max(0.1, Math.min(Math.PI - 0.1, phi + (e.clientY - previousMousePosition.y) * 0.01));
                    previousMousePosition = {{ x: e.clientX, y: e.clientY }};
                    updateCameraPosition();
                }}
            }});

            renderer.domElement.addEventListener('mouseup', () => {{
                isDragging = false;
            }});

            renderer.domElement.addEventListener('wheel', (e) => {{
                e.preventDefault();
                radius = Math.max(1, radius + e.deltaY * 0.01);
                updateCameraPosition();
            }});

            window.addEventListener('resize', () => {{
                camera.aspect = window.innerWidth / window.innerHeight;
                camera.updateProjectionMatrix();
                renderer.setSize(window.innerWidth, window.innerHeight);
            }});

            const clock = new THREE.Clock();
            function animate() {{
                requestAnimationFrame(animate);
                const dt = clock.getDelta();
                groups.forEach(group => {{
                    group.rotation.y += rotationSpeed * 2 * Math.PI * dt;
                }});
                renderer.render(scene, camera);
            }}
            animate();
        }}

        if (typeof THREE !== 'undefined') initScene();
    </script>
</body>
</html>
"#,
            mesh_count = self.meshes.len(),
            triangle_count = self.total_triangles(),
            mesh_list = mesh_list,
            mesh_json = mesh_json,
            rotation_speed = self.rotation_speed,
            tex_size = crate::GridTexture::SIZE,
            tex_line = crate::GridTexture::LINE_WIDTH,
            tex_cell = crate::GridTexture::CELL,
            repeat = self.texture_repeat,
            cx = center.x,
            cy = center.y,
            cz = center.z,
            distance = camera_distance,
        ))
    }

    /// Export the scene as glTF 2.0 JSON with an embedded base64 buffer.
    ///
    /// Each surface becomes one node, translated to its layout offset, with
    /// POSITION, NORMAL and TEXCOORD_0 attributes and a metallic-roughness
    /// material.
    pub fn export_gltf_json(&self) -> Result<String> {
        let mut buffer: Vec<u8> = Vec::new();
        let mut nodes = Vec::new();
        let mut meshes = Vec::new();
        let mut materials = Vec::new();
        let mut accessors = Vec::new();
        let mut buffer_views = Vec::new();

        for (i, (scene_mesh, offset)) in self.meshes.iter().zip(self.layout_offsets()).enumerate() {
            let mesh = &scene_mesh.mesh;
            let positions: Vec<[f32; 3]> =
                mesh.positions.iter().map(|p| p.as_vec3().to_array()).collect();
            let normals: Vec<[f32; 3]> =
                mesh.normals.iter().map(|n| n.as_vec3().to_array()).collect();
            let uvs: Vec<[f32; 2]> = mesh.uvs.iter().map(|uv| uv.as_vec2().to_array()).collect();

            let (min, max) = f32_bounds(&positions);
            let base = accessors.len();

            let views: [(&[u8], u32); 4] = [
                (bytemuck::cast_slice(&positions), GL_ARRAY_BUFFER),
                (bytemuck::cast_slice(&normals), GL_ARRAY_BUFFER),
                (bytemuck::cast_slice(&uvs), GL_ARRAY_BUFFER),
                (bytemuck::cast_slice(&mesh.indices), GL_ELEMENT_ARRAY_BUFFER),
            ];
            for (bytes, target) in views {
                buffer_views.push(json!({
                    "buffer": 0,
                    "byteOffset": buffer.len(),
                    "byteLength": bytes.len(),
                    "target": target,
                }));
                buffer.extend_from_slice(bytes);
            }

            accessors.push(json!({
                "bufferView": base,
                "componentType": GL_FLOAT,
                "count": positions.len(),
                "type": "VEC3",
                "min": min,
                "max": max,
            }));
            accessors.push(json!({
                "bufferView": base + 1,
                "componentType": GL_FLOAT,
                "count": normals.len(),
                "type": "VEC3",
            }));
            accessors.push(json!({
                "bufferView": base + 2,
                "componentType": GL_FLOAT,
                "count": uvs.len(),
                "type": "VEC2",
            }));
            accessors.push(json!({
                "bufferView": base + 3,
                "componentType": GL_UNSIGNED_INT,
                "count": mesh.indices.len(),
                "type": "SCALAR",
            }));

            let m = &scene_mesh.material;
            let [r, g, b] = m.color;
            materials.push(json!({
                "name": format!("{}_Material", scene_mesh.name),
                "pbrMetallicRoughness": {
                    "baseColorFactor": [r, g, b, m.opacity],
                    "metallicFactor": m.metalness,
                    "roughnessFactor": m.roughness,
                },
                "alphaMode": "BLEND",
                "doubleSided": true,
            }));

            meshes.push(json!({
                "name": scene_mesh.name,
                "primitives": [{
                    "attributes": {
                        "POSITION": base,
                        "NORMAL": base + 1,
                        "TEXCOORD_0": base + 2,
                    },
                    "indices": base + 3,
                    "material": i,
                }],
            }));

            nodes.push(json!({
                "name": scene_mesh.name,
                "mesh": i,
                "translation": offset.to_array(),
            }));
        }

        let node_indices: Vec<usize> = (0..nodes.len()).collect();
        let mut doc = json!({
            "asset": { "version": "2.0", "generator": "surfviz" },
            "scene": 0,
            "scenes": [{ "nodes": node_indices }],
            "nodes": nodes,
            "meshes": meshes,
            "materials": materials,
            "accessors": accessors,
            "bufferViews": buffer_views,
        });
        if !buffer.is_empty() {
            doc["buffers"] = json!([{
                "byteLength": buffer.len(),
                "uri": format!("data:application/octet-stream;base64,{}", STANDARD.encode(&buffer)),
            }]);
        }

        serde_json::to_string_pretty(&doc).map_err(|e| SurfvizError::Serialization(e.to_string()))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

const GL_FLOAT: u32 = 5126;
const GL_UNSIGNED_INT: u32 = 5125;
const GL_ARRAY_BUFFER: u32 = 34962;
const GL_ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Mesh data as embedded in the HTML page.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HtmlMesh<'a> {
    name: &'a str,
    color: String,
    metalness: f32,
    roughness: f32,
    opacity: f32,
    wireframe: bool,
    wireframe_color: String,
    wireframe_opacity: f32,
    offset: [f64; 3],
    positions: Vec<f32>,
    normals: Vec<f32>,
    uvs: Vec<f32>,
    indices: &'a [u32],
}

impl<'a> HtmlMesh<'a> {
    fn new(scene_mesh: &'a SceneMesh, offset: DVec3) -> Self {
        let mesh = &scene_mesh.mesh;
        let m = &scene_mesh.material;
        Self {
            name: &scene_mesh.name,
            color: to_hex_color(m.color),
            metalness: m.metalness,
            roughness: m.roughness,
            opacity: m.opacity,
            wireframe: m.wireframe,
            wireframe_color: to_hex_color(m.wireframe_color),
            wireframe_opacity: m.wireframe_opacity,
            offset: offset.to_array(),
            positions: mesh.positions.iter().flat_map(|p| p.as_vec3().to_array()).collect(),
            normals: mesh.normals.iter().flat_map(|n| n.as_vec3().to_array()).collect(),
            uvs: mesh.uvs.iter().flat_map(|uv| uv.as_vec2().to_array()).collect(),
            indices: &mesh.indices,
        }
    }
}

fn f32_bounds(points: &[[f32; 3]]) -> ([f32; 3], [f32; 3]) {
    let Some((first, rest)) = points.split_first() else {
        return ([0.0; 3], [0.0; 3]);
    };
    rest.iter().fold((*first, *first), |(mut min, mut max), p| {
        for k in 0..3 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
        (min, max)
    })
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfviz_geometry::surface::{Sphere, Torus};
    use surfviz_mesh::tessellate;

    fn scene_with(names: &[&str]) -> Scene {
        let mut scene = Scene::new();
        for name in names {
            let mesh = tessellate(&Sphere::default(), 4).unwrap();
            scene.add_mesh(name, mesh, MaterialSettings::default());
        }
        scene
    }

    #[test]
    fn test_total_triangles() {
        let scene = scene_with(&["a", "b"]);
        assert_eq!(scene.total_triangles(), 64);
    }

    #[test]
    fn test_single_mesh_is_centered() {
        let mut scene = Scene::new();
        scene.add_mesh("torus", tessellate(&Torus::default(), 8).unwrap(), MaterialSettings::default());
        let bounds = scene.bounds().unwrap();
        assert!(bounds.center().length() < 1e-9, "{:?}", bounds.center());
    }

    #[test]
    fn test_layout_does_not_overlap() {
        let scene = scene_with(&["a", "b", "c"]);
        let offsets = scene.layout_offsets();
        assert_eq!(offsets.len(), 3);
        let boxes: Vec<_> = scene
            .meshes
            .iter()
            .zip(&offsets)
            .map(|(m, o)| {
                let bb = m.mesh.bounding_box();
                (bb.min.x + o.x, bb.max.x + o.x)
            })
            .collect();
        for pair in boxes.windows(2) {
            assert!(pair[0].1 < pair[1].0, "{:?}", pair);
        }
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new();
        assert!(scene.bounds().is_none());
        assert!(scene.layout_offsets().is_empty());
        let gltf: serde_json::Value = serde_json::from_str(&scene.export_gltf_json().unwrap()).unwrap();
        assert!(gltf.get("buffers").is_none());
        assert!(scene.to_html().unwrap().contains("const meshData = []"));
    }

    #[test]
    fn test_html_contents() {
        let mut scene = scene_with(&["Sphere </script>"]);
        scene.texture_repeat = 4;
        let html = scene.to_html().unwrap();
        assert!(html.contains("MeshStandardMaterial"));
        assert!(html.contains("texture.repeat.set(4, 4)"));
        assert!(html.contains("side: THREE.DoubleSide"));
        assert!(html.contains("rotationSpeed * 2 * Math.PI * dt"));
        assert!(html.contains("Sphere &lt;/script&gt;"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_rotation_disabled_in_settings() {
        let settings = ViewerSettings {
            rotating: false,
            ..ViewerSettings::default()
        };
        let scene = Scene::from_settings(&settings);
        assert_eq!(scene.rotation_speed, 0.0);
        assert_eq!(Scene::new().rotation_speed, 0.1);
    }

    #[test]
    fn test_gltf_structure() {
        let scene = scene_with(&["a", "b"]);
        let gltf: serde_json::Value = serde_json::from_str(&scene.export_gltf_json().unwrap()).unwrap();

        assert_eq!(gltf["asset"]["version"], "2.0");
        assert_eq!(gltf["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(gltf["accessors"].as_array().unwrap().len(), 8);
        assert_eq!(gltf["bufferViews"].as_array().unwrap().len(), 8);

        let prim = &gltf["meshes"][1]["primitives"][0];
        assert_eq!(prim["attributes"]["TEXCOORD_0"], 6);
        assert_eq!(prim["indices"], 7);
        assert_eq!(gltf["accessors"][7]["count"], 96);
        assert_eq!(gltf["accessors"][2]["type"], "VEC2");

        // 25 vertices * (12 + 12 + 8) bytes + 96 indices * 4 bytes, per mesh
        let expected = 2 * (25 * 32 + 96 * 4);
        assert_eq!(gltf["buffers"][0]["byteLength"], expected);
        let uri = gltf["buffers"][0]["uri"].as_str().unwrap();
        let encoded = uri.strip_prefix("data:application/octet-stream;base64,").unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap().len(), expected);
    }

    #[test]
    fn test_export_html_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.html");
        scene_with(&["a"]).export_html(&path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
    }
}
