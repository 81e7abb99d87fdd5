pub mod animation;
pub mod material;
pub mod pipeline;
pub mod scene;
pub mod settings;
pub mod texture;
pub mod viewer;

// Re-export main types
pub use animation::Rotation;
pub use material::MaterialSettings;
pub use pipeline::{draw_passes, prepare_mesh, DrawPass, FrameUniforms, GpuVertex, PassDescriptor, RenderMesh};
pub use scene::{Scene, SceneMesh};
pub use settings::ViewerSettings;
pub use texture::GridTexture;
pub use viewer::{Frame, Viewer};
