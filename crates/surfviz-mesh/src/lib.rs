pub mod batch;
pub mod cache;
pub mod grid;
pub mod triangle_mesh;

pub use batch::tessellate_all;
pub use cache::{CacheKey, MeshCache};
pub use grid::{grid_indices, sample_grid, tessellate, tessellate_with, Resolution, SamplePoint};
pub use triangle_mesh::TriangleMesh;
