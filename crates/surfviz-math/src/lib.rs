pub mod aabb;
pub mod color;
pub mod transform;

pub use glam::{DMat4, DVec2, DVec3};
pub use aabb::Aabb3;
pub use color::{parse_hex_color, to_hex_color, Rgb};
pub use transform::Transform;

pub type Point2 = DVec2;
pub type Point3 = DVec3;
pub type Vector3 = DVec3;
