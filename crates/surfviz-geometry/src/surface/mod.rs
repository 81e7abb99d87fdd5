//! Closed-form surfaces shipped with the viewer.
//!
//! Every surface is an immutable value carrying its own constants. All of them
//! take `u, v` in `[0, 1]` and scale to angles internally.

mod droplet;
mod klein;
mod sphere;
mod torus;

pub use droplet::Droplet;
pub use klein::KleinBottle;
pub use sphere::Sphere;
pub use torus::Torus;
