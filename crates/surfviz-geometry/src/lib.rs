//! Surfviz geometry: parametric equations, built-in surfaces, and the surface registry.

pub mod equation;
pub mod registry;
pub mod surface;

pub use equation::ParametricEquation;
pub use registry::{SurfaceEntry, SurfaceRegistry};
pub use surface::{Droplet, KleinBottle, Sphere, Torus};
