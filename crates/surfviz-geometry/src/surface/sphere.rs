//! Sphere.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use surfviz_math::{DVec3, Point3};

use crate::ParametricEquation;

/// A sphere centered at the origin with poles on the z axis.
///
/// `P = radius · (sinφ·cosθ, sinφ·sinθ, cosφ)` with `θ = 2πu`, `φ = πv`,
/// so `v = 0` is the north pole `(0, 0, r)` and `v = 1` the south pole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub radius: f64,
}

impl Sphere {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ParametricEquation for Sphere {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let theta = u * TAU;
        let phi = v * PI;
        self.radius * DVec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_points_on_sphere() {
        let sphere = Sphere::new(3.0);
        for i in 0..8 {
            for j in 0..8 {
                let p = sphere.evaluate(i as f64 / 8.0, j as f64 / 8.0);
                assert!(
                    (p.length() - 3.0).abs() < 1e-10,
                    "Point not on sphere: dist={}",
                    p.length()
                );
            }
        }
    }

    #[test]
    fn test_sphere_poles() {
        let sphere = Sphere::default();
        assert_eq!(sphere.evaluate(0.0, 0.0), DVec3::new(0.0, 0.0, 1.0));
        let south = sphere.evaluate(1.0, 1.0);
        assert!((south - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }
}
