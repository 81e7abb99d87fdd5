//! Droplet surface.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};
use surfviz_math::{DVec3, Point3};

use crate::ParametricEquation;

/// A sphere whose upper half is stretched into a drop.
///
/// With `θ = 2πu` and `φ = πv`:
/// `P = (a·sinφ·cosθ, a·sinφ·sinθ, a·cosφ·(1 + sinφ))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    pub a: f64,
}

impl Droplet {
    pub fn new(a: f64) -> Self {
        Self { a }
    }
}

impl Default for Droplet {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl ParametricEquation for Droplet {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let theta = u * TAU;
        let phi = v * PI;
        DVec3::new(
            self.a * phi.sin() * theta.cos(),
            self.a * phi.sin() * theta.sin(),
            self.a * phi.cos() * (1.0 + phi.sin()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_droplet_poles() {
        let drop = Droplet::default();
        let top = drop.evaluate(0.3, 0.0);
        let bottom = drop.evaluate(0.3, 1.0);
        assert!((top - DVec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
        assert!((bottom - DVec3::new(0.0, 0.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_droplet_equator() {
        let drop = Droplet::new(2.0);
        // At phi = PI/2 the point lies on the circle of radius a in the z = 0 plane
        let p = drop.evaluate(0.125, 0.5);
        let dist_xy = (p.x * p.x + p.y * p.y).sqrt();
        assert!((dist_xy - 2.0).abs() < 1e-12);
        assert!(p.z.abs() < 1e-12);
    }
}
