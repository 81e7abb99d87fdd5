//! Torus.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use surfviz_math::{DVec3, Point3};

use crate::ParametricEquation;

/// A torus around the z axis.
///
/// `u` sweeps the major circle and `v` the tube, both over a full turn.
/// `major_radius` is the distance from the center to the tube center,
/// `minor_radius` the radius of the tube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Torus {
    pub fn new(major_radius: f64, minor_radius: f64) -> Self {
        Self {
            major_radius,
            minor_radius,
        }
    }
}

impl Default for Torus {
    fn default() -> Self {
        Self::new(2.0, 0.5)
    }
}

impl ParametricEquation for Torus {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let theta = u * TAU;
        let phi = v * TAU;
        let ring = self.major_radius + self.minor_radius * phi.cos();
        DVec3::new(
            ring * theta.cos(),
            ring * theta.sin(),
            self.minor_radius * phi.sin(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torus_equators() {
        let torus = Torus::new(3.0, 1.0);

        // At v=0 (outer equator), distance from center should be major + minor
        let p = torus.evaluate(0.0, 0.0);
        let dist_xy = (p.x * p.x + p.y * p.y).sqrt();
        assert!(
            (dist_xy - 4.0).abs() < 1e-10,
            "Outer equator distance: expected 4.0, got {}",
            dist_xy
        );

        // At v=0.5 (inner equator), distance from center should be major - minor
        let p = torus.evaluate(0.0, 0.5);
        let dist_xy = (p.x * p.x + p.y * p.y).sqrt();
        assert!(
            (dist_xy - 2.0).abs() < 1e-10,
            "Inner equator distance: expected 2.0, got {}",
            dist_xy
        );
    }

    #[test]
    fn test_torus_top() {
        let torus = Torus::default();
        let p = torus.evaluate(0.0, 0.25);
        approx::assert_abs_diff_eq!(p.truncate().length(), 2.0, epsilon = 1e-10);
        approx::assert_abs_diff_eq!(p.z, 0.5, epsilon = 1e-10);
    }

    #[test]
    fn test_torus_seam_points_coincide() {
        // u = 0 and u = 1 describe the same circle; the tessellator keeps both
        let torus = Torus::default();
        let a = torus.evaluate(0.0, 0.3);
        let b = torus.evaluate(1.0, 0.3);
        assert!((a - b).length() < 1e-12);
    }
}
