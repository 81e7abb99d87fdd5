//! Klein bottle (figure-eight immersion).

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use surfviz_math::{DVec3, Point3};

use crate::ParametricEquation;

/// Figure-eight Klein bottle.
///
/// With `θ = 2πu`, `φ = 2πv` and
/// `w = radius + cos(φ/2)·sinθ − sin(φ/2)·sin2θ`:
/// `P = (cosθ·w, sinθ·w, sin(φ/2)·sinθ + cos(φ/2)·sin2θ)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KleinBottle {
    pub radius: f64,
}

impl KleinBottle {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Default for KleinBottle {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl ParametricEquation for KleinBottle {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let theta = u * TAU;
        let half_phi = v * TAU * 0.5;
        let (sin_t, cos_t) = theta.sin_cos();
        let sin_2t = (2.0 * theta).sin();
        let (sin_h, cos_h) = half_phi.sin_cos();

        let w = self.radius + cos_h * sin_t - sin_h * sin_2t;
        DVec3::new(cos_t * w, sin_t * w, sin_h * sin_t + cos_h * sin_2t)
    }
}
