//! The parametric equation capability consumed by the tessellator.

use surfviz_math::Point3;

/// A surface given as a map from the unit square to 3D space.
///
/// `evaluate` must be pure: the same `(u, v)` always yields the same point.
/// Both parameters are normalized to `[0, 1]`; any angular scaling belongs to
/// the implementation.
pub trait ParametricEquation: Send + Sync {
    /// Evaluate the surface at parameters `(u, v)`.
    fn evaluate(&self, u: f64, v: f64) -> Point3;
}

impl<F> ParametricEquation for F
where
    F: Fn(f64, f64) -> Point3 + Send + Sync,
{
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        self(u, v)
    }
}
