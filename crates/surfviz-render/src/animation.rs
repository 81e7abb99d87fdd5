//! Continuous rotation of the displayed surface.

use std::f64::consts::TAU;

use surfviz_math::Transform;

/// Rotation about +Y, advanced by elapsed time.
///
/// The angle only feeds the model transform; mesh vertices are never touched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    angle: f64,
    /// Revolutions per second
    speed: f64,
    enabled: bool,
}

impl Rotation {
    pub fn new(speed: f64, enabled: bool) -> Self {
        Self {
            angle: 0.0,
            speed,
            enabled,
        }
    }

    /// Advance by `dt` seconds: `angle += speed * 2π * dt`, wrapped to `[0, 2π)`.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.angle = (self.angle + self.effective_speed() * TAU * dt).rem_euclid(TAU);
        self.angle
    }

    /// Speed actually applied; zero while rotation is switched off.
    pub fn effective_speed(&self) -> f64 {
        if self.enabled {
            self.speed
        } else {
            0.0
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn transform(&self) -> Transform {
        Transform::from_rotation_y(self.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_advance() {
        let mut rotation = Rotation::new(0.1, true);
        rotation.advance(1.0);
        assert_abs_diff_eq!(rotation.angle(), 0.2 * PI, epsilon = 1e-12);
        rotation.advance(0.5);
        assert_abs_diff_eq!(rotation.angle(), 0.3 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_disabled_rotation_holds_angle() {
        let mut rotation = Rotation::new(0.25, true);
        rotation.advance(1.0);
        rotation.set_enabled(false);
        let before = rotation.angle();
        rotation.advance(10.0);
        assert_eq!(rotation.angle(), before);
        assert_eq!(rotation.effective_speed(), 0.0);
    }

    #[test]
    fn test_angle_wraps() {
        let mut rotation = Rotation::new(0.5, true);
        // 3 seconds at half a turn per second is 1.5 turns
        rotation.advance(3.0);
        assert_abs_diff_eq!(rotation.angle(), PI, epsilon = 1e-9);
        assert!(rotation.angle() < TAU);
    }

    #[test]
    fn test_transform_matches_angle() {
        let mut rotation = Rotation::new(0.25, true);
        rotation.advance(1.0); // quarter turn
        let p = rotation.transform().transform_point(surfviz_math::DVec3::X);
        assert!((p - surfviz_math::DVec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
    }
}
