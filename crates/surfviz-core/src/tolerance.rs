/// Numeric tolerances used when building and checking meshes.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Accumulated normals shorter than this are degenerate and get a borrowed normal.
    pub degenerate: f64,
    /// Allowed deviation of a normal's length from 1.
    pub unit_length: f64,
    /// Vertices closer than this are samples of the same surface point.
    pub coincident: f64,
}

impl Tolerance {
    pub const DEFAULT_DEGENERATE: f64 = 1e-12;
    pub const DEFAULT_UNIT_LENGTH: f64 = 1e-5;
    pub const DEFAULT_COINCIDENT: f64 = 1e-9;

    pub fn new(degenerate: f64, unit_length: f64, coincident: f64) -> Self {
        Self {
            degenerate,
            unit_length,
            coincident,
        }
    }

    /// Check if a vector length is close enough to 1
    pub fn is_unit(self, length: f64) -> bool {
        (length - 1.0).abs() <= self.unit_length
    }

    /// Check if a length is too small to normalize
    pub fn is_degenerate(self, length: f64) -> bool {
        length <= self.degenerate
    }

    /// Check if two points `distance` apart count as the same point
    pub fn is_coincident(self, distance: f64) -> bool {
        distance <= self.coincident
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DEGENERATE,
            Self::DEFAULT_UNIT_LENGTH,
            Self::DEFAULT_COINCIDENT,
        )
    }
}
