//! Ordered registry of named surfaces.
//!
//! The registry is what the surface picker lists. Each entry pairs an
//! equation with its display name and fill color; only the equation matters to
//! the tessellator, the rest is presentation metadata.

use std::fmt;
use std::sync::Arc;

use surfviz_core::{EquationId, Result, SurfvizError};
use surfviz_math::{parse_hex_color, Rgb};
use tracing::debug;

use crate::surface::{Droplet, KleinBottle, Torus};
use crate::ParametricEquation;

/// A named surface with its render color.
#[derive(Clone)]
pub struct SurfaceEntry {
    pub id: EquationId,
    pub name: String,
    pub color: Rgb,
    pub equation: Arc<dyn ParametricEquation>,
}

impl fmt::Debug for SurfaceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceEntry")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    entries: Vec<SurfaceEntry>,
}

impl SurfaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Registry with the droplet, torus and Klein bottle, in picker order.
    pub fn builtin() -> Self {
        const BUILTIN_COLORS: [&str; 3] = ["#ADD8E6", "#44ff88", "#ff8844"];

        let mut registry = Self::new();
        let equations: [(&str, Arc<dyn ParametricEquation>); 3] = [
            ("Droplet", Arc::new(Droplet::default())),
            ("Torus", Arc::new(Torus::default())),
            ("Klein Bottle", Arc::new(KleinBottle::default())),
        ];
        for ((name, equation), hex) in equations.into_iter().zip(BUILTIN_COLORS) {
            // Constant colors always parse
            let color = parse_hex_color(hex).unwrap_or([1.0, 1.0, 1.0]);
            registry.register_arc(name, color, equation);
        }
        registry
    }

    /// Register an equation and return its fresh identity.
    pub fn register<E>(&mut self, name: &str, color: Rgb, equation: E) -> EquationId
    where
        E: ParametricEquation + 'static,
    {
        self.register_arc(name, color, Arc::new(equation))
    }

    pub fn register_arc(
        &mut self,
        name: &str,
        color: Rgb,
        equation: Arc<dyn ParametricEquation>,
    ) -> EquationId {
        let id = EquationId::new();
        debug!(%id, name, "registered surface");
        self.entries.push(SurfaceEntry {
            id,
            name: name.to_string(),
            color,
            equation,
        });
        id
    }

    pub fn get(&self, id: EquationId) -> Result<&SurfaceEntry> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| SurfvizError::NotFound(format!("surface {}", id)))
    }

    /// Look up an entry by name.
    ///
    /// Matching ignores case, spaces, `-` and `_`, so `klein-bottle` finds
    /// "Klein Bottle".
    pub fn find(&self, name: &str) -> Result<&SurfaceEntry> {
        let key = normalize_name(name);
        self.entries
            .iter()
            .find(|e| normalize_name(&e.name) == key)
            .ok_or_else(|| SurfvizError::NotFound(format!("surface '{}'", name)))
    }

    pub fn first(&self) -> Option<&SurfaceEntry> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}
