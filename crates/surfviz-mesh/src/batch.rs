//! Tessellate every registered surface at once, for offline export.

use rayon::prelude::*;
use surfviz_core::{EquationId, Result};
use surfviz_geometry::SurfaceRegistry;
use tracing::debug;

use crate::{tessellate_with, Resolution, TriangleMesh};

/// Tessellate all entries of `registry`, one rayon task per entry.
///
/// Results come back in registry order. A failing equation does not affect
/// the others.
pub fn tessellate_all(
    registry: &SurfaceRegistry,
    resolution: Resolution,
) -> Vec<(EquationId, Result<TriangleMesh>)> {
    let entries: Vec<_> = registry.iter().collect();
    debug!(count = entries.len(), %resolution, "batch tessellation");

    entries
        .par_iter()
        .map(|entry| (entry.id, tessellate_with(entry.equation.as_ref(), resolution)))
        .collect()
}
