//! Equation-keyed mesh cache.
//!
//! Rendering a frame only needs the current mesh; tessellating costs
//! `O(segments²)` evaluations. The cache holds a single mesh and rebuilds it
//! only when the equation identity or the resolution changes. A failure is
//! remembered for its key too, so a broken equation is evaluated once rather
//! than on every frame.

use std::sync::Arc;

use surfviz_core::{EquationId, Result, SurfvizError};
use surfviz_geometry::SurfaceEntry;
use tracing::trace;

use crate::{tessellate_with, Resolution, TriangleMesh};

/// Identity of a cached mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub equation: EquationId,
    pub resolution: Resolution,
}

#[derive(Debug, Default)]
pub struct MeshCache {
    slot: Option<(CacheKey, Arc<TriangleMesh>)>,
    failed: Option<(CacheKey, SurfvizError)>,
    tessellations: usize,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the mesh for `entry` at `resolution`, tessellating on a key change.
    ///
    /// On failure the previously cached mesh stays in place and the error is
    /// kept for `key`; later calls with the same key return it without
    /// evaluating the equation again.
    pub fn get_or_tessellate(
        &mut self,
        entry: &SurfaceEntry,
        resolution: Resolution,
    ) -> Result<Arc<TriangleMesh>> {
        let key = CacheKey {
            equation: entry.id,
            resolution,
        };

        if let Some((cached_key, mesh)) = &self.slot {
            if *cached_key == key {
                trace!(equation = %entry.id, "mesh cache hit");
                return Ok(Arc::clone(mesh));
            }
        }

        if let Some((failed_key, err)) = &self.failed {
            if *failed_key == key {
                trace!(equation = %entry.id, "mesh cache hit on failed key");
                return Err(err.clone());
            }
        }
        self.failed = None;

        self.tessellations += 1;
        match tessellate_with(entry.equation.as_ref(), resolution) {
            Ok(mesh) => {
                let mesh = Arc::new(mesh);
                self.slot = Some((key, Arc::clone(&mesh)));
                Ok(mesh)
            }
            Err(err) => {
                self.failed = Some((key, err.clone()));
                Err(err)
            }
        }
    }

    /// Key of the mesh currently held, if any.
    pub fn current_key(&self) -> Option<CacheKey> {
        self.slot.as_ref().map(|(key, _)| *key)
    }

    /// Key whose last tessellation failed, if it is still remembered.
    pub fn failed_key(&self) -> Option<CacheKey> {
        self.failed.as_ref().map(|(key, _)| *key)
    }

    pub fn invalidate(&mut self) {
        self.slot = None;
        self.failed = None;
    }

    /// Number of tessellations started since creation.
    pub fn tessellation_count(&self) -> usize {
        self.tessellations
    }
}
