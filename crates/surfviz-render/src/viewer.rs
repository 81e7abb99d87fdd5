//! Interactive viewer state.
//!
//! The viewer owns the surface registry, the current selection, the control
//! panel settings and the mesh cache. Settings changes only touch material,
//! transform or draw-pass state; the mesh is rebuilt when the selected
//! equation or the resolution changes.

use std::sync::Arc;

use surfviz_core::{EquationId, Result, SurfvizError};
use surfviz_geometry::{SurfaceEntry, SurfaceRegistry};
use surfviz_math::Transform;
use surfviz_mesh::{MeshCache, Resolution, TriangleMesh};
use tracing::{debug, info};

use crate::settings::check_unit_interval;
use crate::{draw_passes, GridTexture, MaterialSettings, PassDescriptor, Rotation, ViewerSettings};

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub mesh: Arc<TriangleMesh>,
    pub transform: Transform,
    pub angle: f64,
    pub passes: Vec<PassDescriptor>,
}

#[derive(Debug)]
pub struct Viewer {
    registry: SurfaceRegistry,
    selected: EquationId,
    settings: ViewerSettings,
    resolution: Resolution,
    rotation: Rotation,
    cache: MeshCache,
    texture: Arc<GridTexture>,
}

impl Viewer {
    /// Viewer showing the first registered surface.
    pub fn new(registry: SurfaceRegistry, settings: ViewerSettings) -> Result<Self> {
        settings.validate()?;
        let selected = registry
            .first()
            .map(|entry| entry.id)
            .ok_or_else(|| SurfvizError::NotFound("no surfaces registered".to_string()))?;
        let resolution = Resolution::new(settings.segments)?;
        let rotation = Rotation::new(settings.rotation_speed, settings.rotating);
        let texture = Arc::new(GridTexture::new(settings.texture_repeat));

        Ok(Self {
            registry,
            selected,
            settings,
            resolution,
            rotation,
            cache: MeshCache::new(),
            texture,
        })
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    pub fn selected(&self) -> Result<&SurfaceEntry> {
        self.registry.get(self.selected)
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// The shared grid texture; created once for the viewer's lifetime.
    pub fn texture(&self) -> &Arc<GridTexture> {
        &self.texture
    }

    pub fn select(&mut self, id: EquationId) -> Result<()> {
        let entry = self.registry.get(id)?;
        if id != self.selected {
            info!(surface = %entry.name, "selected surface");
            self.selected = id;
        }
        Ok(())
    }

    pub fn select_by_name(&mut self, name: &str) -> Result<EquationId> {
        let id = self.registry.find(name)?.id;
        self.select(id)?;
        Ok(id)
    }

    pub fn set_rotation_speed(&mut self, speed: f64) -> Result<()> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(SurfvizError::InvalidSetting(format!(
                "rotation_speed must be a non-negative number, got {}",
                speed
            )));
        }
        self.settings.rotation_speed = speed;
        self.rotation.set_speed(speed);
        Ok(())
    }

    pub fn set_rotating(&mut self, rotating: bool) {
        self.settings.rotating = rotating;
        self.rotation.set_enabled(rotating);
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.settings.wireframe = wireframe;
    }

    pub fn set_metalness(&mut self, metalness: f64) -> Result<()> {
        check_unit_interval("metalness", metalness)?;
        self.settings.metalness = metalness;
        Ok(())
    }

    pub fn set_roughness(&mut self, roughness: f64) -> Result<()> {
        check_unit_interval("roughness", roughness)?;
        self.settings.roughness = roughness;
        Ok(())
    }

    /// Change the grid resolution. The next frame re-tessellates.
    pub fn set_segments(&mut self, segments: i64) -> Result<()> {
        self.resolution = Resolution::new(segments)?;
        self.settings.segments = segments;
        debug!(resolution = %self.resolution, "resolution changed");
        Ok(())
    }

    /// Mesh of the selected surface, tessellated on first use after a change.
    pub fn mesh(&mut self) -> Result<Arc<TriangleMesh>> {
        let entry = self.registry.get(self.selected)?;
        self.cache.get_or_tessellate(entry, self.resolution)
    }

    pub fn material(&self) -> Result<MaterialSettings> {
        MaterialSettings::from_settings(self.selected()?.color, &self.settings)
    }

    /// Advance the animation by `dt` seconds and describe the frame to draw.
    pub fn frame(&mut self, dt: f64) -> Result<Frame> {
        let mesh = self.mesh()?;
        let angle = self.rotation.advance(dt);
        let transform = self.rotation.transform();
        let material = self.material()?;

        Ok(Frame {
            mesh,
            transform,
            angle,
            passes: draw_passes(&material, &transform),
        })
    }

    pub fn tessellation_count(&self) -> usize {
        self.cache.tessellation_count()
    }
}
