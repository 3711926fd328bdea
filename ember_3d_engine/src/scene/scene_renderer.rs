/// SceneRenderer - drives one frame: clear, draw the scene, present.
///
/// Frame sequence recorded into the command list:
/// 1. clear the back buffer to `Config::clear_color`
/// 2. clear depth (1.0) and stencil (0)
/// 3. triangle-list topology
/// 4. `Scene::draw`
/// 5. present, then rebind the surface's render targets for the next frame

use crate::camera::Camera;
use crate::error::Result;
use crate::{engine_debug, engine_info, engine_trace};
use crate::graphics_device::{ClearFlags, CommandList, Config, PrimitiveTopology, Surface};
use crate::input::InputState;
use super::scene::Scene;

/// Outcome of one `SceneRenderer::render_frame`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Zero-based index of the rendered frame
    pub frame_index: u64,
    pub drawn: u32,
    pub skipped: u32,
}

pub struct SceneRenderer {
    config: Config,
    frame_count: u64,
}

impl SceneRenderer {
    pub fn new(config: Config) -> Self {
        engine_info!("ember3d::SceneRenderer",
            "Renderer for '{}' v{}.{}.{} (vsync: {}, validation: {})",
            config.app_name, config.app_version.0, config.app_version.1, config.app_version.2,
            config.vsync, config.enable_validation);
        Self {
            config,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Per-frame simulation step: move the camera, then consume the mouse delta
    pub fn update(&mut self, dt: f32, camera: &mut Camera, input: &mut InputState) {
        camera.update(dt, input);
        input.end_frame();
    }

    /// Record and present one frame
    pub fn render_frame(
        &mut self,
        scene: &mut Scene,
        camera: &Camera,
        cmd: &mut dyn CommandList,
        surface: &mut dyn Surface,
    ) -> Result<FrameStats> {
        // ========== CLEAR ==========
        cmd.clear_render_target(self.config.clear_color)?;
        cmd.clear_depth_stencil(ClearFlags::DEPTH | ClearFlags::STENCIL, 1.0, 0)?;
        cmd.set_primitive_topology(PrimitiveTopology::TriangleList)?;

        // ========== DRAW ==========
        let draw_stats = scene.draw(cmd, camera);

        // ========== PRESENT ==========
        surface.present(self.config.vsync)?;
        surface.rebind_render_targets(cmd)?;

        let stats = FrameStats {
            frame_index: self.frame_count,
            drawn: draw_stats.drawn,
            skipped: draw_stats.skipped,
        };
        self.frame_count += 1;

        engine_trace!("ember3d::SceneRenderer",
            "Frame {}: {} drawn, {} skipped", stats.frame_index, stats.drawn, stats.skipped);
        Ok(stats)
    }

    /// Resize the surface and refit the camera projection
    ///
    /// A zero height (minimized window) is ignored.
    pub fn on_resize(
        &mut self,
        camera: &mut Camera,
        surface: &mut dyn Surface,
        width: u32,
        height: u32,
    ) -> Result<()> {
        if height == 0 {
            engine_debug!("ember3d::SceneRenderer", "Ignoring resize to {}x{}", width, height);
            return Ok(());
        }

        surface.resize(width, height)?;
        camera.update_projection_matrix(surface.aspect_ratio());
        engine_debug!("ember3d::SceneRenderer", "Resized to {}x{}", width, height);
        Ok(())
    }
}

#[cfg(test)]
#[path = "scene_renderer_tests.rs"]
mod tests;
