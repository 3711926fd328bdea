/// Surface trait - presentable back buffer owned by the windowing layer

use crate::error::Result;
use crate::graphics_device::CommandList;

/// Presentable surface (swap chain plus its depth/stencil target)
///
/// Implemented by the backend that owns the window. The renderer core only
/// clears, presents and resizes through this trait.
pub trait Surface: Send + Sync {
    /// Back buffer width in pixels
    fn width(&self) -> u32;

    /// Back buffer height in pixels
    fn height(&self) -> u32;

    /// Width divided by height (1.0 for a zero-height surface)
    fn aspect_ratio(&self) -> f32 {
        if self.height() == 0 {
            1.0
        } else {
            self.width() as f32 / self.height() as f32
        }
    }

    /// Recreate the back buffer and depth target at a new size
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;

    /// Present the back buffer
    ///
    /// # Arguments
    ///
    /// * `vsync` - Wait for vertical blank before flipping
    fn present(&mut self, vsync: bool) -> Result<()>;

    /// Re-bind back buffer and depth target as the output of `cmd`
    ///
    /// Flip-model swap chains unbind their targets on present.
    fn rebind_render_targets(&mut self, cmd: &mut dyn CommandList) -> Result<()>;
}
