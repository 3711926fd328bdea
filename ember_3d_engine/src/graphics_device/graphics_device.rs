/// GraphicsDevice trait - main GPU resource factory interface

use std::sync::{Arc, Mutex, MutexGuard};
use crate::error::{Error, Result};
use crate::graphics_device::{Buffer, BufferDesc, CommandList, Shader, ShaderDesc};

/// Renderer configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Enable validation/debug layers
    pub enable_validation: bool,
    /// Application name
    pub app_name: String,
    /// Application version (major, minor, patch)
    pub app_version: (u32, u32, u32),
    /// Wait for vertical blank when presenting
    pub vsync: bool,
    /// Back buffer clear color (RGBA)
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_validation: cfg!(debug_assertions),
            app_name: "Ember3D Application".to_string(),
            app_version: (1, 0, 0),
            vsync: false,
            clear_color: [0.4, 0.6, 0.75, 0.0],
        }
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Main graphics device trait
///
/// Central factory for GPU resources. Implemented by backend-specific devices
/// (Direct3D 11, Vulkan, ...), shared as `Arc<Mutex<dyn GraphicsDevice>>`.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    /// * `initial_data` - Initial contents (required for immutable buffers)
    fn create_buffer(
        &mut self,
        desc: BufferDesc,
        initial_data: Option<&[u8]>,
    ) -> Result<Arc<dyn Buffer>>;

    /// Create a shader from compiled bytecode and reflect its constant buffers
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Create a command list recording on the immediate context
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;
}

/// Lock a shared device, turning mutex poisoning into a backend error
pub(crate) fn lock_device(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
) -> Result<MutexGuard<'_, dyn GraphicsDevice + 'static>> {
    device
        .lock()
        .map_err(|_| Error::BackendError("Graphics device mutex poisoned".to_string()))
}
