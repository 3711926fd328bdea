/// CommandList trait - for recording rendering commands on the immediate context

use std::sync::Arc;
use bitflags::bitflags;
use crate::error::Result;
use crate::graphics_device::{Buffer, Shader, ShaderStage, IndexType, PrimitiveTopology};

bitflags! {
    /// Which planes of the depth/stencil target to clear
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        /// Clear the depth plane
        const DEPTH = 1 << 0;
        /// Clear the stencil plane
        const STENCIL = 1 << 1;
    }
}

/// Command list for recording rendering commands
///
/// The backend executes commands on its immediate context; ordering is the
/// order of the calls.
pub trait CommandList: Send + Sync {
    /// Set the primitive topology for subsequent draws
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) -> Result<()>;

    /// Set the viewport
    ///
    /// # Arguments
    ///
    /// * `viewport` - Viewport dimensions and depth range
    fn set_viewport(&mut self, viewport: Viewport) -> Result<()>;

    /// Bind a shader program to its stage
    fn set_shader(&mut self, shader: &Arc<dyn Shader>) -> Result<()>;

    /// Bind a constant buffer to a register slot of a shader stage
    ///
    /// # Arguments
    ///
    /// * `stage` - Stage that reads the buffer
    /// * `slot` - Register slot (`register(bN)`)
    /// * `buffer` - Constant buffer to bind
    fn bind_constant_buffer(
        &mut self,
        stage: ShaderStage,
        slot: u32,
        buffer: &Arc<dyn Buffer>,
    ) -> Result<()>;

    /// Bind a vertex buffer to input slot 0
    ///
    /// # Arguments
    ///
    /// * `buffer` - Buffer to bind
    /// * `stride` - Size in bytes of one vertex
    /// * `offset` - Offset into the buffer in bytes
    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn Buffer>, stride: u32, offset: u64) -> Result<()>;

    /// Bind an index buffer
    ///
    /// # Arguments
    ///
    /// * `buffer` - Buffer to bind
    /// * `offset` - Offset into the buffer in bytes
    /// * `index_type` - Type of indices (U16 or U32)
    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()>;

    /// Draw indexed vertices
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of indices to draw
    /// * `first_index` - Index of first index
    /// * `base_vertex` - Value added to vertex index before indexing into the vertex buffer
    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32) -> Result<()>;

    /// Clear the bound back buffer to an RGBA color
    fn clear_render_target(&mut self, color: [f32; 4]) -> Result<()>;

    /// Clear the bound depth/stencil target
    fn clear_depth_stencil(&mut self, flags: ClearFlags, depth: f32, stencil: u8) -> Result<()>;
}

/// Viewport dimensions and depth range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}

impl Viewport {
    /// Viewport covering a whole `width` x `height` target with depth [0, 1]
    pub fn full(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: width as f32,
            height: height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }
}
