/// Mock graphics device for unit tests (no GPU required)
///
/// Buffers keep their bytes in memory and count uploads, shaders return the
/// reflection registered for their label, and the command list records every
/// call as a `RecordedCommand` so tests can assert on the exact stream.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU32, Ordering};
use rustc_hash::FxHashMap;

use crate::graphics_device::{
    GraphicsDevice, Buffer, BufferDesc, BufferAccess, BufferUsage, Shader, ShaderDesc,
    ShaderStage, ShaderReflection, CommandList, Surface, ClearFlags, IndexType,
    PrimitiveTopology, Viewport,
};
use crate::error::{Error, Result};
use crate::engine_bail;

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub usage: BufferUsage,
    pub access: BufferAccess,
    pub label: String,
    data: Mutex<Vec<u8>>,
    write_count: AtomicU32,
}

impl MockBuffer {
    pub fn new(desc: &BufferDesc, initial_data: Option<&[u8]>) -> Self {
        let mut data = vec![0u8; desc.size as usize];
        if let Some(initial) = initial_data {
            data[..initial.len()].copy_from_slice(initial);
        }
        Self {
            size: desc.size,
            usage: desc.usage,
            access: desc.access,
            label: desc.label.clone(),
            data: Mutex::new(data),
            write_count: AtomicU32::new(0),
        }
    }

    /// Current buffer contents
    pub fn data(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }

    /// Number of successful `write` calls
    pub fn write_count(&self) -> u32 {
        self.write_count.load(Ordering::SeqCst)
    }

    /// Read `count` f32 values starting at byte `offset`
    pub fn read_f32s(&self, offset: usize, count: usize) -> Vec<f32> {
        let data = self.data.lock().unwrap();
        data[offset..offset + count * 4]
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn access(&self) -> BufferAccess {
        self.access
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        if self.access == BufferAccess::Immutable {
            engine_bail!("ember3d::MockBuffer", "Buffer '{}' is immutable", self.label);
        }
        if data.len() as u64 > self.size {
            engine_bail!("ember3d::MockBuffer",
                "Write of {} bytes exceeds buffer '{}' ({} bytes)",
                data.len(), self.label, self.size);
        }
        self.data.lock().unwrap()[..data.len()].copy_from_slice(data);
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub label: String,
    pub reflection: ShaderReflection,
}

impl MockShader {
    pub fn new(stage: ShaderStage, label: String, reflection: ShaderReflection) -> Self {
        Self { stage, label, reflection }
    }
}

impl Shader for MockShader {
    fn stage(&self) -> ShaderStage {
        self.stage
    }

    fn reflection(&self) -> &ShaderReflection {
        &self.reflection
    }

    fn label(&self) -> &str {
        &self.label
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// One recorded command-list call
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCommand {
    SetPrimitiveTopology(PrimitiveTopology),
    SetViewport(Viewport),
    SetShader { stage: ShaderStage, label: String },
    BindConstantBuffer { stage: ShaderStage, slot: u32, size: u64 },
    BindVertexBuffer { stride: u32, offset: u64, size: u64 },
    BindIndexBuffer { offset: u64, index_type: IndexType, size: u64 },
    DrawIndexed { index_count: u32, first_index: u32, base_vertex: i32 },
    ClearRenderTarget([f32; 4]),
    ClearDepthStencil { flags: ClearFlags, depth: f32, stencil: u8 },
}

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<RecordedCommand>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    /// All recorded `DrawIndexed` index counts, in order
    pub fn draw_counts(&self) -> Vec<u32> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RecordedCommand::DrawIndexed { index_count, .. } => Some(*index_count),
                _ => None,
            })
            .collect()
    }
}

impl CommandList for MockCommandList {
    fn set_primitive_topology(&mut self, topology: PrimitiveTopology) -> Result<()> {
        self.commands.push(RecordedCommand::SetPrimitiveTopology(topology));
        Ok(())
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.commands.push(RecordedCommand::SetViewport(viewport));
        Ok(())
    }

    fn set_shader(&mut self, shader: &Arc<dyn Shader>) -> Result<()> {
        self.commands.push(RecordedCommand::SetShader {
            stage: shader.stage(),
            label: shader.label().to_string(),
        });
        Ok(())
    }

    fn bind_constant_buffer(
        &mut self,
        stage: ShaderStage,
        slot: u32,
        buffer: &Arc<dyn Buffer>,
    ) -> Result<()> {
        self.commands.push(RecordedCommand::BindConstantBuffer {
            stage,
            slot,
            size: buffer.size(),
        });
        Ok(())
    }

    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn Buffer>, stride: u32, offset: u64) -> Result<()> {
        self.commands.push(RecordedCommand::BindVertexBuffer { stride, offset, size: buffer.size() });
        Ok(())
    }

    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()> {
        self.commands.push(RecordedCommand::BindIndexBuffer { offset, index_type, size: buffer.size() });
        Ok(())
    }

    fn draw_indexed(&mut self, index_count: u32, first_index: u32, base_vertex: i32) -> Result<()> {
        self.commands.push(RecordedCommand::DrawIndexed { index_count, first_index, base_vertex });
        Ok(())
    }

    fn clear_render_target(&mut self, color: [f32; 4]) -> Result<()> {
        self.commands.push(RecordedCommand::ClearRenderTarget(color));
        Ok(())
    }

    fn clear_depth_stencil(&mut self, flags: ClearFlags, depth: f32, stencil: u8) -> Result<()> {
        self.commands.push(RecordedCommand::ClearDepthStencil { flags, depth, stencil });
        Ok(())
    }
}

// ============================================================================
// Mock Surface
// ============================================================================

#[derive(Debug)]
pub struct MockSurface {
    pub width: u32,
    pub height: u32,
    /// vsync flag of every `present` call
    pub presents: Vec<bool>,
    pub resizes: Vec<(u32, u32)>,
    pub rebinds: u32,
}

impl MockSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, presents: Vec::new(), resizes: Vec::new(), rebinds: 0 }
    }
}

impl Surface for MockSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.width = width;
        self.height = height;
        self.resizes.push((width, height));
        Ok(())
    }

    fn present(&mut self, vsync: bool) -> Result<()> {
        self.presents.push(vsync);
        Ok(())
    }

    fn rebind_render_targets(&mut self, cmd: &mut dyn CommandList) -> Result<()> {
        self.rebinds += 1;
        cmd.set_viewport(Viewport::full(self.width, self.height))
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock device that tracks created resources without a GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Every buffer created, in creation order
    pub buffers: Vec<Arc<MockBuffer>>,
    /// Labels of created shaders
    pub created_shaders: Vec<String>,
    /// Reflection returned for a shader, keyed by shader label
    reflections: FxHashMap<String, ShaderReflection>,
    /// When set, `create_buffer` fails with OutOfMemory
    pub fail_buffer_creation: bool,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the reflection a shader with `label` reports
    pub fn with_reflection(mut self, label: &str, reflection: ShaderReflection) -> Self {
        self.reflections.insert(label.to_string(), reflection);
        self
    }

    /// Wrap into the shared handle the engine types take, keeping a typed handle
    pub fn into_shared(self) -> (Arc<Mutex<MockGraphicsDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
        let mock = Arc::new(Mutex::new(self));
        let device: Arc<Mutex<dyn GraphicsDevice>> = mock.clone();
        (mock, device)
    }

    /// First buffer created with `label`
    pub fn buffer_by_label(&self, label: &str) -> Option<Arc<MockBuffer>> {
        self.buffers.iter().find(|b| b.label == label).cloned()
    }

    /// Sum of uploads over every buffer
    pub fn total_writes(&self) -> u32 {
        self.buffers.iter().map(|b| b.write_count()).sum()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(
        &mut self,
        desc: BufferDesc,
        initial_data: Option<&[u8]>,
    ) -> Result<Arc<dyn Buffer>> {
        if self.fail_buffer_creation {
            return Err(Error::OutOfMemory);
        }
        if desc.size == 0 {
            engine_bail!("ember3d::MockGraphicsDevice", "Buffer '{}' has zero size", desc.label);
        }
        if desc.access == BufferAccess::Immutable && initial_data.is_none() {
            engine_bail!("ember3d::MockGraphicsDevice",
                "Immutable buffer '{}' requires initial data", desc.label);
        }
        if let Some(data) = initial_data {
            if data.len() as u64 > desc.size {
                engine_bail!("ember3d::MockGraphicsDevice",
                    "Initial data ({} bytes) exceeds buffer '{}' ({} bytes)",
                    data.len(), desc.label, desc.size);
            }
        }

        let buffer = Arc::new(MockBuffer::new(&desc, initial_data));
        self.buffers.push(buffer.clone());
        Ok(buffer)
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        if desc.code.is_empty() {
            engine_bail!("ember3d::MockGraphicsDevice", "Shader '{}' has no bytecode", desc.label);
        }
        let reflection = self
            .reflections
            .get(&desc.label)
            .cloned()
            .unwrap_or_else(ShaderReflection::empty);
        self.created_shaders.push(desc.label.clone());
        Ok(Arc::new(MockShader::new(desc.stage, desc.label, reflection)))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new()))
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
