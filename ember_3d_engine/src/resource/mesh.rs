/// Resource-level mesh: immutable GPU vertex and index buffers for one static mesh.
///
/// A Mesh is created once from vertex/index arrays (or an OBJ file) and is
/// never modified afterwards. It is shared between entities as `Arc<Mesh>`;
/// the GPU buffers are released when the last reference drops.

use std::path::Path;
use std::sync::{Arc, Mutex};
use bytemuck::{Pod, Zeroable};
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::graphics_device::lock_device;
use crate::graphics_device::{
    Buffer, BufferAccess, BufferDesc, BufferFormat, BufferUsage, CommandList,
    GraphicsDevice, IndexType, VertexAttribute, VertexLayout,
};
use crate::resource::obj;

// ===== VERTEX =====

/// Interleaved vertex: position, normal, texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Size in bytes of one vertex
    pub const STRIDE: u32 = std::mem::size_of::<Vertex>() as u32;

    pub fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    /// Input layout matching the vertex shader inputs
    pub fn layout() -> VertexLayout {
        VertexLayout {
            stride: Self::STRIDE,
            attributes: vec![
                VertexAttribute {
                    semantic: "POSITION",
                    semantic_index: 0,
                    format: BufferFormat::R32G32B32_SFLOAT,
                    offset: 0,
                },
                VertexAttribute {
                    semantic: "NORMAL",
                    semantic_index: 0,
                    format: BufferFormat::R32G32B32_SFLOAT,
                    offset: 12,
                },
                VertexAttribute {
                    semantic: "TEXCOORD",
                    semantic_index: 0,
                    format: BufferFormat::R32G32_SFLOAT,
                    offset: 24,
                },
            ],
        }
    }
}

// ===== MESH =====

/// Static indexed mesh stored in immutable GPU buffers
pub struct Mesh {
    vertex_buffer: Arc<dyn Buffer>,
    index_buffer: Arc<dyn Buffer>,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    /// Create a mesh from vertex and index arrays
    ///
    /// Fails on empty data, on an index count that is not a multiple of 3 and
    /// on any index referencing a missing vertex.
    pub fn new(
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Result<Self> {
        // ========== VALIDATION ==========
        if vertices.is_empty() {
            engine_bail!("ember3d::Mesh", "Mesh must have at least one vertex");
        }
        if indices.is_empty() {
            engine_bail!("ember3d::Mesh", "Mesh must have at least one index");
        }
        if indices.len() % 3 != 0 {
            engine_bail!("ember3d::Mesh",
                "Index count {} is not a multiple of 3", indices.len());
        }
        let vertex_count = vertices.len() as u32;
        if let Some((position, index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index >= vertex_count)
        {
            engine_bail!("ember3d::Mesh",
                "Index {} at position {} out of range (vertex count {})",
                index, position, vertex_count);
        }

        // ========== CREATE GPU BUFFERS ==========
        let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(indices);

        let mut device = lock_device(device)?;
        let vertex_buffer = device.create_buffer(
            BufferDesc {
                size: vertex_bytes.len() as u64,
                usage: BufferUsage::Vertex,
                access: BufferAccess::Immutable,
                label: "mesh_vertices".to_string(),
            },
            Some(vertex_bytes),
        )?;
        let index_buffer = device.create_buffer(
            BufferDesc {
                size: index_bytes.len() as u64,
                usage: BufferUsage::Index,
                access: BufferAccess::Immutable,
                label: "mesh_indices".to_string(),
            },
            Some(index_bytes),
        )?;

        Ok(Self {
            vertex_buffer,
            index_buffer,
            vertex_count,
            index_count: indices.len() as u32,
        })
    }

    /// Load a mesh from an OBJ file
    pub fn from_obj_file(
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        path: impl AsRef<Path>,
    ) -> Result<Self> {
        let data = obj::load_obj(path)?;
        Self::new(device, &data.vertices, &data.indices)
    }

    /// Build a mesh from OBJ text already in memory
    pub fn from_obj_str(device: &Arc<Mutex<dyn GraphicsDevice>>, text: &str) -> Result<Self> {
        let data = obj::parse_obj(text)?;
        Self::new(device, &data.vertices, &data.indices)
    }

    // ===== ACCESSORS =====

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    pub fn vertex_buffer(&self) -> &Arc<dyn Buffer> {
        &self.vertex_buffer
    }

    pub fn index_buffer(&self) -> &Arc<dyn Buffer> {
        &self.index_buffer
    }

    // ===== DRAW =====

    /// Bind both buffers and issue one indexed draw over every index
    pub fn draw(&self, cmd: &mut dyn CommandList) -> Result<()> {
        cmd.bind_vertex_buffer(&self.vertex_buffer, Vertex::STRIDE, 0)?;
        cmd.bind_index_buffer(&self.index_buffer, 0, IndexType::U32)?;
        cmd.draw_indexed(self.index_count, 0, 0)
    }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
