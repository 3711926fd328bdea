/// Fixed-function pipeline state: topology, index format and vertex layout

use crate::graphics_device::BufferFormat;

/// Primitive topology
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    /// Triangle list
    TriangleList,
    /// Triangle strip
    TriangleStrip,
    /// Line list
    LineList,
    /// Point list
    PointList,
}

/// Index buffer element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    /// 16-bit indices (max 65535 vertices)
    U16,
    /// 32-bit indices
    U32,
}

impl IndexType {
    /// Size in bytes of one index element
    pub fn size_bytes(&self) -> u32 {
        match self {
            IndexType::U16 => 2,
            IndexType::U32 => 4,
        }
    }
}

/// Vertex attribute description (one element of the input layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input semantic (e.g. "POSITION", "NORMAL", "TEXCOORD")
    pub semantic: &'static str,
    /// Semantic index
    pub semantic_index: u32,
    /// Format of the attribute (data type and component count)
    pub format: BufferFormat,
    /// Offset in bytes from the start of the vertex
    pub offset: u32,
}

/// Vertex input layout for a single interleaved vertex buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Stride in bytes between consecutive vertices
    pub stride: u32,
    /// Vertex attributes
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Find an attribute by semantic name
    pub fn attribute(&self, semantic: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.semantic == semantic)
    }
}
