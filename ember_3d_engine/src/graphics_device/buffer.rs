/// Buffer trait and buffer descriptor

use crate::error::Result;

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Vertex buffer
    Vertex,
    /// Index buffer
    Index,
    /// Constant (uniform) buffer
    Constant,
}

/// CPU access pattern of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferAccess {
    /// Contents fixed at creation (initial data required)
    Immutable,
    /// CPU-writable every frame via whole-buffer discard writes
    Dynamic,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
    /// CPU access pattern
    pub access: BufferAccess,
    /// Debug label (shows up in device captures and in the mock device)
    pub label: String,
}

/// Buffer data format for vertex attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum BufferFormat {
    R32_SFLOAT,          // float (4 bytes)
    R32G32_SFLOAT,       // float2 (8 bytes)
    R32G32B32_SFLOAT,    // float3 (12 bytes)
    R32G32B32A32_SFLOAT, // float4 (16 bytes)
    R32_UINT,
    R32_SINT,
}

impl BufferFormat {
    /// Returns size in bytes for this format
    pub fn size_bytes(&self) -> u32 {
        match self {
            BufferFormat::R32_SFLOAT | BufferFormat::R32_UINT | BufferFormat::R32_SINT => 4,
            BufferFormat::R32G32_SFLOAT => 8,
            BufferFormat::R32G32B32_SFLOAT => 12,
            BufferFormat::R32G32B32A32_SFLOAT => 16,
        }
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types. The buffer is released when
/// the last reference is dropped.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// CPU access pattern the buffer was created with
    fn access(&self) -> BufferAccess;

    /// Replace the whole buffer contents (map with discard, copy, unmap)
    ///
    /// `data` must not be larger than the buffer. Immutable buffers reject
    /// the write.
    fn write(&self, data: &[u8]) -> Result<()>;
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
