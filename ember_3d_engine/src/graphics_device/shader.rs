/// Shader trait, shader descriptor and constant buffer reflection
///
/// Reflection is produced by the backend when the compiled shader is created.
/// It lists every constant buffer the shader declares, its register slot and
/// the byte placement of each variable, following HLSL packing rules.

use std::path::Path;
use crate::error::{Error, Result};
use crate::engine_error;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Pixel/Fragment shader
    Pixel,
}

/// Descriptor for creating a shader from compiled bytecode
#[derive(Debug, Clone)]
pub struct ShaderDesc {
    /// Compiled shader bytecode
    pub code: Vec<u8>,
    /// Shader stage
    pub stage: ShaderStage,
    /// Entry point name
    pub entry_point: String,
    /// Debug label (usually the compiled file name)
    pub label: String,
}

// ===== PARAMETER TYPES =====

/// Data type of a constant buffer variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Int,
    UInt,
    Mat4,
}

impl ParamType {
    /// Size in bytes inside a constant buffer
    pub fn size_bytes(&self) -> u32 {
        match self {
            ParamType::Float => 4,
            ParamType::Vec2  => 8,
            ParamType::Vec3  => 12,
            ParamType::Vec4  => 16,
            ParamType::Int   => 4,
            ParamType::UInt  => 4,
            ParamType::Mat4  => 64,
        }
    }

    /// Whether the type must start on a fresh 16-byte register
    pub fn starts_register(&self) -> bool {
        matches!(self, ParamType::Mat4)
    }
}

// ===== REFLECTION =====

/// One variable inside a constant buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReflection {
    /// Variable name as declared in the shader
    pub name: String,
    /// Byte offset from the start of the buffer
    pub offset: u32,
    /// Size in bytes
    pub size: u32,
}

/// One constant buffer declared by a shader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantBufferReflection {
    /// Buffer name (cbuffer block name)
    pub name: String,
    /// Register slot the buffer binds to (`register(bN)`)
    pub slot: u32,
    /// Total size in bytes
    pub size: u32,
    /// Variables in declaration order
    pub variables: Vec<VariableReflection>,
}

/// Size of one constant buffer register
const REGISTER_SIZE: u32 = 16;

impl ConstantBufferReflection {
    /// Build a reflection block from an ordered field list using HLSL packing
    ///
    /// A variable never straddles a 16-byte register, matrices always start a
    /// new register, and the total size is rounded up to a multiple of 16.
    pub fn packed(name: &str, slot: u32, fields: &[(&str, ParamType)]) -> Self {
        let mut variables = Vec::with_capacity(fields.len());
        let mut offset: u32 = 0;

        for (field_name, param_type) in fields {
            let size = param_type.size_bytes();
            let used_in_register = offset % REGISTER_SIZE;
            if used_in_register != 0
                && (param_type.starts_register() || used_in_register + size > REGISTER_SIZE)
            {
                offset += REGISTER_SIZE - used_in_register;
            }
            variables.push(VariableReflection {
                name: field_name.to_string(),
                offset,
                size,
            });
            offset += size;
        }

        Self {
            name: name.to_string(),
            slot,
            size: align_to_register(offset),
            variables,
        }
    }

    /// Find a variable by name
    pub fn variable(&self, name: &str) -> Option<&VariableReflection> {
        self.variables.iter().find(|v| v.name == name)
    }
}

/// Round a byte size up to a whole number of 16-byte registers
pub fn align_to_register(size: u32) -> u32 {
    (size + REGISTER_SIZE - 1) & !(REGISTER_SIZE - 1)
}

/// Reflection data of a compiled shader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderReflection {
    constant_buffers: Vec<ConstantBufferReflection>,
}

impl ShaderReflection {
    pub fn new(constant_buffers: Vec<ConstantBufferReflection>) -> Self {
        Self { constant_buffers }
    }

    /// Reflection with no constant buffers
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn constant_buffers(&self) -> &[ConstantBufferReflection] {
        &self.constant_buffers
    }

    pub fn constant_buffer_count(&self) -> usize {
        self.constant_buffers.len()
    }
}

// ===== SHADER TRAIT =====

/// Compiled shader resource trait
///
/// Implemented by backend-specific shader types. Released when dropped.
pub trait Shader: Send + Sync {
    /// Pipeline stage this shader runs in
    fn stage(&self) -> ShaderStage;

    /// Constant buffer reflection gathered at creation
    fn reflection(&self) -> &ShaderReflection;

    /// Debug label
    fn label(&self) -> &str;
}

// ===== SHADER BINARY LOADING =====

/// Read compiled shader bytecode from disk
pub fn read_shader_binary(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let code = std::fs::read(path).map_err(|e| {
        engine_error!("ember3d::Shader", "Failed to read shader '{}': {}", path.display(), e);
        Error::InitializationFailed(format!("Failed to read shader '{}': {}", path.display(), e))
    })?;

    if code.is_empty() {
        engine_error!("ember3d::Shader", "Shader file '{}' is empty", path.display());
        return Err(Error::InitializationFailed(format!(
            "Shader file '{}' is empty", path.display()
        )));
    }

    Ok(code)
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
