/// Resource-level shader: named parameters packed into constant buffers.
///
/// A SimpleShader wraps one compiled shader stage. At creation it reads the
/// shader's constant buffer reflection, allocates one CPU shadow copy and one
/// dynamic GPU buffer per constant buffer, and indexes every variable by name.
///
/// Per-frame protocol:
/// 1. `set_*` writes values into the shadow copy and marks that buffer dirty
/// 2. `copy_all_buffer_data` uploads each dirty buffer once (whole buffer)
/// 3. `set_shader` binds the program and its constant buffers
///
/// Setters never touch the device.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;
use crate::error::{Error, Result};
use crate::{engine_bail, engine_info, engine_trace, engine_warn};
use crate::graphics_device::graphics_device::lock_device;
use crate::graphics_device::{
    self, align_to_register, Buffer, BufferAccess, BufferDesc, BufferUsage, CommandList,
    GraphicsDevice, Shader, ShaderDesc, ShaderStage, VariableReflection,
};
use crate::resource::material::ParamValue;

// ===== SHADER VARIABLE =====

/// Placement of a named variable inside one of the shader's constant buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderVariable {
    /// Index of the owning constant buffer
    pub buffer_index: usize,
    /// Byte offset inside the buffer
    pub offset: usize,
    /// Size in bytes
    pub size: usize,
}

// ===== CONSTANT BUFFER SLOT =====

/// CPU shadow + GPU buffer pair for one reflected constant buffer
struct ConstantBufferSlot {
    name: String,
    bind_slot: u32,
    shadow: Vec<u8>,
    gpu_buffer: Arc<dyn Buffer>,
    dirty: bool,
}

// ===== SIMPLE SHADER =====

/// One shader stage with name-addressable constant buffer variables
pub struct SimpleShader {
    shader: Arc<dyn Shader>,
    label: String,
    constant_buffers: Vec<ConstantBufferSlot>,
    buffer_names: FxHashMap<String, usize>,
    variables: FxHashMap<String, ShaderVariable>,
}

impl SimpleShader {
    /// Create the device shader and its constant buffers
    pub fn new(device: &Arc<Mutex<dyn GraphicsDevice>>, desc: ShaderDesc) -> Result<Self> {
        let label = desc.label.clone();
        let mut device = lock_device(device)?;
        let shader = device.create_shader(desc)?;

        let reflection = shader.reflection();
        let mut constant_buffers = Vec::with_capacity(reflection.constant_buffer_count());
        let mut buffer_names = FxHashMap::default();
        let mut variables: FxHashMap<String, ShaderVariable> = FxHashMap::default();

        for (buffer_index, cb) in reflection.constant_buffers().iter().enumerate() {
            // ========== VALIDATION ==========
            let out_of_bounds = |v: &&VariableReflection| {
                v.offset.checked_add(v.size).map_or(true, |end| end > cb.size)
            };
            if let Some(var) = cb.variables.iter().find(out_of_bounds) {
                engine_bail!("ember3d::SimpleShader",
                    "Shader '{}': variable '{}' ({}+{}) exceeds constant buffer '{}' ({} bytes)",
                    label, var.name, var.offset, var.size, cb.name, cb.size);
            }

            // ========== CREATE BUFFER ==========
            let size = align_to_register(cb.size.max(1));
            let gpu_buffer = device.create_buffer(
                BufferDesc {
                    size: size as u64,
                    usage: BufferUsage::Constant,
                    access: BufferAccess::Dynamic,
                    label: format!("{}/{}", label, cb.name),
                },
                None,
            )?;

            // ========== INDEX VARIABLES ==========
            for var in &cb.variables {
                if variables.contains_key(&var.name) {
                    engine_warn!("ember3d::SimpleShader",
                        "Shader '{}': variable '{}' declared again in '{}', keeping first",
                        label, var.name, cb.name);
                    continue;
                }
                variables.insert(var.name.clone(), ShaderVariable {
                    buffer_index,
                    offset: var.offset as usize,
                    size: var.size as usize,
                });
            }

            buffer_names.insert(cb.name.clone(), buffer_index);
            constant_buffers.push(ConstantBufferSlot {
                name: cb.name.clone(),
                bind_slot: cb.slot,
                shadow: vec![0u8; size as usize],
                gpu_buffer,
                dirty: false,
            });
        }

        engine_info!("ember3d::SimpleShader",
            "Shader '{}' ({:?}) ready: {} constant buffers, {} variables",
            label, shader.stage(), constant_buffers.len(), variables.len());

        Ok(Self {
            shader,
            label,
            constant_buffers,
            buffer_names,
            variables,
        })
    }

    /// Load compiled bytecode from disk and create the shader
    ///
    /// The file name becomes the shader label.
    pub fn from_file(
        device: &Arc<Mutex<dyn GraphicsDevice>>,
        path: impl AsRef<Path>,
        stage: ShaderStage,
    ) -> Result<Self> {
        let path = path.as_ref();
        let code = graphics_device::read_shader_binary(path)?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::new(device, ShaderDesc {
            code,
            stage,
            entry_point: "main".to_string(),
            label,
        })
    }

    // ===== ACCESSORS =====

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stage(&self) -> ShaderStage {
        self.shader.stage()
    }

    /// Underlying device shader
    pub fn shader(&self) -> &Arc<dyn Shader> {
        &self.shader
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn variable(&self, name: &str) -> Option<&ShaderVariable> {
        self.variables.get(name)
    }

    pub fn constant_buffer_count(&self) -> usize {
        self.constant_buffers.len()
    }

    /// Index of a constant buffer by its reflected name
    pub fn buffer_index(&self, name: &str) -> Option<usize> {
        self.buffer_names.get(name).copied()
    }

    /// Whether the shadow copy of buffer `index` holds unsent writes
    pub fn is_buffer_dirty(&self, index: usize) -> bool {
        self.constant_buffers.get(index).is_some_and(|slot| slot.dirty)
    }

    /// CPU shadow copy of buffer `index`
    pub fn shadow_data(&self, index: usize) -> Option<&[u8]> {
        self.constant_buffers.get(index).map(|slot| slot.shadow.as_slice())
    }

    // ===== SETTERS =====

    /// Copy raw bytes into a variable
    ///
    /// The byte count must equal the variable's reflected size; nothing is
    /// written otherwise.
    pub fn set_data(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let var = *self.variables.get(name).ok_or_else(|| Error::UnknownParameter {
            shader: self.label.clone(),
            name: name.to_string(),
        })?;

        if data.len() != var.size {
            return Err(Error::ParameterSizeMismatch {
                name: name.to_string(),
                expected: var.size,
                actual: data.len(),
            });
        }

        let slot = &mut self.constant_buffers[var.buffer_index];
        slot.shadow[var.offset..var.offset + var.size].copy_from_slice(data);
        slot.dirty = true;
        Ok(())
    }

    /// Zero every variable and mark all buffers dirty
    pub fn reset_parameters(&mut self) {
        for slot in &mut self.constant_buffers {
            slot.shadow.fill(0);
            slot.dirty = true;
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<()> {
        self.set_data(name, bytemuck::bytes_of(&value))
    }

    pub fn set_float2(&mut self, name: &str, value: Vec2) -> Result<()> {
        self.set_data(name, bytemuck::bytes_of(&value))
    }

    pub fn set_float3(&mut self, name: &str, value: Vec3) -> Result<()> {
        self.set_data(name, bytemuck::bytes_of(&value))
    }

    pub fn set_float4(&mut self, name: &str, value: Vec4) -> Result<()> {
        self.set_data(name, bytemuck::bytes_of(&value))
    }

    pub fn set_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.set_data(name, bytemuck::bytes_of(&value))
    }

    pub fn set_uint(&mut self, name: &str, value: u32) -> Result<()> {
        self.set_data(name, bytemuck::bytes_of(&value))
    }

    /// Write a matrix in column-major order (HLSL default packing)
    pub fn set_matrix4x4(&mut self, name: &str, value: Mat4) -> Result<()> {
        self.set_data(name, bytemuck::bytes_of(&value))
    }

    /// Write a material parameter value
    pub fn set_param(&mut self, name: &str, value: &ParamValue) -> Result<()> {
        match value {
            ParamValue::Float(v) => self.set_float(name, *v),
            ParamValue::Vec2(v) => self.set_float2(name, Vec2::from_array(*v)),
            ParamValue::Vec3(v) => self.set_float3(name, Vec3::from_array(*v)),
            ParamValue::Vec4(v) => self.set_float4(name, Vec4::from_array(*v)),
            ParamValue::Int(v) => self.set_int(name, *v),
            ParamValue::UInt(v) => self.set_uint(name, *v),
        }
    }

    // ===== UPLOAD =====

    /// Upload every dirty constant buffer, returning the number of uploads
    pub fn copy_all_buffer_data(&mut self) -> Result<u32> {
        let mut uploads = 0;
        for slot in self.constant_buffers.iter_mut().filter(|slot| slot.dirty) {
            slot.gpu_buffer.write(&slot.shadow)?;
            slot.dirty = false;
            uploads += 1;
        }
        if uploads > 0 {
            engine_trace!("ember3d::SimpleShader",
                "Shader '{}': uploaded {} constant buffers", self.label, uploads);
        }
        Ok(uploads)
    }

    /// Upload one constant buffer by name if it is dirty (returns 0 or 1)
    pub fn copy_buffer_data(&mut self, buffer_name: &str) -> Result<u32> {
        let index = match self.buffer_names.get(buffer_name) {
            Some(index) => *index,
            None => engine_bail!("ember3d::SimpleShader",
                "Shader '{}' has no constant buffer '{}'", self.label, buffer_name),
        };

        let slot = &mut self.constant_buffers[index];
        if !slot.dirty {
            return Ok(0);
        }
        slot.gpu_buffer.write(&slot.shadow)?;
        slot.dirty = false;
        Ok(1)
    }

    // ===== BIND =====

    /// Bind the shader program and its constant buffers to this stage
    ///
    /// Never uploads. Buffers still dirty here are bound with their previous
    /// GPU contents.
    pub fn set_shader(&self, cmd: &mut dyn CommandList) -> Result<()> {
        for slot in self.constant_buffers.iter().filter(|slot| slot.dirty) {
            engine_warn!("ember3d::SimpleShader",
                "Shader '{}': binding constant buffer '{}' with unsent writes",
                self.label, slot.name);
        }

        cmd.set_shader(&self.shader)?;
        let stage = self.shader.stage();
        for slot in &self.constant_buffers {
            cmd.bind_constant_buffer(stage, slot.bind_slot, &slot.gpu_buffer)?;
        }
        Ok(())
    }
}

/// Lock a shared shader, turning mutex poisoning into a backend error
pub(crate) fn lock_shader(shader: &Arc<Mutex<SimpleShader>>) -> Result<MutexGuard<'_, SimpleShader>> {
    shader
        .lock()
        .map_err(|_| Error::BackendError("Shader mutex poisoned".to_string()))
}

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
