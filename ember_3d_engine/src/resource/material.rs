/// Resource-level material type.
///
/// A Material describes a surface: a flat tint, a scalar roughness and any
/// number of extra named parameters, drawn with one vertex-stage and one
/// pixel-stage shader. It is immutable after creation and shared between
/// entities as `Arc<Material>`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use glam::Vec4;
use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::ShaderStage;
use crate::resource::shader::{lock_shader, SimpleShader};

// ===== PARAMETER VALUES =====

/// A typed parameter value for the material
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Float(f32),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    Int(i32),
    UInt(u32),
}

// ===== DESCRIPTOR =====

/// Material creation descriptor
pub struct MaterialDesc {
    pub tint: Vec4,
    /// Must lie in [0, 1]
    pub roughness: f32,
    pub vertex_shader: Arc<Mutex<SimpleShader>>,
    pub pixel_shader: Arc<Mutex<SimpleShader>>,
    /// Extra named parameters written to the pixel shader when it declares them
    pub params: Vec<(String, ParamValue)>,
}

// ===== MATERIAL =====

/// Material resource: tint, roughness, parameters and a shader pair
pub struct Material {
    tint: Vec4,
    roughness: f32,
    vertex_shader: Arc<Mutex<SimpleShader>>,
    pixel_shader: Arc<Mutex<SimpleShader>>,
    params: Vec<(String, ParamValue)>,
    param_names: FxHashMap<String, usize>,
}

impl Material {
    /// Create a material from a descriptor
    pub fn new(desc: MaterialDesc) -> Result<Self> {
        // ========== VALIDATION 1: Roughness range ==========
        if !(0.0..=1.0).contains(&desc.roughness) {
            engine_bail!("ember3d::Material",
                "Roughness {} outside [0, 1]", desc.roughness);
        }

        // ========== VALIDATION 2: Shader stages ==========
        let vertex_stage = lock_shader(&desc.vertex_shader)?.stage();
        if vertex_stage != ShaderStage::Vertex {
            engine_bail!("ember3d::Material",
                "Vertex shader slot holds a {:?} shader", vertex_stage);
        }
        let pixel_stage = lock_shader(&desc.pixel_shader)?.stage();
        if pixel_stage != ShaderStage::Pixel {
            engine_bail!("ember3d::Material",
                "Pixel shader slot holds a {:?} shader", pixel_stage);
        }

        // ========== VALIDATION 3: No duplicate param names ==========
        let mut seen_param_names = HashSet::new();
        for (param_name, _) in &desc.params {
            if !seen_param_names.insert(param_name) {
                engine_bail!("ember3d::Material",
                    "Duplicate parameter name '{}'", param_name);
            }
        }

        // ========== BUILD PARAMS ==========
        let param_names = desc.params
            .iter()
            .enumerate()
            .map(|(index, (name, _))| (name.clone(), index))
            .collect();

        Ok(Self {
            tint: desc.tint,
            roughness: desc.roughness,
            vertex_shader: desc.vertex_shader,
            pixel_shader: desc.pixel_shader,
            params: desc.params,
            param_names,
        })
    }

    // ===== ACCESSORS =====

    pub fn tint(&self) -> Vec4 {
        self.tint
    }

    pub fn roughness(&self) -> f32 {
        self.roughness
    }

    pub fn vertex_shader(&self) -> &Arc<Mutex<SimpleShader>> {
        &self.vertex_shader
    }

    pub fn pixel_shader(&self) -> &Arc<Mutex<SimpleShader>> {
        &self.pixel_shader
    }

    /// Extra parameter by name
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.param_names.get(name).map(|&index| &self.params[index].1)
    }

    /// Extra parameter by index (name, value)
    pub fn param_at(&self, index: usize) -> Option<(&str, &ParamValue)> {
        self.params.get(index).map(|(name, value)| (name.as_str(), value))
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// All extra parameters in declaration order
    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
