#![allow(dead_code)]
//! Test fixtures shared by the unit tests: a mock device with the standard
//! vertex/pixel shader reflections registered, plus small meshes and materials.

use std::sync::{Arc, Mutex};
use glam::Vec4;
use crate::graphics_device::mock_graphics_device::MockGraphicsDevice;
use crate::graphics_device::{
    ConstantBufferReflection, GraphicsDevice, ParamType, ShaderDesc, ShaderReflection, ShaderStage,
};
use crate::resource::{Material, MaterialDesc, Mesh, ParamValue, SimpleShader, Vertex};

pub const VS_LABEL: &str = "VertexShader.cso";
pub const PS_LABEL: &str = "PixelShader.cso";

/// `cbuffer ExternalData : register(b0) { world; view; projection; worldInverseTranspose; }`
pub fn vertex_reflection() -> ShaderReflection {
    ShaderReflection::new(vec![ConstantBufferReflection::packed("ExternalData", 0, &[
        ("world", ParamType::Mat4),
        ("view", ParamType::Mat4),
        ("projection", ParamType::Mat4),
        ("worldInverseTranspose", ParamType::Mat4),
    ])])
}

/// `cbuffer ExternalData : register(b0) { float4 colorTint; float roughness; }`
pub fn pixel_reflection() -> ShaderReflection {
    ShaderReflection::new(vec![ConstantBufferReflection::packed("ExternalData", 0, &[
        ("colorTint", ParamType::Vec4),
        ("roughness", ParamType::Float),
    ])])
}

/// Mock device knowing the standard vertex and pixel shaders
pub fn mock_device() -> (Arc<Mutex<MockGraphicsDevice>>, Arc<Mutex<dyn GraphicsDevice>>) {
    MockGraphicsDevice::new()
        .with_reflection(VS_LABEL, vertex_reflection())
        .with_reflection(PS_LABEL, pixel_reflection())
        .into_shared()
}

pub fn shader_desc(label: &str, stage: ShaderStage) -> ShaderDesc {
    ShaderDesc {
        code: vec![0x44, 0x58, 0x42, 0x43],
        stage,
        entry_point: "main".to_string(),
        label: label.to_string(),
    }
}

pub fn create_shader(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
    label: &str,
    stage: ShaderStage,
) -> Arc<Mutex<SimpleShader>> {
    Arc::new(Mutex::new(SimpleShader::new(device, shader_desc(label, stage)).unwrap()))
}

pub fn triangle_data() -> (Vec<Vertex>, Vec<u32>) {
    let n = [0.0, 0.0, -1.0];
    let vertices = vec![
        Vertex::new([0.0, 1.0, 0.0], n, [0.5, 0.0]),
        Vertex::new([1.0, -1.0, 0.0], n, [1.0, 1.0]),
        Vertex::new([-1.0, -1.0, 0.0], n, [0.0, 1.0]),
    ];
    (vertices, vec![0, 1, 2])
}

/// Unit quad centered on the origin, facing -Z
pub fn quad_data() -> (Vec<Vertex>, Vec<u32>) {
    let n = [0.0, 0.0, -1.0];
    let vertices = vec![
        Vertex::new([-0.5, 0.5, 0.0], n, [0.0, 0.0]),
        Vertex::new([0.5, 0.5, 0.0], n, [1.0, 0.0]),
        Vertex::new([0.5, -0.5, 0.0], n, [1.0, 1.0]),
        Vertex::new([-0.5, -0.5, 0.0], n, [0.0, 1.0]),
    ];
    (vertices, vec![0, 1, 2, 0, 2, 3])
}

pub fn quad_mesh(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Arc<Mesh> {
    let (vertices, indices) = quad_data();
    Arc::new(Mesh::new(device, &vertices, &indices).unwrap())
}

/// Material using the standard shaders with the given tint
pub fn material_with(
    device: &Arc<Mutex<dyn GraphicsDevice>>,
    tint: Vec4,
    params: Vec<(String, ParamValue)>,
) -> Arc<Material> {
    Arc::new(Material::new(MaterialDesc {
        tint,
        roughness: 0.5,
        vertex_shader: create_shader(device, VS_LABEL, ShaderStage::Vertex),
        pixel_shader: create_shader(device, PS_LABEL, ShaderStage::Pixel),
        params,
    }).unwrap())
}

pub fn red_material(device: &Arc<Mutex<dyn GraphicsDevice>>) -> Arc<Material> {
    material_with(device, Vec4::new(1.0, 0.0, 0.0, 1.0), Vec::new())
}
