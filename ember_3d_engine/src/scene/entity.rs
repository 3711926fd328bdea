/// Entity - one drawable object: a transform, a shared mesh and a shared material.
///
/// `draw` is self-contained: it pushes the object's matrices and material
/// values into the material's shaders, uploads them, binds both shader stages
/// and issues the mesh's indexed draw.

use std::sync::Arc;
use crate::camera::Camera;
use crate::error::Result;
use crate::engine_bail;
use crate::graphics_device::CommandList;
use crate::resource::shader::lock_shader;
use crate::resource::{Material, Mesh};
use super::transform::Transform;

pub struct Entity {
    transform: Transform,
    mesh: Arc<Mesh>,
    material: Arc<Material>,
}

impl Entity {
    /// Create an entity with an identity transform
    pub fn new(mesh: Arc<Mesh>, material: Arc<Material>) -> Self {
        Self {
            transform: Transform::new(),
            mesh,
            material,
        }
    }

    // ===== ACCESSORS =====

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    // ===== DRAW =====

    /// Record this entity's draw into `cmd` as seen from `camera`
    ///
    /// Vertex stage parameters: `world`, `view`, `projection` (required) and
    /// `worldInverseTranspose` (when declared). Pixel stage parameters:
    /// `colorTint` or `tint` (one is required), `roughness` and every extra
    /// material parameter the shader declares. Pixel variables the material
    /// does not supply are uploaded as zero.
    pub fn draw(&mut self, cmd: &mut dyn CommandList, camera: &Camera) -> Result<()> {
        let world = self.transform.world_matrix();
        let world_inverse_transpose = self.transform.world_inverse_transpose_matrix();

        let mut vertex_shader = lock_shader(self.material.vertex_shader())?;
        let mut pixel_shader = lock_shader(self.material.pixel_shader())?;

        // ========== VERTEX STAGE ==========
        vertex_shader.set_matrix4x4("world", world)?;
        vertex_shader.set_matrix4x4("view", camera.view())?;
        vertex_shader.set_matrix4x4("projection", camera.projection())?;
        if vertex_shader.has_variable("worldInverseTranspose") {
            vertex_shader.set_matrix4x4("worldInverseTranspose", world_inverse_transpose)?;
        }

        // ========== PIXEL STAGE ==========
        // Materials sharing this shader must not see each other's values
        pixel_shader.reset_parameters();
        let tint_name = if pixel_shader.has_variable("colorTint") {
            "colorTint"
        } else if pixel_shader.has_variable("tint") {
            "tint"
        } else {
            engine_bail!("ember3d::Entity",
                "Pixel shader '{}' declares neither 'colorTint' nor 'tint'", pixel_shader.label());
        };
        pixel_shader.set_float4(tint_name, self.material.tint())?;
        if pixel_shader.has_variable("roughness") {
            pixel_shader.set_float("roughness", self.material.roughness())?;
        }
        for (name, value) in self.material.params() {
            if pixel_shader.has_variable(name) {
                pixel_shader.set_param(name, value)?;
            }
        }

        // ========== UPLOAD + BIND ==========
        vertex_shader.copy_all_buffer_data()?;
        pixel_shader.copy_all_buffer_data()?;
        vertex_shader.set_shader(cmd)?;
        pixel_shader.set_shader(cmd)?;

        self.mesh.draw(cmd)
    }
}

#[cfg(test)]
#[path = "entity_tests.rs"]
mod tests;
