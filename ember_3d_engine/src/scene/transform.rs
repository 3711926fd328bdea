//! Local position / rotation / scale with a lazily rebuilt world matrix.
//!
//! Convention used everywhere in the engine: glam column vectors, left-handed
//! (+Z forward). The world matrix is `T * R * S`, which applied to a column
//! vector scales first, then rotates, then translates.
//!
//! Rotation is stored as pitch (X), yaw (Y) and roll (Z) Euler angles in
//! radians and applied roll first, then pitch, then yaw.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Spatial transform owned by an entity or a camera
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec3,
    pitch_yaw_roll: Vec3,
    scale: Vec3,
    world: Mat4,
    world_inverse_transpose: Mat4,
    dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            pitch_yaw_roll: Vec3::ZERO,
            scale: Vec3::ONE,
            world: Mat4::IDENTITY,
            world_inverse_transpose: Mat4::IDENTITY,
            dirty: false,
        }
    }
}

impl Transform {
    /// Identity transform (position 0, rotation 0, scale 1)
    pub fn new() -> Self {
        Self::default()
    }

    // ===== SETTERS =====

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
        self.dirty = true;
    }

    /// Set absolute Euler angles in radians
    pub fn set_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.pitch_yaw_roll = Vec3::new(pitch, yaw, roll);
        self.dirty = true;
    }

    pub fn set_scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale = Vec3::new(x, y, z);
        self.dirty = true;
    }

    // ===== TRANSFORMERS =====

    /// Move along the world axes
    pub fn move_absolute(&mut self, x: f32, y: f32, z: f32) {
        self.position += Vec3::new(x, y, z);
        self.dirty = true;
    }

    /// Move along the local axes (offset rotated by the current orientation)
    pub fn move_relative(&mut self, x: f32, y: f32, z: f32) {
        self.position += self.orientation() * Vec3::new(x, y, z);
        self.dirty = true;
    }

    /// Add Euler angle deltas in radians
    pub fn rotate(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.pitch_yaw_roll += Vec3::new(pitch, yaw, roll);
        self.dirty = true;
    }

    /// Multiply the current scale component-wise
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        self.scale *= Vec3::new(x, y, z);
        self.dirty = true;
    }

    // ===== GETTERS =====

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler angles (x = pitch, y = yaw, z = roll) in radians
    pub fn pitch_yaw_roll(&self) -> Vec3 {
        self.pitch_yaw_roll
    }

    pub fn get_scale(&self) -> Vec3 {
        self.scale
    }

    /// Current orientation as a quaternion
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.pitch_yaw_roll.y,
            self.pitch_yaw_roll.x,
            self.pitch_yaw_roll.z,
        )
    }

    /// Local +Z in world space
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::Z
    }

    /// Local +X in world space
    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::X
    }

    /// Local +Y in world space
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::Y
    }

    // ===== MATRICES =====

    /// World matrix, rebuilt first if any component changed
    pub fn world_matrix(&mut self) -> Mat4 {
        self.update_matrices();
        self.world
    }

    /// Inverse-transpose of the world matrix (for transforming normals)
    pub fn world_inverse_transpose_matrix(&mut self) -> Mat4 {
        self.update_matrices();
        self.world_inverse_transpose
    }

    fn update_matrices(&mut self) {
        if !self.dirty {
            return;
        }
        self.world = Mat4::from_scale_rotation_translation(
            self.scale,
            self.orientation(),
            self.position,
        );
        self.world_inverse_transpose = self.world.inverse().transpose();
        self.dirty = false;
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
