/// Camera - free-fly viewpoint with cached view and projection matrices.
///
/// The camera owns its pose as a [`Transform`]. The pose is only changed
/// through the camera, and every change rebuilds the view matrix; the
/// projection is rebuilt only when the aspect ratio, field of view or clip
/// planes change. Getters never recompute.
///
/// Conventions: left-handed, +Z forward, depth in [0, 1].

use std::f32::consts::FRAC_PI_2;
use glam::{Mat4, Vec3};
use crate::input::{InputState, KeyCode, MouseButton};
use crate::scene::Transform;

// ===== DESCRIPTOR =====

/// Lens and controller settings for a camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDesc {
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// World units per second
    pub movement_speed: f32,
    /// Radians per pixel of mouse movement
    pub mouse_look_speed: f32,
    /// Speed multiplier while Shift is held
    pub fast_multiplier: f32,
    /// Speed multiplier while Control is held
    pub slow_multiplier: f32,
}

impl Default for CameraDesc {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.01,
            far: 1000.0,
            movement_speed: 3.0,
            mouse_look_speed: 0.005,
            fast_multiplier: 5.0,
            slow_multiplier: 0.1,
        }
    }
}

// ===== CAMERA =====

#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,
    view_matrix: Mat4,
    projection_matrix: Mat4,
    aspect_ratio: f32,
    fov_y: f32,
    near: f32,
    far: f32,
    movement_speed: f32,
    mouse_look_speed: f32,
    fast_multiplier: f32,
    slow_multiplier: f32,
}

impl Camera {
    /// Create a camera at `position` looking down +Z
    pub fn new(aspect_ratio: f32, position: Vec3, desc: CameraDesc) -> Self {
        let mut transform = Transform::new();
        transform.set_position(position.x, position.y, position.z);

        let mut camera = Self {
            transform,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
            aspect_ratio,
            fov_y: desc.fov_y,
            near: desc.near,
            far: desc.far,
            movement_speed: desc.movement_speed,
            mouse_look_speed: desc.mouse_look_speed,
            fast_multiplier: desc.fast_multiplier,
            slow_multiplier: desc.slow_multiplier,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix(aspect_ratio);
        camera
    }

    // ===== PER-FRAME UPDATE =====

    /// Apply one frame of keyboard/mouse control, then rebuild the view
    ///
    /// W/S move along the view direction, A/D strafe, Space/X move along
    /// world Y. Shift speeds up, Control slows down. Holding the left mouse
    /// button turns the mouse delta into yaw and pitch.
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let mut speed = self.movement_speed * dt;
        if input.is_key_down(KeyCode::ShiftLeft) || input.is_key_down(KeyCode::ShiftRight) {
            speed *= self.fast_multiplier;
        }
        if input.is_key_down(KeyCode::ControlLeft) || input.is_key_down(KeyCode::ControlRight) {
            speed *= self.slow_multiplier;
        }

        if input.is_key_down(KeyCode::KeyW) { self.transform.move_relative(0.0, 0.0, speed); }
        if input.is_key_down(KeyCode::KeyS) { self.transform.move_relative(0.0, 0.0, -speed); }
        if input.is_key_down(KeyCode::KeyA) { self.transform.move_relative(-speed, 0.0, 0.0); }
        if input.is_key_down(KeyCode::KeyD) { self.transform.move_relative(speed, 0.0, 0.0); }
        if input.is_key_down(KeyCode::Space) { self.transform.move_absolute(0.0, speed, 0.0); }
        if input.is_key_down(KeyCode::KeyX) { self.transform.move_absolute(0.0, -speed, 0.0); }

        if input.is_button_down(MouseButton::Left) {
            let (dx, dy) = input.mouse_delta();
            self.transform.rotate(dy * self.mouse_look_speed, dx * self.mouse_look_speed, 0.0);

            let rotation = self.transform.pitch_yaw_roll();
            let pitch = rotation.x.clamp(-FRAC_PI_2, FRAC_PI_2);
            if pitch != rotation.x {
                self.transform.set_rotation(pitch, rotation.y, rotation.z);
            }
        }

        self.update_view_matrix();
    }

    /// Rebuild the view matrix from the current pose
    pub fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_to_lh(
            self.transform.position(),
            self.transform.forward(),
            self.transform.up(),
        );
    }

    /// Rebuild the projection matrix for a new aspect ratio
    pub fn update_projection_matrix(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.projection_matrix = Mat4::perspective_lh(self.fov_y, aspect_ratio, self.near, self.far);
    }

    // ===== POSE =====

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.transform.set_position(x, y, z);
        self.update_view_matrix();
    }

    /// Set pitch, yaw and roll in radians
    pub fn set_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.transform.set_rotation(pitch, yaw, roll);
        self.update_view_matrix();
    }

    /// Move along world axes
    pub fn move_absolute(&mut self, x: f32, y: f32, z: f32) {
        self.transform.move_absolute(x, y, z);
        self.update_view_matrix();
    }

    /// Move along the camera's own axes
    pub fn move_relative(&mut self, x: f32, y: f32, z: f32) {
        self.transform.move_relative(x, y, z);
        self.update_view_matrix();
    }

    pub fn rotate(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.transform.rotate(pitch, yaw, roll);
        self.update_view_matrix();
    }

    // ===== LENS SETTERS =====

    /// Set the vertical field of view (radians) and rebuild the projection
    pub fn set_fov(&mut self, fov_y: f32) {
        self.fov_y = fov_y;
        self.update_projection_matrix(self.aspect_ratio);
    }

    /// Set the near/far clip distances and rebuild the projection
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
        self.update_projection_matrix(self.aspect_ratio);
    }

    // ===== GETTERS =====

    pub fn view(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn projection(&self) -> Mat4 {
        self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view)
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn fov(&self) -> f32 {
        self.fov_y
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
