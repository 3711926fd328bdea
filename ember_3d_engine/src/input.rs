//! Keyboard and mouse state for one frame.
//!
//! The windowing layer feeds winit events into an [`InputState`]; the camera
//! reads it during `Camera::update`. Call [`InputState::end_frame`] once per
//! frame after the update so mouse movement is not applied twice.

use rustc_hash::FxHashSet;

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

/// State of the keyboard and mouse at a given moment
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys_down: FxHashSet<KeyCode>,
    mouse_buttons: FxHashSet<MouseButton>,
    mouse_pos: Option<(f64, f64)>,
    /// movement accumulated since the last `end_frame`
    mouse_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press or release
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Record a mouse button press or release
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.mouse_buttons.insert(button);
        } else {
            self.mouse_buttons.remove(&button);
        }
    }

    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// Update the cursor position (window coordinates)
    ///
    /// The first position only establishes the reference point.
    pub fn set_mouse_position(&mut self, x: f64, y: f64) {
        if let Some((px, py)) = self.mouse_pos {
            self.mouse_delta.0 += (x - px) as f32;
            self.mouse_delta.1 += (y - py) as f32;
        }
        self.mouse_pos = Some((x, y));
    }

    /// Last recorded cursor position, if any
    pub fn mouse_position(&self) -> Option<(f64, f64)> {
        self.mouse_pos
    }

    /// Cursor movement in pixels since the last `end_frame`
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.mouse_delta
    }

    /// Reset per-frame state (mouse delta); held keys and buttons persist
    pub fn end_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
