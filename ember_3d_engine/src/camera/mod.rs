//! Camera module - free-fly camera driving the view and projection matrices.
//!
//! The engine does NOT store cameras. They are owned and driven by the
//! caller and handed to the scene when drawing.

mod camera;

pub use camera::{Camera, CameraDesc};
