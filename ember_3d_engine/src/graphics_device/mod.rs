/// Graphics device module - the traits the renderer core drives the GPU through

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod shader;
pub mod pipeline;
pub mod command_list;
pub mod surface;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use shader::*;
pub use pipeline::*;
pub use command_list::*;
pub use surface::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
