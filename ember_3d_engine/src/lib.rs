/*!
# Ember 3D Engine

Core types for a minimal real-time 3D renderer.

The crate sits between scene data and the graphics device. The device itself
(window, swapchain, shader compilation) is an external collaborator reached
through the traits in [`graphics_device`]; everything above it is implemented
here.

## Architecture

- **GraphicsDevice / CommandList / Surface**: Opaque device capabilities
- **Mesh**: Immutable GPU vertex/index buffers for one static mesh
- **SimpleShader**: Named shader parameters packed into constant buffers
- **Material**: Tint, roughness and a vertex/pixel shader pair
- **Transform / Camera**: World, view and projection matrices
- **Entity / Scene / SceneRenderer**: Per-frame draw composition
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod input;
pub mod camera;
pub mod resource;
pub mod scene;

// Shared fixtures for unit tests (mock device, standard shaders, meshes)
#[cfg(test)]
mod test_utils;

// Main ember3d namespace module
pub mod ember3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine (logging hub)
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Graphics device sub-module
    pub mod render {
        pub use crate::graphics_device::*;
    }

    // Input sub-module
    pub mod input {
        pub use crate::input::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
