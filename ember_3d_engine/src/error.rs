//! Error types for the Ember3D engine
//!
//! This module defines the error types used throughout the engine,
//! including device, resource, shader-parameter and model-loading failures.

use std::fmt;

/// Result type for Ember3D engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ember3D engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Direct3D, Vulkan, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (buffer, shader, mesh, material, etc.)
    InvalidResource(String),

    /// Initialization failed (device, shader loading, subsystems)
    InitializationFailed(String),

    /// A shader parameter name is not declared by any constant buffer
    UnknownParameter {
        /// Shader label
        shader: String,
        /// Requested parameter name
        name: String,
    },

    /// A shader parameter was written with the wrong number of bytes
    ParameterSizeMismatch {
        /// Parameter name
        name: String,
        /// Size declared by the shader reflection
        expected: usize,
        /// Size of the provided value
        actual: usize,
    },

    /// Malformed model file
    ModelLoad {
        /// 1-based source line (0 when the error is not tied to a line)
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// File system error (message of the underlying io::Error)
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::UnknownParameter { shader, name } => {
                write!(f, "Unknown shader parameter '{}' in shader '{}'", name, shader)
            }
            Error::ParameterSizeMismatch { name, expected, actual } => write!(
                f,
                "Shader parameter '{}' expects {} bytes, got {}",
                name, expected, actual
            ),
            Error::ModelLoad { line, message } => {
                if *line > 0 {
                    write!(f, "Model load error (line {}): {}", line, message)
                } else {
                    write!(f, "Model load error: {}", message)
                }
            }
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

// ===== ERROR MACROS =====

/// Build an `Error::InvalidResource`, logging it at ERROR severity
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("ember3d::Mesh", "Index {} out of range", index);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::ember3d::Error::InvalidResource(message)
    }};
}

/// Return early with an `Error::InvalidResource`, logging it at ERROR severity
///
/// # Example
///
/// ```ignore
/// engine_bail!("ember3d::Mesh", "Mesh has no vertices");
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
