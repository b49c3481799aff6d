//! Error types for GLEU
//!
//! Every driver-facing operation returns a [`Result`]. Driver error codes that
//! raw OpenGL leaves in its error queue are surfaced here instead.

use std::fmt;

/// Result type for GLEU operations
pub type Result<T> = std::result::Result<T, Error>;

/// GLEU errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Backend-specific error (glow, mock, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource descriptor (stride, data size, component count, ...)
    InvalidResource(String),

    /// Initialization failed (device, shaders, window)
    InitializationFailed(String),

    /// Vertex attribute slot is not supported by the device
    InvalidAttribute {
        /// Requested slot
        slot: u32,
        /// Number of attribute slots the device exposes
        max: u32,
    },

    /// Draw range extends past the uploaded vertices
    OutOfBounds {
        /// First vertex of the requested range
        first: u32,
        /// Number of vertices requested
        count: u32,
        /// Number of vertices uploaded in the buffer
        vertex_count: u32,
    },

    /// Operation called in the wrong lifecycle state
    InvalidState(String),

    /// The graphics context was lost
    ContextLost,

    /// Unmapped driver error code reported after an operation
    DriverError {
        /// Raw driver error code
        code: u32,
        /// Operation after which the error was observed
        operation: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidAttribute { slot, max } => {
                write!(f, "Invalid vertex attribute slot {} (device supports {})", slot, max)
            }
            Error::OutOfBounds { first, count, vertex_count } => write!(
                f,
                "Draw range [{}, {}) exceeds vertex count {}",
                first,
                u64::from(*first) + u64::from(*count),
                vertex_count
            ),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::ContextLost => write!(f, "Graphics context lost"),
            Error::DriverError { code, operation } => {
                write!(f, "Driver error 0x{:04X} after {}", code, operation)
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
