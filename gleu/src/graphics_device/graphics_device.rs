/// GraphicsDevice trait - the explicit stand-in for a current GL context

use glam::Vec4;

use crate::error::Result;
use crate::graphics_device::{
    AttributeLayout, AttributeSlot, Buffer, BufferDesc, ClearMask, PrimitiveMode, Program,
    ProgramDesc, Viewport,
};

// ============================================================================
// Configuration
// ============================================================================

/// Which driver debug messages are forwarded to the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSeverity {
    /// Only errors
    ErrorsOnly,
    /// Errors and warnings (performance, deprecated behavior, ...)
    ErrorsAndWarnings,
    /// Everything the driver reports, notifications included
    All,
}

/// Device configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Install the driver debug output callback (backend feature permitting)
    pub enable_debug_output: bool,
    /// Filter applied to driver debug output
    pub debug_severity: DebugSeverity,
    /// Poll the driver error queue after each wrapper operation
    pub check_errors: bool,
    /// Application name (used in log messages)
    pub app_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_debug_output: cfg!(debug_assertions),
            debug_severity: DebugSeverity::ErrorsAndWarnings,
            check_errors: cfg!(debug_assertions),
            app_name: "GLEU Application".to_string(),
        }
    }
}

// ============================================================================
// Statistics and driver errors
// ============================================================================

/// Device statistics, accumulated since the last `reset_stats()`
///
/// Counters saturate instead of wrapping when a host never resets them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceStats {
    /// Number of draw calls issued
    pub draw_calls: u32,
    /// Number of vertices submitted by draw calls
    pub vertices: u64,
    /// Number of clear calls issued
    pub clears: u32,
    /// Bytes uploaded into buffers
    pub bytes_uploaded: u64,
}

/// Error code drained from the driver error queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverErrorCode {
    InvalidEnum,
    InvalidValue,
    InvalidOperation,
    InvalidFramebufferOperation,
    OutOfMemory,
    ContextLost,
    /// Any code without a dedicated variant
    Other(u32),
}

impl DriverErrorCode {
    /// Raw OpenGL error value
    pub fn code(&self) -> u32 {
        match self {
            DriverErrorCode::InvalidEnum => 0x0500,
            DriverErrorCode::InvalidValue => 0x0501,
            DriverErrorCode::InvalidOperation => 0x0502,
            DriverErrorCode::OutOfMemory => 0x0505,
            DriverErrorCode::InvalidFramebufferOperation => 0x0506,
            DriverErrorCode::ContextLost => 0x0507,
            DriverErrorCode::Other(code) => *code,
        }
    }

    /// Map a raw OpenGL error value (`GL_NO_ERROR` maps to `None`)
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => None,
            0x0500 => Some(DriverErrorCode::InvalidEnum),
            0x0501 => Some(DriverErrorCode::InvalidValue),
            0x0502 => Some(DriverErrorCode::InvalidOperation),
            0x0505 => Some(DriverErrorCode::OutOfMemory),
            0x0506 => Some(DriverErrorCode::InvalidFramebufferOperation),
            0x0507 => Some(DriverErrorCode::ContextLost),
            other => Some(DriverErrorCode::Other(other)),
        }
    }
}

// ============================================================================
// GraphicsDevice trait
// ============================================================================

/// Graphics driver capability
///
/// Owns the driver connection (for OpenGL, the current context). Every call
/// changes global driver state; callers must not assume earlier bindings persist
/// across calls made by someone else.
///
/// Resources are returned as boxed trait objects and release their driver
/// object when dropped.
pub trait GraphicsDevice {
    /// Allocate a vertex buffer and upload `desc.data`
    fn create_buffer(&mut self, desc: BufferDesc<'_>) -> Result<Box<dyn Buffer>>;

    /// Bind a buffer as the current vertex (array) buffer
    fn bind_vertex_buffer(&mut self, buffer: &dyn Buffer) -> Result<()>;

    /// Enable a vertex attribute slot
    fn enable_vertex_attribute(&mut self, slot: AttributeSlot) -> Result<()>;

    /// Configure a vertex attribute slot to read floats from the bound buffer
    fn vertex_attribute_pointer(&mut self, slot: AttributeSlot, layout: AttributeLayout) -> Result<()>;

    /// Draw `count` vertices starting at `first`
    fn draw_arrays(&mut self, mode: PrimitiveMode, first: u32, count: u32) -> Result<()>;

    /// Set the driver clear color
    fn set_clear_color(&mut self, color: Vec4);

    /// Clear the buffers selected by `mask`
    fn clear(&mut self, mask: ClearMask);

    /// Set the viewport rectangle
    fn set_viewport(&mut self, viewport: Viewport);

    /// Compile and link a shader program
    fn create_program(&mut self, desc: ProgramDesc<'_>) -> Result<Box<dyn Program>>;

    /// Make a program current
    fn use_program(&mut self, program: &dyn Program) -> Result<()>;

    /// Upload a vec4 uniform to a program (the program must be current)
    fn set_uniform_vec4(&mut self, program: &dyn Program, name: &str, value: Vec4) -> Result<()>;

    /// Number of vertex attribute slots the device supports
    fn max_vertex_attributes(&self) -> u32;

    /// Read back RGBA8 pixels of the color buffer
    fn read_pixels(&mut self, region: Viewport) -> Result<Vec<u8>>;

    /// Drain one pending driver error, if any
    fn poll_error(&mut self) -> Option<DriverErrorCode>;

    /// Statistics accumulated since the last reset
    fn stats(&self) -> DeviceStats;

    /// Reset statistics
    fn reset_stats(&mut self);
}
