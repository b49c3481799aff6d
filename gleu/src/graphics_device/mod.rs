/// Graphics device module - the driver capability and the types it speaks

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod program;
pub mod draw;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use program::*;
pub use draw::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
