/// GlowBuffer - OpenGL implementation of the Buffer trait

use gleu::{Buffer, BufferUsage};
use glow::HasContext;
use std::any::Any;
use std::rc::Rc;

/// OpenGL vertex buffer object
///
/// Deletes the buffer object on drop. The GL context must still be current
/// at that point.
pub struct GlowBuffer {
    /// Shared GL entry points
    gl: Rc<glow::Context>,
    /// Driver buffer name
    pub(crate) raw: glow::Buffer,
    /// Size in bytes
    size: u64,
    /// Usage hint
    usage: BufferUsage,
}

impl GlowBuffer {
    pub(crate) fn new(gl: Rc<glow::Context>, raw: glow::Buffer, size: u64, usage: BufferUsage) -> Self {
        Self { gl, raw, size, usage }
    }
}

impl Buffer for GlowBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlowBuffer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.raw);
        }
    }
}
