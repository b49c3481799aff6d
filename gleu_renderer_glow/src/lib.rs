/*!
# GLEU - glow backend

OpenGL ES 2.0 / desktop OpenGL 2.1 implementation of the `gleu::GraphicsDevice`
trait, using the glow bindings.

The caller creates the GL context (glutin, SDL, a browser canvas, ...), makes it
current, loads a `glow::Context` from it and hands that to
[`GlowGraphicsDevice::new`].
*/

mod glow_graphics_device;
mod glow_buffer;
mod glow_program;
mod glow_format;
mod glow_debug;

pub use glow_graphics_device::GlowGraphicsDevice;
pub use glow_buffer::GlowBuffer;
pub use glow_program::GlowProgram;
