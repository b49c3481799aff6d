/*!
# GLEU - OpenGL Extended Utility

Small wrappers that reduce the number of raw graphics calls an application has
to make to clear a drawable and draw vertex data.

The graphics driver is reached only through the [`GraphicsDevice`] trait, so the
wrappers never touch hidden "current context" state: the [`Context`] owns the
device and is passed explicitly to every operation that talks to the driver.

## Architecture

- **GraphicsDevice**: driver capability trait (buffers, attributes, draws, clears)
- **Context**: owns the device, adds a stored clear color and a one-call clear
- **VertexAttributeArrayBuffer**: uploaded vertex data + attribute setup + draw
- **BaseEffect**: constant-color shader program
- **TriangleViewController**: setup/render hooks that draw one white triangle

Backends (e.g. `gleu_renderer_glow`) provide concrete `GraphicsDevice` types.
*/

mod error;
pub mod log;
pub mod graphics_device;
pub mod context;
pub mod vertex_attribute_array_buffer;
pub mod base_effect;
pub mod view_controller;
pub mod triangle;

// Error types
pub use crate::error::{Error, Result};

// Core wrappers
pub use crate::graphics_device::*;
pub use crate::context::Context;
pub use crate::vertex_attribute_array_buffer::VertexAttributeArrayBuffer;
pub use crate::base_effect::BaseEffect;
pub use crate::view_controller::{ViewController, ViewControllerState};
pub use crate::triangle::{TriangleConfig, TriangleViewController};

// Re-export math library at crate root
pub use glam;
