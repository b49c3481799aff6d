/// Program trait and program descriptor

use std::any::Any;

use crate::graphics_device::AttributeSlot;

/// Descriptor for creating a shader program
///
/// Sources are GLSL ES 1.00 bodies without a `#version` line; the backend
/// prepends the header matching the context it runs on.
#[derive(Debug, Clone, Copy)]
pub struct ProgramDesc<'a> {
    /// Debug name
    pub name: &'a str,
    /// Vertex shader source
    pub vertex_source: &'a str,
    /// Fragment shader source
    pub fragment_source: &'a str,
    /// Attribute names bound to fixed slots before linking
    pub attribute_bindings: &'a [(AttributeSlot, &'a str)],
}

/// Linked shader program
///
/// The driver program is released when dropped.
pub trait Program: Any {
    /// Debug name
    fn name(&self) -> &str;

    /// Backend downcasting
    fn as_any(&self) -> &dyn Any;
}
