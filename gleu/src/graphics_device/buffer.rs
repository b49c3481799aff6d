/// Buffer trait and buffer descriptor

use std::any::Any;

/// Buffer usage hint
///
/// Tells the driver how often the contents will be re-uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Uploaded once, drawn many times
    Static,
    /// Re-uploaded often, drawn many times
    Dynamic,
    /// Uploaded once, drawn a few times
    Stream,
}

/// Descriptor for creating a vertex buffer
#[derive(Debug, Clone, Copy)]
pub struct BufferDesc<'a> {
    /// Bytes to upload (the whole slice is uploaded)
    pub data: &'a [u8],
    /// Usage hint
    pub usage: BufferUsage,
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types (e.g., GlowBuffer).
/// The driver buffer is released when dropped.
pub trait Buffer: Any {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Usage hint the buffer was created with
    fn usage(&self) -> BufferUsage;

    /// Backend downcasting
    fn as_any(&self) -> &dyn Any;
}
