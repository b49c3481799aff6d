/// Draw-state types: clear masks, primitive modes, attribute slots and layouts

use bitflags::bitflags;

bitflags! {
    /// Buffers reset by `clear`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearMask: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Primitive assembly mode (the OpenGL ES 2.0 set)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineLoop,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

/// Numbered shader input channel consuming per-vertex data
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeSlot(pub u32);

impl AttributeSlot {
    pub const POSITION: AttributeSlot = AttributeSlot(0);
    pub const NORMAL: AttributeSlot = AttributeSlot(1);
    pub const COLOR: AttributeSlot = AttributeSlot(2);
    pub const TEX_COORD0: AttributeSlot = AttributeSlot(3);
    pub const TEX_COORD1: AttributeSlot = AttributeSlot(4);

    /// Slot index
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Float attribute layout inside a vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeLayout {
    /// Number of f32 components (1..=4)
    pub components: u32,
    /// Bytes between consecutive vertex records
    pub stride: u32,
    /// Byte offset of the attribute inside a record
    pub offset: u32,
}

/// Viewport / readback rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Rectangle anchored at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self { x: 0, y: 0, width, height }
    }
}
