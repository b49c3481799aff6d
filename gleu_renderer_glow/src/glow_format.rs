/// Conversions from GLEU enums to OpenGL constants

use gleu::{BufferUsage, ClearMask, PrimitiveMode};

pub(crate) fn buffer_usage_to_gl(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => glow::STATIC_DRAW,
        BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
        BufferUsage::Stream => glow::STREAM_DRAW,
    }
}

pub(crate) fn primitive_mode_to_gl(mode: PrimitiveMode) -> u32 {
    match mode {
        PrimitiveMode::Points => glow::POINTS,
        PrimitiveMode::Lines => glow::LINES,
        PrimitiveMode::LineLoop => glow::LINE_LOOP,
        PrimitiveMode::LineStrip => glow::LINE_STRIP,
        PrimitiveMode::Triangles => glow::TRIANGLES,
        PrimitiveMode::TriangleStrip => glow::TRIANGLE_STRIP,
        PrimitiveMode::TriangleFan => glow::TRIANGLE_FAN,
    }
}

pub(crate) fn clear_mask_to_gl(mask: ClearMask) -> u32 {
    let mut bits = 0;
    if mask.contains(ClearMask::COLOR) {
        bits |= glow::COLOR_BUFFER_BIT;
    }
    if mask.contains(ClearMask::DEPTH) {
        bits |= glow::DEPTH_BUFFER_BIT;
    }
    if mask.contains(ClearMask::STENCIL) {
        bits |= glow::STENCIL_BUFFER_BIT;
    }
    bits
}

/// `#version` line for GLSL ES 1.00 bodies on the running context
///
/// Desktop contexts get GLSL 1.20, which accepts the same
/// `attribute`/`gl_FragColor` syntax.
pub(crate) fn shader_header(is_embedded: bool) -> &'static str {
    if is_embedded {
        "#version 100\n"
    } else {
        "#version 120\n"
    }
}
