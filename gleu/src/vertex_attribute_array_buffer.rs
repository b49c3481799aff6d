/// VertexAttributeArrayBuffer - uploaded vertex data plus attribute setup and draw
///
/// Holds data for any one vertex attribute (positions, normals, colors, texture
/// coordinates). Vertex data is uploaded once at construction; the driver
/// buffer is released when the wrapper is dropped.

use crate::context::Context;
use crate::error::{Error, Result};
use crate::graphics_device::{
    AttributeLayout, AttributeSlot, Buffer, BufferDesc, BufferUsage, GraphicsDevice, PrimitiveMode,
};

const SOURCE: &str = "gleu::VertexAttributeArrayBuffer";

/// Size of one float component in bytes
const COMPONENT_SIZE: u32 = std::mem::size_of::<f32>() as u32;

pub struct VertexAttributeArrayBuffer {
    buffer: Box<dyn Buffer>,
    stride: u32,
    vertex_count: u32,
    usage: BufferUsage,
}

impl VertexAttributeArrayBuffer {
    /// Upload `vertex_count` records of `stride` bytes from `data`
    ///
    /// Exactly `stride * vertex_count` bytes are uploaded; trailing bytes in
    /// `data` are ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if stride or count is zero, or `data` is too short
    /// - allocation errors from the device (`OutOfMemory`, `BackendError`)
    pub fn new<D: GraphicsDevice>(
        context: &mut Context<D>,
        stride: u32,
        vertex_count: u32,
        data: &[u8],
        usage: BufferUsage,
    ) -> Result<Self> {
        if stride == 0 || vertex_count == 0 {
            crate::gleu_error!(SOURCE, "Refusing empty buffer (stride {}, {} vertices)", stride, vertex_count);
            return Err(Error::InvalidResource(format!(
                "Vertex buffer needs a non-zero stride and vertex count (stride {}, count {})",
                stride, vertex_count
            )));
        }

        let size = u64::from(stride) * u64::from(vertex_count);
        if (data.len() as u64) < size {
            crate::gleu_error!(
                SOURCE,
                "Vertex data is {} bytes, {} vertices of stride {} need {}",
                data.len(),
                vertex_count,
                stride,
                size
            );
            return Err(Error::InvalidResource(format!(
                "Vertex data too short: {} bytes provided, {} required",
                data.len(),
                size
            )));
        }

        let buffer = context.device_mut().create_buffer(BufferDesc {
            data: &data[..size as usize],
            usage,
        })?;
        context.check_error("create vertex buffer")?;

        crate::gleu_debug!(
            SOURCE,
            "Uploaded {} vertices ({} bytes, {:?})",
            vertex_count,
            size,
            usage
        );

        Ok(Self {
            buffer,
            stride,
            vertex_count,
            usage,
        })
    }

    /// Upload a slice of plain vertex records (`stride = size_of::<T>()`)
    pub fn from_vertices<D, T>(context: &mut Context<D>, vertices: &[T], usage: BufferUsage) -> Result<Self>
    where
        D: GraphicsDevice,
        T: bytemuck::Pod,
    {
        let stride = std::mem::size_of::<T>() as u32;
        let vertex_count = u32::try_from(vertices.len())
            .map_err(|_| Error::InvalidResource(format!("Too many vertices: {}", vertices.len())))?;
        Self::new(context, stride, vertex_count, bytemuck::cast_slice(vertices), usage)
    }

    /// Bind the buffer and point `attribute` at `components` floats per record
    ///
    /// When `enable` is true the attribute slot is enabled first. Binding state
    /// on the device is changed; callers must not assume earlier bindings persist.
    pub fn prepare_to_draw<D: GraphicsDevice>(
        &self,
        context: &mut Context<D>,
        attribute: AttributeSlot,
        components: u32,
        offset: u32,
        enable: bool,
    ) -> Result<()> {
        let max = context.device().max_vertex_attributes();
        if attribute.index() >= max {
            crate::gleu_error!(SOURCE, "Attribute slot {} over device limit {}", attribute.index(), max);
            return Err(Error::InvalidAttribute {
                slot: attribute.index(),
                max,
            });
        }

        if !(1..=4).contains(&components) {
            crate::gleu_error!(
                SOURCE,
                "Attribute slot {} needs 1..=4 components, got {}",
                attribute.index(),
                components
            );
            return Err(Error::InvalidResource(format!(
                "Attribute component count must be 1..=4, got {}",
                components
            )));
        }

        if u64::from(offset) + u64::from(components * COMPONENT_SIZE) > u64::from(self.stride) {
            crate::gleu_error!(
                SOURCE,
                "Attribute slot {} at offset {} with {} components overruns stride {}",
                attribute.index(),
                offset,
                components,
                self.stride
            );
            return Err(Error::InvalidResource(format!(
                "Attribute at offset {} with {} components does not fit in stride {}",
                offset, components, self.stride
            )));
        }

        let device = context.device_mut();
        device.bind_vertex_buffer(self.buffer.as_ref())?;
        if enable {
            device.enable_vertex_attribute(attribute)?;
        }
        device.vertex_attribute_pointer(
            attribute,
            AttributeLayout {
                components,
                stride: self.stride,
                offset,
            },
        )?;

        context.check_error("prepare vertex attribute")
    }

    /// Draw `count` vertices starting at `first`
    ///
    /// `prepare_to_draw` must have been called for every attribute the current
    /// program reads. A zero `count` issues nothing.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` when `first + count` exceeds the uploaded vertex count.
    /// Nothing is forwarded to the device in that case.
    pub fn draw<D: GraphicsDevice>(
        &self,
        context: &mut Context<D>,
        mode: PrimitiveMode,
        first: u32,
        count: u32,
    ) -> Result<()> {
        if u64::from(first) + u64::from(count) > u64::from(self.vertex_count) {
            crate::gleu_error!(
                SOURCE,
                "Draw range [{}, {}) exceeds {} vertices",
                first,
                u64::from(first) + u64::from(count),
                self.vertex_count
            );
            return Err(Error::OutOfBounds {
                first,
                count,
                vertex_count: self.vertex_count,
            });
        }

        if count == 0 {
            return Ok(());
        }

        context.device_mut().draw_arrays(mode, first, count)?;
        context.check_error("draw vertex array")
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    pub fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Uploaded size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.buffer.size()
    }
}

#[cfg(test)]
#[path = "vertex_attribute_array_buffer_tests.rs"]
mod tests;
