/// GlowGraphicsDevice - OpenGL implementation of GraphicsDevice

use gleu::{
    AttributeLayout, AttributeSlot, Buffer, BufferDesc, ClearMask, Config, DeviceStats,
    DriverErrorCode, Error, GraphicsDevice, PrimitiveMode, Program, ProgramDesc, Result, Viewport,
};
use glam::Vec4;
use glow::HasContext;
use std::rc::Rc;

use crate::glow_buffer::GlowBuffer;
use crate::glow_format::{buffer_usage_to_gl, clear_mask_to_gl, primitive_mode_to_gl, shader_header};
use crate::glow_program::GlowProgram;

/// OpenGL graphics device
///
/// Wraps a `glow::Context` whose GL context is current on the calling thread.
/// Buffers and programs share the context through an `Rc`, so they can only
/// live on this thread.
pub struct GlowGraphicsDevice {
    /// GL entry points, shared with resources
    gl: Rc<glow::Context>,
    /// `#version` line prepended to every shader stage
    shader_header: &'static str,
    /// Number of vertex attribute slots
    max_vertex_attributes: u32,
    /// Vertex array object bound for the device lifetime (3.x+ contexts only)
    vertex_array: Option<glow::VertexArray>,
    /// Statistics since the last reset
    stats: DeviceStats,
}

impl GlowGraphicsDevice {
    /// Create a device over a loaded, current GL context
    ///
    /// # Arguments
    ///
    /// * `gl` - glow context loaded from the current GL context
    /// * `config` - debug output settings (requires the `gl-debug` feature)
    pub fn new(gl: glow::Context, config: &Config) -> Result<Self> {
        #[allow(unused_mut)]
        let mut gl = gl;

        #[cfg(feature = "gl-debug")]
        if config.enable_debug_output {
            crate::glow_debug::install(&mut gl, config.debug_severity);
        }
        #[cfg(not(feature = "gl-debug"))]
        if config.enable_debug_output {
            gleu::gleu_debug!(
                "gleu::glow",
                "Debug output requested but gleu_renderer_glow was built without 'gl-debug'"
            );
        }

        let version = gl.version();
        let is_embedded = version.is_embedded;
        let needs_vertex_array = version.major >= 3;

        let max_vertex_attributes =
            u32::try_from(unsafe { gl.get_parameter_i32(glow::MAX_VERTEX_ATTRIBS) }).unwrap_or(0);
        if max_vertex_attributes == 0 {
            return Err(Error::InitializationFailed(
                "GL context reports no vertex attribute slots".to_string(),
            ));
        }

        // Core profiles reject attribute setup without a bound vertex array
        let vertex_array = if needs_vertex_array {
            let vao = unsafe { gl.create_vertex_array() }.map_err(Error::InitializationFailed)?;
            unsafe { gl.bind_vertex_array(Some(vao)) };
            Some(vao)
        } else {
            None
        };

        gleu::gleu_info!(
            "gleu::glow",
            "OpenGL{} {}.{} ({}), {} vertex attribute slots",
            if is_embedded { " ES" } else { "" },
            version.major,
            version.minor,
            unsafe { gl.get_parameter_string(glow::RENDERER) },
            max_vertex_attributes
        );

        Ok(Self {
            gl: Rc::new(gl),
            shader_header: shader_header(is_embedded),
            max_vertex_attributes,
            vertex_array,
            stats: DeviceStats::default(),
        })
    }

    /// Shared GL entry points, for callers that need raw access
    pub fn gl(&self) -> &Rc<glow::Context> {
        &self.gl
    }

    fn downcast_buffer<'a>(buffer: &'a dyn Buffer) -> Result<&'a GlowBuffer> {
        buffer
            .as_any()
            .downcast_ref::<GlowBuffer>()
            .ok_or_else(|| Error::InvalidResource("Buffer was not created by a glow device".to_string()))
    }

    fn downcast_program<'a>(program: &'a dyn Program) -> Result<&'a GlowProgram> {
        program
            .as_any()
            .downcast_ref::<GlowProgram>()
            .ok_or_else(|| Error::InvalidResource("Program was not created by a glow device".to_string()))
    }

    fn compile_shader(&self, stage: u32, stage_name: &str, program_name: &str, body: &str) -> Result<glow::Shader> {
        let gl = &self.gl;
        unsafe {
            let shader = gl.create_shader(stage).map_err(Error::BackendError)?;
            let source = format!("{}{}", self.shader_header, body);
            gl.shader_source(shader, &source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let info = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                gleu::gleu_error!(
                    "gleu::glow",
                    "{} shader of '{}' failed to compile: {}",
                    stage_name,
                    program_name,
                    info
                );
                return Err(Error::InitializationFailed(format!(
                    "{} shader of '{}' failed to compile: {}",
                    stage_name, program_name, info
                )));
            }
            Ok(shader)
        }
    }
}

impl GraphicsDevice for GlowGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc<'_>) -> Result<Box<dyn Buffer>> {
        let gl = &self.gl;
        let raw = unsafe { gl.create_buffer() }.map_err(Error::BackendError)?;

        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(raw));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, desc.data, buffer_usage_to_gl(desc.usage));
        }

        let size = desc.data.len() as u64;
        self.stats.bytes_uploaded = self.stats.bytes_uploaded.saturating_add(size);

        Ok(Box::new(GlowBuffer::new(Rc::clone(&self.gl), raw, size, desc.usage)))
    }

    fn bind_vertex_buffer(&mut self, buffer: &dyn Buffer) -> Result<()> {
        let buffer = Self::downcast_buffer(buffer)?;
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer.raw));
        }
        Ok(())
    }

    fn enable_vertex_attribute(&mut self, slot: AttributeSlot) -> Result<()> {
        unsafe {
            self.gl.enable_vertex_attrib_array(slot.index());
        }
        Ok(())
    }

    fn vertex_attribute_pointer(&mut self, slot: AttributeSlot, layout: AttributeLayout) -> Result<()> {
        let size = i32::try_from(layout.components)
            .map_err(|_| Error::InvalidResource(format!("{} components", layout.components)))?;
        let stride = i32::try_from(layout.stride)
            .map_err(|_| Error::InvalidResource(format!("Stride {} too large", layout.stride)))?;
        let offset = i32::try_from(layout.offset)
            .map_err(|_| Error::InvalidResource(format!("Offset {} too large", layout.offset)))?;

        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(slot.index(), size, glow::FLOAT, false, stride, offset);
        }
        Ok(())
    }

    fn draw_arrays(&mut self, mode: PrimitiveMode, first: u32, count: u32) -> Result<()> {
        let first_i32 = i32::try_from(first)
            .map_err(|_| Error::InvalidResource(format!("First vertex {} too large", first)))?;
        let count_i32 = i32::try_from(count)
            .map_err(|_| Error::InvalidResource(format!("Vertex count {} too large", count)))?;

        unsafe {
            self.gl.draw_arrays(primitive_mode_to_gl(mode), first_i32, count_i32);
        }

        self.stats.draw_calls = self.stats.draw_calls.saturating_add(1);
        self.stats.vertices = self.stats.vertices.saturating_add(u64::from(count));
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) {
        unsafe {
            self.gl.clear_color(color.x, color.y, color.z, color.w);
        }
    }

    fn clear(&mut self, mask: ClearMask) {
        unsafe {
            self.gl.clear(clear_mask_to_gl(mask));
        }
        self.stats.clears = self.stats.clears.saturating_add(1);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        let width = i32::try_from(viewport.width).unwrap_or(i32::MAX);
        let height = i32::try_from(viewport.height).unwrap_or(i32::MAX);
        unsafe {
            self.gl.viewport(viewport.x, viewport.y, width, height);
        }
    }

    fn create_program(&mut self, desc: ProgramDesc<'_>) -> Result<Box<dyn Program>> {
        if desc.vertex_source.is_empty() || desc.fragment_source.is_empty() {
            return Err(Error::InitializationFailed(format!(
                "Program '{}' is missing a shader stage",
                desc.name
            )));
        }

        let vertex = self.compile_shader(glow::VERTEX_SHADER, "Vertex", desc.name, desc.vertex_source)?;
        let fragment = match self.compile_shader(glow::FRAGMENT_SHADER, "Fragment", desc.name, desc.fragment_source) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { self.gl.delete_shader(vertex) };
                return Err(e);
            }
        };

        let gl = &self.gl;
        let raw = unsafe { gl.create_program() };
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                unsafe {
                    gl.delete_shader(vertex);
                    gl.delete_shader(fragment);
                }
                return Err(Error::BackendError(e));
            }
        };

        let linked = unsafe {
            gl.attach_shader(raw, vertex);
            gl.attach_shader(raw, fragment);
            for (slot, name) in desc.attribute_bindings {
                gl.bind_attrib_location(raw, slot.index(), name);
            }
            gl.link_program(raw);

            // Shaders are owned by the program once linked
            gl.detach_shader(raw, vertex);
            gl.detach_shader(raw, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            gl.get_program_link_status(raw)
        };

        if !linked {
            let info = unsafe { gl.get_program_info_log(raw) };
            unsafe { gl.delete_program(raw) };
            gleu::gleu_error!("gleu::glow", "Program '{}' failed to link: {}", desc.name, info);
            return Err(Error::InitializationFailed(format!(
                "Program '{}' failed to link: {}",
                desc.name, info
            )));
        }

        gleu::gleu_debug!("gleu::glow", "Linked program '{}'", desc.name);
        Ok(Box::new(GlowProgram::new(Rc::clone(&self.gl), raw, desc.name)))
    }

    fn use_program(&mut self, program: &dyn Program) -> Result<()> {
        let program = Self::downcast_program(program)?;
        unsafe {
            self.gl.use_program(Some(program.raw));
        }
        Ok(())
    }

    fn set_uniform_vec4(&mut self, program: &dyn Program, name: &str, value: Vec4) -> Result<()> {
        let program = Self::downcast_program(program)?;
        let location = program.uniform_location(name);
        unsafe {
            self.gl
                .uniform_4_f32(location.as_ref(), value.x, value.y, value.z, value.w);
        }
        Ok(())
    }

    fn max_vertex_attributes(&self) -> u32 {
        self.max_vertex_attributes
    }

    fn read_pixels(&mut self, region: Viewport) -> Result<Vec<u8>> {
        let width = i32::try_from(region.width)
            .map_err(|_| Error::InvalidResource(format!("Width {} too large", region.width)))?;
        let height = i32::try_from(region.height)
            .map_err(|_| Error::InvalidResource(format!("Height {} too large", region.height)))?;

        let mut pixels = vec![0u8; region.width as usize * region.height as usize * 4];
        unsafe {
            self.gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
            self.gl.read_pixels(
                region.x,
                region.y,
                width,
                height,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut pixels),
            );
        }
        Ok(pixels)
    }

    fn poll_error(&mut self) -> Option<DriverErrorCode> {
        let code = unsafe { self.gl.get_error() };
        DriverErrorCode::from_code(code)
    }

    fn stats(&self) -> DeviceStats {
        self.stats
    }

    fn reset_stats(&mut self) {
        self.stats = DeviceStats::default();
    }
}

impl Drop for GlowGraphicsDevice {
    fn drop(&mut self) {
        if let Some(vao) = self.vertex_array.take() {
            unsafe {
                self.gl.bind_vertex_array(None);
                self.gl.delete_vertex_array(vao);
            }
        }
    }
}
