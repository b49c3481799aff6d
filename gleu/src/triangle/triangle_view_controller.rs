use glam::Vec4;

use crate::base_effect::BaseEffect;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::graphics_device::{AttributeSlot, BufferUsage, ClearMask, Config, GraphicsDevice, PrimitiveMode};
use crate::triangle::geometry::equilateral_triangle;
use crate::vertex_attribute_array_buffer::VertexAttributeArrayBuffer;
use crate::view_controller::{ViewController, ViewControllerState};

const SOURCE: &str = "gleu::TriangleViewController";

/// Components per position record (x, y)
const POSITION_COMPONENTS: u32 = 2;

/// Triangle sample configuration
#[derive(Debug, Clone)]
pub struct TriangleConfig {
    pub clear_color: Vec4,
    pub triangle_color: Vec4,
    /// Circumradius in normalized device coordinates
    pub radius: f32,
}

impl Default for TriangleConfig {
    fn default() -> Self {
        Self {
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            triangle_color: Vec4::ONE,
            radius: 0.5,
        }
    }
}

/// Resources built by `setup`; dropped before the context
struct TriangleResources {
    vertex_buffer: VertexAttributeArrayBuffer,
    effect: BaseEffect,
    position_slot: AttributeSlot,
}

/// Draws one triangle per frame
pub struct TriangleViewController<D: GraphicsDevice> {
    // Field order matters: resources release their driver objects through the
    // device owned by `context`, so they must drop first.
    resources: Option<TriangleResources>,
    context: Context<D>,
    config: TriangleConfig,
}

impl<D: GraphicsDevice> TriangleViewController<D> {
    pub fn new(device: D, device_config: Config, config: TriangleConfig) -> Self {
        Self {
            resources: None,
            context: Context::new(device, device_config),
            config,
        }
    }

    pub fn context(&self) -> &Context<D> {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context<D> {
        &mut self.context
    }

    pub fn config(&self) -> &TriangleConfig {
        &self.config
    }

    /// Number of vertices uploaded by `setup` (0 before setup)
    pub fn vertex_count(&self) -> u32 {
        self.resources
            .as_ref()
            .map(|r| r.vertex_buffer.vertex_count())
            .unwrap_or(0)
    }
}

impl<D: GraphicsDevice> ViewController for TriangleViewController<D> {
    fn setup(&mut self) -> Result<()> {
        if self.resources.is_some() {
            return Err(Error::InvalidState("setup already ran".to_string()));
        }

        self.context.set_clear_color(self.config.clear_color);

        let effect = BaseEffect::new(&mut self.context, self.config.triangle_color)?;
        let vertices = equilateral_triangle(self.config.radius);
        let vertex_buffer =
            VertexAttributeArrayBuffer::from_vertices(&mut self.context, &vertices, BufferUsage::Static)?;

        crate::gleu_info!(
            SOURCE,
            "Triangle ready ({} vertices, stride {} bytes)",
            vertex_buffer.vertex_count(),
            vertex_buffer.stride()
        );

        self.resources = Some(TriangleResources {
            vertex_buffer,
            effect,
            position_slot: AttributeSlot::POSITION,
        });
        Ok(())
    }

    fn render_frame(&mut self) -> Result<()> {
        let Some(resources) = self.resources.as_ref() else {
            return Err(Error::InvalidState("render_frame called before setup".to_string()));
        };
        let context = &mut self.context;

        context.device_mut().reset_stats();
        context.clear(ClearMask::COLOR | ClearMask::DEPTH)?;

        resources.effect.prepare_to_draw(context)?;
        resources.vertex_buffer.prepare_to_draw(
            context,
            resources.position_slot,
            POSITION_COMPONENTS,
            0,
            true,
        )?;
        resources.vertex_buffer.draw(
            context,
            PrimitiveMode::Triangles,
            0,
            resources.vertex_buffer.vertex_count(),
        )
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        crate::gleu_debug!(SOURCE, "Viewport {}x{}", width, height);
        self.context.set_viewport(width, height)
    }

    fn state(&self) -> ViewControllerState {
        if self.resources.is_some() {
            ViewControllerState::Ready
        } else {
            ViewControllerState::Uninitialized
        }
    }
}

#[cfg(test)]
#[path = "triangle_view_controller_tests.rs"]
mod tests;
