/// BaseEffect - constant-color shader program
///
/// Reads positions from `AttributeSlot::POSITION` (2 or more components, z and
/// w default to 0 and 1) and fills every fragment with one color.

use glam::Vec4;

use crate::context::Context;
use crate::error::Result;
use crate::graphics_device::{AttributeSlot, GraphicsDevice, Program, ProgramDesc};

pub const POSITION_ATTRIBUTE: &str = "a_position";
pub const COLOR_UNIFORM: &str = "u_constant_color";

const VERTEX_SOURCE: &str = "\
attribute vec4 a_position;

void main() {
    gl_Position = a_position;
}
";

const FRAGMENT_SOURCE: &str = "\
#ifdef GL_ES
precision mediump float;
#endif

uniform vec4 u_constant_color;

void main() {
    gl_FragColor = u_constant_color;
}
";

pub struct BaseEffect {
    program: Box<dyn Program>,
    constant_color: Vec4,
}

impl BaseEffect {
    pub fn new<D: GraphicsDevice>(context: &mut Context<D>, constant_color: Vec4) -> Result<Self> {
        let program = context.device_mut().create_program(ProgramDesc {
            name: "gleu_base_effect",
            vertex_source: VERTEX_SOURCE,
            fragment_source: FRAGMENT_SOURCE,
            attribute_bindings: &[(AttributeSlot::POSITION, POSITION_ATTRIBUTE)],
        })?;
        context.check_error("create base effect")?;

        Ok(Self {
            program,
            constant_color,
        })
    }

    pub fn constant_color(&self) -> Vec4 {
        self.constant_color
    }

    pub fn set_constant_color(&mut self, color: Vec4) {
        self.constant_color = color;
    }

    /// Make the program current and upload the constant color
    pub fn prepare_to_draw<D: GraphicsDevice>(&self, context: &mut Context<D>) -> Result<()> {
        let device = context.device_mut();
        device.use_program(self.program.as_ref())?;
        device.set_uniform_vec4(self.program.as_ref(), COLOR_UNIFORM, self.constant_color)?;
        context.check_error("prepare base effect")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics_device::mock_graphics_device::{MockCommand, MockGraphicsDevice};
    use crate::graphics_device::Config;

    #[test]
    fn test_prepare_uses_program_and_uploads_color() {
        let device = MockGraphicsDevice::new();
        let probe = device.clone();
        let mut context = Context::new(device, Config::default());

        let mut effect = BaseEffect::new(&mut context, Vec4::ONE).unwrap();
        effect.set_constant_color(Vec4::new(1.0, 0.0, 0.0, 1.0));
        probe.clear_commands();

        effect.prepare_to_draw(&mut context).unwrap();

        assert_eq!(
            probe.commands(),
            vec![
                MockCommand::UseProgram { name: "gleu_base_effect".to_string() },
                MockCommand::SetUniformVec4 {
                    name: COLOR_UNIFORM.to_string(),
                    value: Vec4::new(1.0, 0.0, 0.0, 1.0),
                },
            ]
        );
    }

    #[test]
    fn test_sources_reference_bound_names() {
        assert!(VERTEX_SOURCE.contains(POSITION_ATTRIBUTE));
        assert!(FRAGMENT_SOURCE.contains(COLOR_UNIFORM));
        assert!(!VERTEX_SOURCE.contains("#version"));
    }

    #[test]
    fn test_drop_releases_program() {
        let device = MockGraphicsDevice::new();
        let probe = device.clone();
        let mut context = Context::new(device, Config::default());

        let effect = BaseEffect::new(&mut context, Vec4::ONE).unwrap();
        assert_eq!(probe.live_program_count(), 1);
        drop(effect);
        assert_eq!(probe.live_program_count(), 0);
    }
}
