/// GlowProgram - OpenGL implementation of the Program trait

use gleu::Program;
use glow::HasContext;
use rustc_hash::FxHashMap;
use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

/// Linked OpenGL shader program
///
/// Uniform locations are looked up once per name and cached; unknown names
/// are cached as `None` (GL silently ignores uploads to location -1).
pub struct GlowProgram {
    gl: Rc<glow::Context>,
    pub(crate) raw: glow::Program,
    name: String,
    uniform_locations: RefCell<FxHashMap<String, Option<glow::UniformLocation>>>,
}

impl GlowProgram {
    pub(crate) fn new(gl: Rc<glow::Context>, raw: glow::Program, name: &str) -> Self {
        Self {
            gl,
            raw,
            name: name.to_string(),
            uniform_locations: RefCell::new(FxHashMap::default()),
        }
    }

    pub(crate) fn uniform_location(&self, name: &str) -> Option<glow::UniformLocation> {
        let mut cache = self.uniform_locations.borrow_mut();
        if let Some(location) = cache.get(name) {
            return location.clone();
        }

        let location = unsafe { self.gl.get_uniform_location(self.raw, name) };
        if location.is_none() {
            gleu::gleu_warn!(
                "gleu::glow",
                "Uniform '{}' not found in program '{}'",
                name,
                self.name
            );
        }
        cache.insert(name.to_string(), location.clone());
        location
    }
}

impl Program for GlowProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlowProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.raw);
        }
    }
}
