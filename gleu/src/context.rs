/// Context - owns the graphics device and adds a stored clear color
///
/// Replaces the "set clear color, then clear" driver sequence with a single
/// `clear(mask)` call. The context is the explicit capability every GLEU
/// wrapper receives instead of reaching for a thread-bound current context.

use glam::Vec4;

use crate::error::{Error, Result};
use crate::graphics_device::{ClearMask, Config, DriverErrorCode, GraphicsDevice, Viewport};

const MAX_DRAINED_ERRORS: usize = 16;

pub struct Context<D: GraphicsDevice> {
    device: D,
    config: Config,
    clear_color: Vec4,
}

impl<D: GraphicsDevice> Context<D> {
    /// Wrap a device. The clear color starts as `(0, 0, 0, 0)`.
    pub fn new(device: D, config: Config) -> Self {
        crate::gleu_debug!(
            "gleu::Context",
            "Context created for '{}' ({} vertex attributes)",
            config.app_name,
            device.max_vertex_attributes()
        );
        Self {
            device,
            config,
            clear_color: Vec4::ZERO,
        }
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Vec4) {
        self.clear_color = color;
    }

    /// Set the driver clear color to the stored value, then clear `mask`
    pub fn clear(&mut self, mask: ClearMask) -> Result<()> {
        self.device.set_clear_color(self.clear_color);
        self.device.clear(mask);
        self.check_error("clear")
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        self.device.set_viewport(Viewport::from_size(width, height));
        self.check_error("set_viewport")
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Release the context and return the device
    pub fn into_device(self) -> D {
        self.device
    }

    /// Surface a pending driver error raised by `operation`
    ///
    /// Does nothing when `Config::check_errors` is off. Only the first pending
    /// error is reported; the rest of the queue is drained and logged.
    pub fn check_error(&mut self, operation: &str) -> Result<()> {
        if !self.config.check_errors {
            return Ok(());
        }

        let Some(first) = self.device.poll_error() else {
            return Ok(());
        };

        // Bounded: a lost context may keep reporting the same code
        for extra in std::iter::from_fn(|| self.device.poll_error()).take(MAX_DRAINED_ERRORS) {
            crate::gleu_warn!(
                "gleu::Context",
                "Additional driver error 0x{:04X} after {}",
                extra.code(),
                operation
            );
        }

        let error = match first {
            DriverErrorCode::OutOfMemory => Error::OutOfMemory,
            DriverErrorCode::ContextLost => Error::ContextLost,
            other => Error::DriverError {
                code: other.code(),
                operation: operation.to_string(),
            },
        };
        crate::gleu_error!("gleu::Context", "{} failed: {}", operation, error);
        Err(error)
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
