/// ViewController - host callback contract
///
/// The host (window loop, test harness) calls `setup` once, then
/// `render_frame` on every display refresh.

use crate::error::Result;

/// Lifecycle of a view controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewControllerState {
    /// Created, `setup` not yet run
    Uninitialized,
    /// Resources built, frames can be rendered
    Ready,
}

pub trait ViewController {
    /// Build GPU resources. Called once before the first frame.
    fn setup(&mut self) -> Result<()>;

    /// Render one frame into the current drawable
    fn render_frame(&mut self) -> Result<()>;

    /// Drawable size changed (physical pixels)
    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let _ = (width, height);
        Ok(())
    }

    fn state(&self) -> ViewControllerState;
}
