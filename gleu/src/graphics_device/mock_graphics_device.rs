/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every driver call, tracks live buffers and programs so release on
/// drop is observable, and simulates an RGBA8 color buffer for clear/readback.
/// Clones share state, so a test can keep a probe after the device has been
/// moved into a `Context`.

use std::any::Any;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec4;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::graphics_device::{
    AttributeLayout, AttributeSlot, Buffer, BufferDesc, BufferUsage, ClearMask, DeviceStats,
    DriverErrorCode, GraphicsDevice, PrimitiveMode, Program, ProgramDesc, Viewport,
};

new_key_type! {
    pub struct MockBufferKey;
    pub struct MockProgramKey;
}

/// A recorded driver call
#[derive(Debug, Clone, PartialEq)]
pub enum MockCommand {
    CreateBuffer { size: u64, usage: BufferUsage },
    DeleteBuffer { size: u64 },
    BindVertexBuffer { size: u64 },
    EnableVertexAttribute(AttributeSlot),
    VertexAttributePointer { slot: AttributeSlot, layout: AttributeLayout },
    DrawArrays { mode: PrimitiveMode, first: u32, count: u32 },
    SetClearColor(Vec4),
    Clear(ClearMask),
    SetViewport(Viewport),
    CreateProgram { name: String },
    DeleteProgram { name: String },
    UseProgram { name: String },
    SetUniformVec4 { name: String, value: Vec4 },
}

#[derive(Debug)]
struct MockState {
    commands: Vec<MockCommand>,
    buffers: SlotMap<MockBufferKey, Vec<u8>>,
    programs: SlotMap<MockProgramKey, String>,
    clear_color: Vec4,
    width: u32,
    height: u32,
    color_buffer: Vec<u8>,
    max_vertex_attributes: u32,
    pending_errors: VecDeque<DriverErrorCode>,
    fail_next_allocation: bool,
    stats: DeviceStats,
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub key: MockBufferKey,
    pub size: u64,
    pub usage: BufferUsage,
    state: Rc<RefCell<MockState>>,
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockBuffer {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.buffers.remove(self.key);
        state.commands.push(MockCommand::DeleteBuffer { size: self.size });
    }
}

// ============================================================================
// Mock Program
// ============================================================================

#[derive(Debug)]
pub struct MockProgram {
    pub key: MockProgramKey,
    pub name: String,
    state: Rc<RefCell<MockState>>,
}

impl Program for MockProgram {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for MockProgram {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.programs.remove(self.key);
        state.commands.push(MockCommand::DeleteProgram { name: self.name.clone() });
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockGraphicsDevice {
    state: Rc<RefCell<MockState>>,
}

impl MockGraphicsDevice {
    /// Device with a 4x4 color buffer and 8 attribute slots
    pub fn new() -> Self {
        Self::with_size(4, 4)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(MockState {
                commands: Vec::new(),
                buffers: SlotMap::with_key(),
                programs: SlotMap::with_key(),
                clear_color: Vec4::ZERO,
                width,
                height,
                color_buffer: vec![0; (width * height * 4) as usize],
                max_vertex_attributes: 8,
                pending_errors: VecDeque::new(),
                fail_next_allocation: false,
                stats: DeviceStats::default(),
            })),
        }
    }

    // ===== INSPECTION =====

    pub fn commands(&self) -> Vec<MockCommand> {
        self.state.borrow().commands.clone()
    }

    pub fn clear_commands(&self) {
        self.state.borrow_mut().commands.clear();
    }

    /// Recorded draw calls as `(mode, first, count)`
    pub fn draw_calls(&self) -> Vec<(PrimitiveMode, u32, u32)> {
        self.state
            .borrow()
            .commands
            .iter()
            .filter_map(|cmd| match cmd {
                MockCommand::DrawArrays { mode, first, count } => Some((*mode, *first, *count)),
                _ => None,
            })
            .collect()
    }

    pub fn live_buffer_count(&self) -> usize {
        self.state.borrow().buffers.len()
    }

    pub fn live_program_count(&self) -> usize {
        self.state.borrow().programs.len()
    }

    /// Uploaded contents of a live buffer
    pub fn buffer_data(&self, key: MockBufferKey) -> Option<Vec<u8>> {
        self.state.borrow().buffers.get(key).cloned()
    }

    pub fn current_clear_color(&self) -> Vec4 {
        self.state.borrow().clear_color
    }

    // ===== FAULT INJECTION =====

    pub fn set_max_vertex_attributes(&self, max: u32) {
        self.state.borrow_mut().max_vertex_attributes = max;
    }

    pub fn fail_next_allocation(&self) {
        self.state.borrow_mut().fail_next_allocation = true;
    }

    pub fn push_error(&self, code: DriverErrorCode) {
        self.state.borrow_mut().pending_errors.push_back(code);
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

fn color_to_rgba8(color: Vec4) -> [u8; 4] {
    let c = (color.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8, c.w as u8]
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc<'_>) -> Result<Box<dyn Buffer>> {
        let mut state = self.state.borrow_mut();
        if state.fail_next_allocation {
            state.fail_next_allocation = false;
            return Err(Error::OutOfMemory);
        }

        let size = desc.data.len() as u64;
        let key = state.buffers.insert(desc.data.to_vec());
        state.commands.push(MockCommand::CreateBuffer { size, usage: desc.usage });
        state.stats.bytes_uploaded = state.stats.bytes_uploaded.saturating_add(size);

        Ok(Box::new(MockBuffer {
            key,
            size,
            usage: desc.usage,
            state: self.state.clone(),
        }))
    }

    fn bind_vertex_buffer(&mut self, buffer: &dyn Buffer) -> Result<()> {
        let mock = buffer
            .as_any()
            .downcast_ref::<MockBuffer>()
            .ok_or_else(|| Error::InvalidResource("Buffer does not belong to the mock device".to_string()))?;

        let mut state = self.state.borrow_mut();
        if !state.buffers.contains_key(mock.key) {
            return Err(Error::InvalidResource("Buffer was deleted".to_string()));
        }
        state.commands.push(MockCommand::BindVertexBuffer { size: mock.size });
        Ok(())
    }

    fn enable_vertex_attribute(&mut self, slot: AttributeSlot) -> Result<()> {
        self.state.borrow_mut().commands.push(MockCommand::EnableVertexAttribute(slot));
        Ok(())
    }

    fn vertex_attribute_pointer(&mut self, slot: AttributeSlot, layout: AttributeLayout) -> Result<()> {
        self.state
            .borrow_mut()
            .commands
            .push(MockCommand::VertexAttributePointer { slot, layout });
        Ok(())
    }

    fn draw_arrays(&mut self, mode: PrimitiveMode, first: u32, count: u32) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.commands.push(MockCommand::DrawArrays { mode, first, count });
        state.stats.draw_calls = state.stats.draw_calls.saturating_add(1);
        state.stats.vertices = state.stats.vertices.saturating_add(u64::from(count));
        Ok(())
    }

    fn set_clear_color(&mut self, color: Vec4) {
        let mut state = self.state.borrow_mut();
        state.clear_color = color;
        state.commands.push(MockCommand::SetClearColor(color));
    }

    fn clear(&mut self, mask: ClearMask) {
        let mut state = self.state.borrow_mut();
        if mask.contains(ClearMask::COLOR) {
            let rgba = color_to_rgba8(state.clear_color);
            for pixel in state.color_buffer.chunks_exact_mut(4) {
                pixel.copy_from_slice(&rgba);
            }
        }
        state.commands.push(MockCommand::Clear(mask));
        state.stats.clears = state.stats.clears.saturating_add(1);
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.state.borrow_mut().commands.push(MockCommand::SetViewport(viewport));
    }

    fn create_program(&mut self, desc: ProgramDesc<'_>) -> Result<Box<dyn Program>> {
        if desc.vertex_source.trim().is_empty() || desc.fragment_source.trim().is_empty() {
            return Err(Error::InitializationFailed(format!(
                "Program '{}' has an empty shader stage",
                desc.name
            )));
        }

        let mut state = self.state.borrow_mut();
        let key = state.programs.insert(desc.name.to_string());
        state.commands.push(MockCommand::CreateProgram { name: desc.name.to_string() });

        Ok(Box::new(MockProgram {
            key,
            name: desc.name.to_string(),
            state: self.state.clone(),
        }))
    }

    fn use_program(&mut self, program: &dyn Program) -> Result<()> {
        self.state
            .borrow_mut()
            .commands
            .push(MockCommand::UseProgram { name: program.name().to_string() });
        Ok(())
    }

    fn set_uniform_vec4(&mut self, _program: &dyn Program, name: &str, value: Vec4) -> Result<()> {
        self.state
            .borrow_mut()
            .commands
            .push(MockCommand::SetUniformVec4 { name: name.to_string(), value });
        Ok(())
    }

    fn max_vertex_attributes(&self) -> u32 {
        self.state.borrow().max_vertex_attributes
    }

    fn read_pixels(&mut self, region: Viewport) -> Result<Vec<u8>> {
        let state = self.state.borrow();
        let inside = region.x >= 0
            && region.y >= 0
            && region.x as u32 + region.width <= state.width
            && region.y as u32 + region.height <= state.height;
        if !inside {
            return Err(Error::InvalidResource("Readback region outside the color buffer".to_string()));
        }

        let mut pixels = Vec::with_capacity((region.width * region.height * 4) as usize);
        for row in region.y as u32..region.y as u32 + region.height {
            let start = ((row * state.width + region.x as u32) * 4) as usize;
            let end = start + (region.width * 4) as usize;
            pixels.extend_from_slice(&state.color_buffer[start..end]);
        }
        Ok(pixels)
    }

    fn poll_error(&mut self) -> Option<DriverErrorCode> {
        self.state.borrow_mut().pending_errors.pop_front()
    }

    fn stats(&self) -> DeviceStats {
        self.state.borrow().stats
    }

    fn reset_stats(&mut self) {
        self.state.borrow_mut().stats = DeviceStats::default();
    }
}
