use super::*;
use crate::graphics_device::mock_graphics_device::{MockCommand, MockGraphicsDevice};
use crate::graphics_device::{AttributeLayout, DriverErrorCode, Viewport};

// ============================================================================
// Helpers
// ============================================================================

fn create_controller() -> (TriangleViewController<MockGraphicsDevice>, MockGraphicsDevice) {
    let device = MockGraphicsDevice::with_size(4, 4);
    let probe = device.clone();
    let device_config = Config {
        check_errors: true,
        ..Config::default()
    };
    (
        TriangleViewController::new(device, device_config, TriangleConfig::default()),
        probe,
    )
}

fn ready_controller() -> (TriangleViewController<MockGraphicsDevice>, MockGraphicsDevice) {
    let (mut controller, probe) = create_controller();
    controller.setup().unwrap();
    probe.clear_commands();
    (controller, probe)
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_starts_uninitialized() {
    let (controller, probe) = create_controller();
    assert_eq!(controller.state(), ViewControllerState::Uninitialized);
    assert_eq!(controller.vertex_count(), 0);
    assert_eq!(probe.live_buffer_count(), 0);
}

#[test]
fn test_setup_builds_resources() {
    let (mut controller, probe) = create_controller();
    controller.setup().unwrap();

    assert_eq!(controller.state(), ViewControllerState::Ready);
    assert_eq!(controller.vertex_count(), 3);
    assert_eq!(controller.context().clear_color(), Vec4::new(0.0, 0.0, 0.0, 1.0));
    assert_eq!(probe.live_buffer_count(), 1);
    assert_eq!(probe.live_program_count(), 1);
    assert!(probe
        .commands()
        .contains(&MockCommand::CreateBuffer { size: 24, usage: BufferUsage::Static }));
}

#[test]
fn test_setup_twice_is_rejected() {
    let (mut controller, probe) = ready_controller();
    assert!(matches!(controller.setup(), Err(Error::InvalidState(_))));
    assert_eq!(probe.live_buffer_count(), 1);
}

#[test]
fn test_render_before_setup_is_rejected() {
    let (mut controller, probe) = create_controller();
    assert!(matches!(controller.render_frame(), Err(Error::InvalidState(_))));
    assert!(probe.commands().is_empty());
}

#[test]
fn test_setup_failure_leaves_uninitialized() {
    let (mut controller, probe) = create_controller();
    probe.fail_next_allocation();

    assert_eq!(controller.setup(), Err(Error::OutOfMemory));
    assert_eq!(controller.state(), ViewControllerState::Uninitialized);
    assert_eq!(probe.live_program_count(), 0);
}

#[test]
fn test_drop_releases_everything() {
    let (controller, probe) = ready_controller();
    drop(controller);
    assert_eq!(probe.live_buffer_count(), 0);
    assert_eq!(probe.live_program_count(), 0);
}

// ============================================================================
// Frame rendering
// ============================================================================

#[test]
fn test_render_frame_command_sequence() {
    let (mut controller, probe) = ready_controller();
    controller.render_frame().unwrap();

    assert_eq!(
        probe.commands(),
        vec![
            MockCommand::SetClearColor(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            MockCommand::Clear(ClearMask::COLOR | ClearMask::DEPTH),
            MockCommand::UseProgram { name: "gleu_base_effect".to_string() },
            MockCommand::SetUniformVec4 {
                name: crate::base_effect::COLOR_UNIFORM.to_string(),
                value: Vec4::ONE,
            },
            MockCommand::BindVertexBuffer { size: 24 },
            MockCommand::EnableVertexAttribute(AttributeSlot::POSITION),
            MockCommand::VertexAttributePointer {
                slot: AttributeSlot::POSITION,
                layout: AttributeLayout { components: 2, stride: 8, offset: 0 },
            },
            MockCommand::DrawArrays { mode: PrimitiveMode::Triangles, first: 0, count: 3 },
        ]
    );
}

#[test]
fn test_render_frame_issues_exactly_one_draw() {
    let (mut controller, probe) = ready_controller();
    controller.render_frame().unwrap();

    let stats = probe.stats();
    assert_eq!(stats.draw_calls, 1);
    assert_eq!(stats.vertices, 3);
    assert_eq!(stats.clears, 1);
}

#[test]
fn test_render_frame_is_repeatable() {
    let (mut controller, probe) = ready_controller();

    controller.render_frame().unwrap();
    let first_commands = probe.commands();
    let first_pixels = controller
        .context_mut()
        .device_mut()
        .read_pixels(Viewport::from_size(4, 4))
        .unwrap();

    for _ in 0..3 {
        probe.clear_commands();
        controller.render_frame().unwrap();
        assert_eq!(probe.commands(), first_commands);
        let pixels = controller
            .context_mut()
            .device_mut()
            .read_pixels(Viewport::from_size(4, 4))
            .unwrap();
        assert_eq!(pixels, first_pixels);
    }

    // Stats are per frame
    assert_eq!(probe.stats().draw_calls, 1);
}

#[test]
fn test_render_frame_clears_to_configured_color() {
    let device = MockGraphicsDevice::with_size(2, 2);
    let config = TriangleConfig {
        clear_color: Vec4::ONE,
        ..TriangleConfig::default()
    };
    let mut controller = TriangleViewController::new(device, Config::default(), config);
    controller.setup().unwrap();
    controller.render_frame().unwrap();

    let pixels = controller
        .context_mut()
        .device_mut()
        .read_pixels(Viewport::from_size(2, 2))
        .unwrap();
    assert!(pixels.iter().all(|&channel| channel == 255));
}

#[test]
fn test_render_frame_surfaces_context_loss() {
    let (mut controller, probe) = ready_controller();
    probe.push_error(DriverErrorCode::ContextLost);

    assert_eq!(controller.render_frame(), Err(Error::ContextLost));
    assert!(probe.draw_calls().is_empty());
}

#[test]
fn test_resize_sets_viewport() {
    let (mut controller, probe) = ready_controller();
    controller.resize(640, 480).unwrap();
    assert_eq!(
        probe.commands(),
        vec![MockCommand::SetViewport(Viewport::from_size(640, 480))]
    );
}
