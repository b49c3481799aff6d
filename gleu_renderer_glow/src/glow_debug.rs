/// Driver debug output (KHR_debug)
///
/// Messages reported by the driver are filtered by `DebugSeverity` and routed
/// to the GLEU logger under the `gleu::glow` source.

use gleu::log::LogSeverity;
use gleu::DebugSeverity;

/// GLEU log severity for a driver message, or None when the filter drops it
#[cfg_attr(not(feature = "gl-debug"), allow(dead_code))]
pub(crate) fn forward_severity(filter: DebugSeverity, gl_severity: u32) -> Option<LogSeverity> {
    let (severity, is_error, is_warning) = match gl_severity {
        glow::DEBUG_SEVERITY_HIGH => (LogSeverity::Error, true, false),
        glow::DEBUG_SEVERITY_MEDIUM | glow::DEBUG_SEVERITY_LOW => (LogSeverity::Warn, false, true),
        _ => (LogSeverity::Debug, false, false),
    };

    let forward = match filter {
        DebugSeverity::ErrorsOnly => is_error,
        DebugSeverity::ErrorsAndWarnings => is_error || is_warning,
        DebugSeverity::All => true,
    };

    forward.then_some(severity)
}

#[cfg_attr(not(feature = "gl-debug"), allow(dead_code))]
pub(crate) fn message_type_name(gl_type: u32) -> &'static str {
    match gl_type {
        glow::DEBUG_TYPE_ERROR => "Error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "Deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "Undefined",
        glow::DEBUG_TYPE_PORTABILITY => "Portability",
        glow::DEBUG_TYPE_PERFORMANCE => "Performance",
        _ => "Other",
    }
}

/// Install the debug message callback on `gl`
///
/// Does nothing (beyond a warning) when the context has no debug output.
#[cfg(feature = "gl-debug")]
pub(crate) fn install(gl: &mut glow::Context, filter: DebugSeverity) {
    use glow::HasContext;

    if !gl.supports_debug() {
        gleu::gleu_warn!("gleu::glow", "Debug output requested but not supported by this context");
        return;
    }

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(move |_source, gl_type, id, gl_severity, message| {
            if let Some(severity) = forward_severity(filter, gl_severity) {
                gleu::log::log(
                    severity,
                    "gleu::glow",
                    format!("[{}] #{} {}", message_type_name(gl_type), id, message),
                );
            }
        });
    }

    gleu::gleu_debug!("gleu::glow", "Debug output enabled ({:?})", filter);
}
