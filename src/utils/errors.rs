//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common error scenarios.

use std::fmt::Write;

use crate::clipboard::ClipboardError;

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    // Header
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    let error_msg = error.to_string();
    let clipboard_error = error.chain().find_map(|e| e.downcast_ref::<ClipboardError>());

    match clipboard_error {
        Some(ClipboardError::CopyEventTimeout(ms)) => format_timeout_error(&mut output, *ms),
        Some(e) if e.is_write_failure() => format_write_error(&mut output, &e.to_string()),
        Some(ClipboardError::InvalidState(msg)) => format_busy_error(&mut output, msg),
        Some(e) => format_backend_error(&mut output, &e.to_string()),
        None if error_msg.contains("config") => format_config_error(&mut output, &error_msg),
        None if error_msg.contains("input") => format_input_error(&mut output, &error_msg),
        None => format_generic_error(&mut output, &error_msg),
    }

    if clipboard_error.is_some_and(ClipboardError::is_recoverable) {
        writeln!(&mut output).ok();
        writeln!(&mut output, "Nothing was changed. Running the same command again may succeed.").ok();
    }

    // Technical details
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{:#}", error).ok();
    writeln!(&mut output).ok();

    // Footer with help
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: lamco-xscp -vv copy"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Dry run without the desktop clipboard: lamco-xscp copy --backend memory"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Report issues: https://github.com/lamco-admin/lamco-xscp/issues"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

fn format_timeout_error(output: &mut String, ms: u64) {
    writeln!(output, "Clipboard Did Not Respond").ok();
    writeln!(output).ok();
    writeln!(
        output,
        "The copy event was not delivered within {}ms. Nothing was copied.",
        ms
    )
    .ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. No display server reachable").ok();
    writeln!(output, "     → Check: echo $DISPLAY $WAYLAND_DISPLAY").ok();
    writeln!(output, "     → Over SSH, forward X11 or run locally").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Clipboard is slow to answer").ok();
    writeln!(output, "     → Retry with a longer bound: --timeout-ms 5000").ok();
}

fn format_write_error(output: &mut String, error: &str) {
    writeln!(output, "Clipboard Write Failed").ok();
    writeln!(output).ok();
    writeln!(output, "The clipboard rejected the Webflow payload.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Another application holds the clipboard").ok();
    writeln!(output, "     → Close clipboard managers and retry").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Sandboxed session without clipboard access").ok();
    writeln!(output, "     → Grant clipboard permission to the terminal").ok();
}

fn format_backend_error(output: &mut String, error: &str) {
    writeln!(output, "Clipboard Unavailable").ok();
    writeln!(output).ok();
    writeln!(output, "Could not open the system clipboard.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
    writeln!(output).ok();
    writeln!(output, "Troubleshooting:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Verify a graphical session is running").ok();
    writeln!(output, "     → echo $XDG_SESSION_TYPE").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Print the payload instead and copy it by hand").ok();
    writeln!(output, "     → lamco-xscp convert --input snippet.html").ok();
}

fn format_busy_error(output: &mut String, error: &str) {
    writeln!(output, "Copy Already In Progress").ok();
    writeln!(output).ok();
    writeln!(output, "A previous copy is still waiting for its copy event.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
    writeln!(output).ok();
    writeln!(output, "  → Wait for the pending copy to finish or time out").ok();
}

fn format_config_error(output: &mut String, _error: &str) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Unsupported value").ok();
    writeln!(output, "     → clipboard.backend: 'system' or 'memory'").ok();
    writeln!(output, "     → logging.format: 'pretty', 'compact' or 'json'").ok();
    writeln!(output, "     → clipboard.copy_timeout_ms: greater than 0").ok();
}

fn format_input_error(output: &mut String, _error: &str) {
    writeln!(output, "Input Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not read the content to convert.").ok();
    writeln!(output).ok();
    writeln!(output, "  → Check the --input path, or pipe content on stdin").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while converting or copying.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}
