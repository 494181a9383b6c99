//! Best-effort clipboard copy.
//!
//! Copying is a convenience action: both paths may fail (headless session,
//! missing tools, denied permissions) and the failure is logged and
//! swallowed. The returned flag only drives transient "copied" feedback.

use std::io::Write;
use std::process::{Command, Stdio};

/// Fallback tools tried in order when no native clipboard is available.
const FALLBACK_TOOLS: [(&str, &[&str]); 4] = [
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Place `text` on the system clipboard.
///
/// Primary path is the native clipboard; on failure the text is piped
/// through the first available external tool. Returns whether either path
/// succeeded.
pub fn copy_to_clipboard(text: &str) -> bool {
    let primary = arboard::Clipboard::new().and_then(|mut clipboard| {
        clipboard.set_text(text.to_string())
    });

    match primary {
        Ok(()) => true,
        Err(primary_err) => {
            tracing::debug!("Native clipboard unavailable: {}", primary_err);
            match copy_via_external_tool(text) {
                Ok(()) => true,
                Err(fallback_err) => {
                    tracing::warn!(
                        "Copy failed: {} (fallback: {})",
                        primary_err,
                        fallback_err
                    );
                    false
                }
            }
        }
    }
}

/// Pipe `text` through an external clipboard tool.
///
/// The child's stdin handle is scoped so it is closed before waiting, and the
/// child is always reaped, whether the write succeeded or not.
fn copy_via_external_tool(text: &str) -> Result<(), String> {
    copy_via_tools(text, &FALLBACK_TOOLS)
}

fn copy_via_tools(text: &str, tools: &[(&str, &[&str])]) -> Result<(), String> {
    let mut last_error = "no clipboard tool available".to_string();

    for &(tool, args) in tools {
        let mut child = match Command::new(tool)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
        {
            Ok(child) => child,
            Err(_) => continue, // tool not installed
        };

        let write_result = {
            let mut stdin = match child.stdin.take() {
                Some(stdin) => stdin,
                None => {
                    let _ = child.wait();
                    last_error = format!("{}: stdin unavailable", tool);
                    continue;
                }
            };
            stdin.write_all(text.as_bytes())
        };

        let status = child.wait();

        match (write_result, status) {
            (Ok(()), Ok(status)) if status.success() => return Ok(()),
            (Err(e), _) => last_error = format!("{}: {}", tool, e),
            (_, Ok(status)) => last_error = format!("{}: exited with {}", tool, status),
            (_, Err(e)) => last_error = format!("{}: {}", tool, e),
        }
    }

    Err(last_error)
}
