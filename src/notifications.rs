//! Desktop notifications.
//! macOS uses osascript, Linux uses notify-send; other platforms are silent.

use std::process::Command;

/// Send a notification when a pomodoro runs out
pub fn notify_task_finished(task_text: &str) {
    let message = if task_text.is_empty() {
        "Pomodoro finished".to_string()
    } else {
        format!("Pomodoro finished: {}", task_text)
    };

    if let Some(mut command) = notification_command(&message) {
        if let Err(e) = command.output() {
            tracing::warn!(error = %e, "failed to send desktop notification");
        }
    }
}

#[cfg(target_os = "macos")]
fn notification_command(message: &str) -> Option<Command> {
    let script = format!(
        r#"display notification "{}" with title "Flow""#,
        applescript_escape(message)
    );
    let mut command = Command::new("osascript");
    command.arg("-e").arg(script);
    Some(command)
}

/// Escape text for an AppleScript string literal
#[cfg(any(target_os = "macos", test))]
fn applescript_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(target_os = "linux")]
fn notification_command(message: &str) -> Option<Command> {
    let mut command = Command::new("notify-send");
    command.arg("Flow").arg(message);
    Some(command)
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn notification_command(message: &str) -> Option<Command> {
    let _ = message;
    None
}
