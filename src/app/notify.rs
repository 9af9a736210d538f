use std::process::Command;

/// Fire-and-forget desktop notification. Failure to spawn (or a missing
/// notification daemon) is deliberately invisible; the browser keeps running
/// either way.
pub(crate) fn send_desktop_notification(title: &str, body: &str) {
    #[cfg(target_os = "linux")]
    {
        let _ = Command::new("notify-send").arg(title).arg(body).spawn();
    }

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            "display notification \"{}\" with title \"{}\"",
            body.replace('"', "\\\""),
            title.replace('"', "\\\"")
        );
        let _ = Command::new("osascript").arg("-e").arg(&script).spawn();
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        let _ = (title, body);
    }
}

/// Title/body for the show-selection key: the selected names comma-joined,
/// or a fixed message when nothing is selected.
pub(crate) fn selection_notification(names: &[String]) -> (String, String) {
    if names.is_empty() {
        ("No files selected".to_string(), String::new())
    } else {
        (format!("Selected ({})", names.len()), names.join(", "))
    }
}
