//! Byte formatting for bar labels.

/// Formats a byte count with base-1024 units.
///
/// Values are rendered to at most two decimal places with trailing zeros
/// trimmed, matching the dashboard labels: `19.81 MB`, `500 MB`, `2 KB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["bytes", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0usize;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let mut text = format!("{size:.2}");
    if let Some(stripped) = text.strip_suffix(".00") {
        text.truncate(stripped.len());
    } else if text.ends_with('0') {
        text.truncate(text.len() - 1);
    }

    format!("{text} {}", UNITS[unit])
}

// ============================================================================
// Tests
// ============================================================================
