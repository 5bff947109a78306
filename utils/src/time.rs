//! Time formatting helpers.

/// Format a duration in seconds to a human-readable string.
pub fn format_duration(secs: u64) -> String {
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3_599 => format!("{}m {}s", secs / 60, secs % 60),
        3_600..=86_399 => format!("{}h {}m", secs / 3_600, (secs % 3_600) / 60),
        _ => format!("{}d {}h", secs / 86_400, (secs % 86_400) / 3_600),
    }
}

/// Describe how long until a deadline, given seconds remaining.
pub fn format_remaining(secs: u64) -> String {
    if secs == 0 {
        "closed".to_string()
    } else {
        format!("closes in {}", format_duration(secs))
    }
}
