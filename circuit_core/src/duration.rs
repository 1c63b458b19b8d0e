//! Free-form duration parsing and time formatting.
//!
//! Schedule durations are display strings like "30 sec", "1 min", or
//! "45s/side". The parser extracts the first numeric token with a
//! recognized unit; anything else means "not a timed step".

/// Extract a second count from a free-form duration string.
///
/// Rules, in order:
/// - `None`/empty input → 0
/// - first integer followed by `min`/`m` (case-insensitive) → minutes
/// - otherwise first integer followed by `sec`/`s` → seconds
/// - otherwise → 0 (reps-only steps never auto-start a timer)
///
/// Trailing qualifiers ("/side", "each direction") are ignored and never
/// double the result. Total over arbitrary input.
pub fn parse_duration_seconds(text: Option<&str>) -> u32 {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return 0,
    };

    if let Some(minutes) = first_value_with_unit(text, &["min", "m"]) {
        return minutes.saturating_mul(60);
    }
    if let Some(seconds) = first_value_with_unit(text, &["sec", "s"]) {
        return seconds;
    }
    0
}

/// Find the first integer in `text` immediately followed (after optional
/// spaces) by one of `units`, case-insensitively.
fn first_value_with_unit(text: &str, units: &[&str]) -> Option<u32> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let mut j = i;
            while j < bytes.len() && bytes[j] == b' ' {
                j += 1;
            }
            let rest = &bytes[j..];
            if units.iter().any(|unit| {
                rest.len() >= unit.len() && rest[..unit.len()].eq_ignore_ascii_case(unit.as_bytes())
            }) {
                // Oversized numbers are nonsense input; treat as untimed
                if let Ok(value) = text[start..i].parse::<u32>() {
                    return Some(value);
                }
                return None;
            }
        } else {
            i += 1;
        }
    }
    None
}

/// Format elapsed seconds as `M:SS` for display
pub fn format_elapsed(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}
