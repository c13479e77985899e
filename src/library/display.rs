/// Format seconds as `m:ss`. Unknown (zero or non-finite) durations render as
/// a `--:--` placeholder.
pub fn format_duration(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "--:--".to_string();
    }
    let total = secs.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Like `format_duration`, but zero renders as `0:00` (used for elapsed time).
pub fn format_position(secs: f64) -> String {
    if !secs.is_finite() || secs <= 0.0 {
        return "0:00".to_string();
    }
    format_duration(secs)
}
