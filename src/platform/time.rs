//! Wall-clock time

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or_default()
}

/// Format a timestamp relative to `now` (both in ms)
pub fn format_relative(now: f64, timestamp: f64) -> String {
    let diff_mins = ((now - timestamp) / 60_000.0).max(0.0);
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        match diff_days.floor() as i64 {
            1 => "Yesterday".to_string(),
            days => format!("{} days ago", days),
        }
    } else if diff_hours >= 1.0 {
        match diff_hours.floor() as i64 {
            1 => "1 hour ago".to_string(),
            hours => format!("{} hours ago", hours),
        }
    } else if diff_mins >= 1.0 {
        match diff_mins.floor() as i64 {
            1 => "1 min ago".to_string(),
            mins => format!("{} mins ago", mins),
        }
    } else {
        "Just now".to_string()
    }
}
