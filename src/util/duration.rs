/// Formats a number of seconds as a clock string, `HH:MM:SS` or `MM:SS` when
/// there are no whole hours. Fractional seconds are dropped.
///
/// # Examples
/// ```
/// use video_profile_utils::format_duration;
/// assert_eq!(format_duration(75.0), "01:15");
/// assert_eq!(format_duration(3661.0), "01:01:01");
/// ```
pub fn format_duration(seconds: f64) -> String {
    // Negative/NaN input has no meaningful clock representation
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
