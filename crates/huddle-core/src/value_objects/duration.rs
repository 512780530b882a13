//! Duration display helpers

/// Format a non-negative number of seconds as `HH:MM:SS`.
///
/// Pure display logic; the attendance state machine only ever deals in
/// integer seconds.
#[must_use]
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        assert_eq!(format_hms(61), "00:01:01");
        assert_eq!(format_hms(3600), "01:00:00");
        assert_eq!(format_hms(8 * 3600 + 15 * 60 + 42), "08:15:42");
        assert_eq!(format_hms(100 * 3600), "100:00:00");
    }
}
