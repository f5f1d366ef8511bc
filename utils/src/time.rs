//! Time formatting helpers.

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

/// Render a duration in seconds with its two most significant units.
///
/// Long traversal runs span hours to days; sub-minute precision past the
/// leading unit is noise in a summary line.
pub fn format_duration(secs: u64) -> String {
    match secs {
        s if s >= DAY => format!("{}d {}h", s / DAY, (s % DAY) / HOUR),
        s if s >= HOUR => format!("{}h {}m", s / HOUR, (s % HOUR) / MINUTE),
        s if s >= MINUTE => format!("{}m {}s", s / MINUTE, s % MINUTE),
        s => format!("{s}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }

    #[test]
    fn unit_boundaries_roll_over() {
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(86_400), "1d 0h");
    }
}
