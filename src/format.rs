//! Playback time formatting for the player controls.

use std::time::Duration;

/// Format a playback position as `MM:SS`.
///
/// Fractional seconds are floored. The minute component is not wrapped at 60,
/// so an hour renders as `60:00`. Negative and non-finite input renders as
/// `00:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format a [`Duration`] the same way as [`format_time`].
pub fn format_duration(duration: Duration) -> String {
    format_time(duration.as_secs_f64())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_cases() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(61.0), "01:01");
        assert_eq!(format_time(3599.0), "59:59");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(86400.0), "1440:00");
    }

    #[test]
    fn test_fractional_seconds_are_floored() {
        assert_eq!(format_time(61.5), "01:01");
        assert_eq!(format_time(59.9), "00:59");
        assert_eq!(format_time(0.1), "00:00");

        for t in [0.0, 0.4, 12.999, 59.5, 60.01, 3599.99, 7322.7] {
            assert_eq!(format_time(t), format_time(t.floor()), "t = {}", t);
        }
    }

    #[test]
    fn test_minute_boundaries() {
        assert_eq!(format_time(59.0), "00:59");
        assert_eq!(format_time(60.0), "01:00");
        assert_eq!(format_time(100000.0), "1666:40");
    }

    #[test]
    fn test_negative_and_non_finite_clamp_to_zero() {
        assert_eq!(format_time(-5.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(90_500)), "01:30");
    }
}
