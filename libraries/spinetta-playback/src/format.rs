//! Presentation helpers
//!
//! Pure functions the rendering layer uses to turn transport state into
//! labels and slider geometry.

/// Format seconds as `M:SS`
///
/// Minutes are unbounded and carry no leading zero; seconds are floored and
/// zero-padded to two digits. Negative or non-finite input formats as `0:00`.
///
/// ```
/// use spinetta_playback::format::format_time;
///
/// assert_eq!(format_time(0.0), "0:00");
/// assert_eq!(format_time(65.0), "1:05");
/// assert_eq!(format_time(600.0), "10:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Progress bar fill (0-100)
///
/// Returns 0 while the duration is unknown instead of dividing by zero.
pub fn progress_percent(current_time: f64, duration: f64) -> f64 {
    if !(duration.is_finite() && duration > 0.0) || !current_time.is_finite() {
        return 0.0;
    }

    (current_time / duration * 100.0).clamp(0.0, 100.0)
}

/// Volume bar fill (0-100)
pub fn volume_percent(volume: f64) -> f64 {
    if volume.is_nan() {
        return 0.0;
    }
    (volume * 100.0).clamp(0.0, 100.0)
}

/// Map a pointer position on a horizontal track to a fraction in [0.0, 1.0]
///
/// # Arguments
/// * `pointer_x` - Pointer x coordinate (same space as `track_left`)
/// * `track_left` - Left edge of the track
/// * `track_width` - Track width; a collapsed track (<= 0) maps to 0.0
pub fn pointer_fraction(pointer_x: f64, track_left: f64, track_width: f64) -> f64 {
    if !(track_width.is_finite() && track_width > 0.0) {
        return 0.0;
    }

    let fraction = (pointer_x - track_left) / track_width;
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_known_values() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(5.0), "0:05");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(600.0), "10:00");
    }

    #[test]
    fn format_time_floors_fractional_seconds() {
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(61.5), "1:01");
    }

    #[test]
    fn format_time_minutes_are_unbounded() {
        // 2 hours, 3 minutes, 4 seconds
        assert_eq!(format_time(7384.0), "123:04");
    }

    #[test]
    fn format_time_rejects_garbage_input() {
        assert_eq!(format_time(-3.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn progress_with_unknown_duration_is_zero() {
        assert_eq!(progress_percent(12.0, 0.0), 0.0);
        assert_eq!(progress_percent(12.0, f64::NAN), 0.0);
        assert_eq!(progress_percent(0.0, 0.0), 0.0);
    }

    #[test]
    fn progress_is_proportional_and_clamped() {
        assert!((progress_percent(90.0, 180.0) - 50.0).abs() < 1e-9);
        assert_eq!(progress_percent(200.0, 180.0), 100.0);
        assert_eq!(progress_percent(-1.0, 180.0), 0.0);
    }

    #[test]
    fn volume_percent_clamps() {
        assert!((volume_percent(0.8) - 80.0).abs() < 1e-9);
        assert_eq!(volume_percent(1.5), 100.0);
        assert_eq!(volume_percent(f64::NAN), 0.0);
    }

    #[test]
    fn pointer_fraction_maps_track_geometry() {
        // Track from x=100 to x=300
        assert_eq!(pointer_fraction(100.0, 100.0, 200.0), 0.0);
        assert_eq!(pointer_fraction(200.0, 100.0, 200.0), 0.5);
        assert_eq!(pointer_fraction(300.0, 100.0, 200.0), 1.0);
    }

    #[test]
    fn pointer_fraction_saturates_outside_track() {
        assert_eq!(pointer_fraction(50.0, 100.0, 200.0), 0.0);
        assert_eq!(pointer_fraction(400.0, 100.0, 200.0), 1.0);
    }

    #[test]
    fn pointer_fraction_on_collapsed_track() {
        assert_eq!(pointer_fraction(150.0, 100.0, 0.0), 0.0);
        assert_eq!(pointer_fraction(150.0, 100.0, -10.0), 0.0);
    }
}
