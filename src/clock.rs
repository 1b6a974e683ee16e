use chrono::{NaiveTime, TimeDelta};
use std::time::{Duration, SystemTime};

/// Default length of the simulated window that ends at the target instant
pub const WINDOW: Duration = Duration::from_secs(10);

/// Default pause after an outcome before the round restarts on its own
pub const RESET_DELAY: Duration = Duration::from_secs(2);

/// Target instant as shown to the user
pub const TARGET_LABEL: &str = "7:00:00";

/// Time elapsed since `started_at`, clamped to zero when `now` lags behind
pub fn elapsed(now: SystemTime, started_at: SystemTime) -> Duration {
    now.duration_since(started_at).unwrap_or_default()
}

pub fn remaining(elapsed: Duration, window: Duration) -> Duration {
    window.saturating_sub(elapsed)
}

pub fn is_ready(elapsed: Duration, window: Duration) -> bool {
    elapsed >= window
}

fn target_time() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default()
}

/// Wall-clock face at the start of the window, e.g. 6:59:50 for a 10s window.
/// Purely cosmetic: nothing decides an outcome from it.
pub fn display_anchor(window: Duration) -> NaiveTime {
    target_time() - TimeDelta::from_std(window).unwrap_or(TimeDelta::zero())
}

/// Clock face for the given elapsed time: `H:MM:SS AM` or `H:MM:SS.mmm AM`
pub fn format_clock(elapsed: Duration, window: Duration, show_millis: bool) -> String {
    let face = display_anchor(window) + TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::zero());
    let text = if show_millis {
        face.format("%I:%M:%S%.3f %p").to_string()
    } else {
        face.format("%I:%M:%S %p").to_string()
    };

    text.trim_start_matches('0').to_string()
}

/// Countdown text: `HH:MM:SS.ss` or `HH:MM:SS.sss`
pub fn format_remaining(remaining: Duration, show_millis: bool) -> String {
    let total = remaining.as_secs_f64();
    let hours = (total / 3600.0).floor() as u64;
    let minutes = ((total % 3600.0) / 60.0).floor() as u64;
    let seconds = total % 60.0;

    if show_millis {
        format!("{hours:02}:{minutes:02}:{seconds:06.3}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:05.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_counts_forward() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let now = start + Duration::from_millis(2500);
        assert_eq!(elapsed(now, start), Duration::from_millis(2500));
    }

    #[test]
    fn elapsed_is_clamped_under_skew() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let now = start - Duration::from_secs(3);
        assert_eq!(elapsed(now, start), Duration::ZERO);
    }

    #[test]
    fn remaining_never_goes_negative() {
        assert_eq!(remaining(Duration::from_secs(4), WINDOW), Duration::from_secs(6));
        assert_eq!(remaining(Duration::from_secs(14), WINDOW), Duration::ZERO);
    }

    #[test]
    fn ready_at_window_boundary() {
        assert!(!is_ready(Duration::from_millis(9999), WINDOW));
        assert!(is_ready(WINDOW, WINDOW));
    }

    #[test]
    fn anchor_sits_one_window_before_target() {
        assert_eq!(
            display_anchor(WINDOW),
            NaiveTime::from_hms_opt(6, 59, 50).unwrap()
        );
    }

    #[test]
    fn clock_face_strips_leading_hour_zero() {
        assert_eq!(format_clock(Duration::ZERO, WINDOW, false), "6:59:50 AM");
        assert_eq!(
            format_clock(Duration::from_millis(3250), WINDOW, false),
            "6:59:53 AM"
        );
    }

    #[test]
    fn clock_face_with_millis() {
        assert_eq!(
            format_clock(Duration::from_millis(10_026), WINDOW, true),
            "7:00:00.026 AM"
        );
        assert_eq!(
            format_clock(Duration::from_millis(1_999), WINDOW, true),
            "6:59:51.999 AM"
        );
    }

    #[test]
    fn remaining_in_hundredths() {
        assert_eq!(
            format_remaining(Duration::from_millis(9500), false),
            "00:00:09.50"
        );
        assert_eq!(format_remaining(Duration::ZERO, false), "00:00:00.00");
    }

    #[test]
    fn remaining_in_millis() {
        assert_eq!(
            format_remaining(Duration::from_millis(1250), true),
            "00:00:01.250"
        );
        assert_eq!(
            format_remaining(Duration::from_secs(3725), true),
            "01:02:05.000"
        );
    }
}
