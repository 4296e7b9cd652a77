//! Scarcity countdown deadline arithmetic

use chrono::{DateTime, Duration, Utc};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Time left on the countdown, clamped at zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountdownRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl CountdownRemaining {
    pub fn until(deadline_millis: i64, now_millis: i64) -> Self {
        let diff = deadline_millis.saturating_sub(now_millis);
        if diff <= 0 {
            return Self::default();
        }

        Self {
            days: diff / DAY_MS,
            hours: (diff % DAY_MS) / HOUR_MS,
            minutes: (diff % HOUR_MS) / MINUTE_MS,
            seconds: (diff % MINUTE_MS) / SECOND_MS,
        }
    }

    pub fn is_expired(&self) -> bool {
        *self == Self::default()
    }
}

impl std::fmt::Display for CountdownRemaining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Deadline `days` from `now`, in epoch millis
pub fn deadline_from(now: DateTime<Utc>, days: u32) -> i64 {
    (now + Duration::days(i64::from(days))).timestamp_millis()
}

/// Parse a stored deadline; older stores may hold a float
pub fn parse_deadline(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_remaining_breakdown() {
        let deadline = DAY_MS + 2 * HOUR_MS + 3 * MINUTE_MS + 4 * SECOND_MS + 500;
        let remaining = CountdownRemaining::until(deadline, 0);

        assert_eq!(
            remaining,
            CountdownRemaining {
                days: 1,
                hours: 2,
                minutes: 3,
                seconds: 4
            }
        );
        assert_eq!(remaining.to_string(), "01:02:03:04");
        assert!(!remaining.is_expired());
    }

    #[test]
    fn test_past_deadline_is_zero() {
        let remaining = CountdownRemaining::until(1_000, 5_000);
        assert!(remaining.is_expired());
        assert_eq!(remaining.to_string(), "00:00:00:00");
    }

    #[test]
    fn test_deadline_from_days() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(deadline_from(now, 3) - now.timestamp_millis(), 3 * DAY_MS);
    }

    #[test]
    fn test_parse_deadline() {
        assert_eq!(parse_deadline("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse_deadline(" 1700000000000.0 "), Some(1_700_000_000_000));
        assert_eq!(parse_deadline("soon"), None);
    }
}
