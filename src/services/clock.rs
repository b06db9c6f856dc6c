//! Wall clock access

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, TimeZone};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Reads the operating system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Local>>,
}

impl ManualClock {
    /// Start at the given epoch milliseconds, or `None` if chrono cannot
    /// represent that instant
    pub fn at_millis(epoch_millis: i64) -> Option<Self> {
        let now = Local.timestamp_millis_opt(epoch_millis).single()?;
        Some(Self { now: Mutex::new(now) })
    }

    pub fn at_seconds(epoch_seconds: i64) -> Option<Self> {
        Self::at_millis(epoch_seconds.checked_mul(1000)?)
    }

    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += Duration::milliseconds(millis);
    }

    pub fn advance_seconds(&self, seconds: i64) {
        self.advance_millis(seconds.saturating_mul(1000));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Unix epoch seconds rounded to the nearest second
pub fn epoch_seconds(now: &DateTime<Local>) -> i64 {
    (now.timestamp_millis() + 500).div_euclid(1000)
}

/// Zero-padded 24-hour `HH:MM:SS`
pub fn wall_clock_text(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_seconds_rounds_to_nearest() {
        let clock = ManualClock::at_millis(1_700_000_000_499).unwrap();
        assert_eq!(epoch_seconds(&clock.now()), 1_700_000_000);
        clock.advance_millis(1);
        assert_eq!(epoch_seconds(&clock.now()), 1_700_000_001);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::at_seconds(1_700_000_000).unwrap();
        clock.advance_seconds(10);
        assert_eq!(epoch_seconds(&clock.now()), 1_700_000_010);
    }

    #[test]
    fn unrepresentable_start_is_rejected() {
        assert!(ManualClock::at_millis(i64::MAX).is_none());
        assert!(ManualClock::at_seconds(i64::MAX).is_none());
        assert!(ManualClock::at_seconds(0).is_some());
    }

    #[test]
    fn wall_clock_text_is_zero_padded() {
        let text = wall_clock_text(&SystemClock.now());
        assert_eq!(text.len(), 8);
        let parts: Vec<&str> = text.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn wall_clock_text_for_known_instant() {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 7, 8, 9).single();
        if let Some(now) = now {
            assert_eq!(wall_clock_text(&now), "07:08:09");
        }
    }
}
