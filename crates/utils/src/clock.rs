use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::{Arc, RwLock};

pub type DynClock = Arc<dyn Clock + Send + Sync>;

/// Source of "now". Claim rules work on UTC calendar days.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used by tests.
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: RwLock::new(now) }
    }

    /// Starts at `hour:00:00` UTC on the given day.
    pub fn at(date: NaiveDate, hour: u32) -> Self {
        let time = date.and_hms_opt(hour.min(23), 0, 0).unwrap_or_default();
        Self::new(time.and_utc())
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Time left until the next UTC midnight, formatted `HH:MM:SS` and
/// capped at `23:59:59`.
pub fn until_next_day(now: DateTime<Utc>) -> String {
    let next_midnight = (now.date_naive() + Duration::days(1))
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or(now);
    let secs = (next_midnight - now).num_seconds().clamp(0, 86_399);

    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_by_days() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let clock = ManualClock::at(day, 9);
        assert_eq!(clock.today(), day);

        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }

    #[test]
    fn until_next_day_formats_remaining_time() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(11, 14, 30)
            .unwrap()
            .and_utc();
        assert_eq!(until_next_day(now), "12:45:30");

        let midnight = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();
        assert_eq!(until_next_day(midnight), "23:59:59");

        let last_second = midnight + Duration::seconds(86_399);
        assert_eq!(until_next_day(last_second), "00:00:01");
    }
}
