//! Time source for timestamps and "today" boundaries.
//!
//! Day boundaries are computed in local time; stored timestamps are UTC.

use chrono::{DateTime, Local, NaiveTime, TimeZone};
use std::sync::{Arc, Mutex, PoisonError};

pub trait Clock: Send {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Manually driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Local>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Local>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Local midnight that opens the day containing `now`.
///
/// Falls back to `now` itself when midnight does not exist locally (DST gap).
pub fn start_of_day(now: DateTime<Local>) -> DateTime<Local> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    Local
        .from_local_datetime(&midnight)
        .earliest()
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::{start_of_day, Clock, FixedClock};
    use chrono::{Local, TimeZone, Timelike};

    #[test]
    fn start_of_day_is_local_midnight() {
        let now = Local.with_ymd_and_hms(2026, 3, 10, 15, 42, 7).unwrap();
        let start = start_of_day(now);
        assert_eq!(start.date_naive(), now.date_naive());
        assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
    }

    #[test]
    fn fixed_clock_clones_share_time() {
        let clock = FixedClock::new(Local.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap());
        let handle = clock.clone();
        handle.advance(chrono::Duration::hours(2));
        assert_eq!(clock.now().hour(), 11);
    }
}
