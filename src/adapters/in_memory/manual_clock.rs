// Clock that only moves when told to.
//
// Purpose
// - Give events deterministic timestamps in tests and scripted sessions, so
//   time-travel reads can be asserted exactly.

use crate::core::ports::Clock;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.millis.store(now.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let next = self.millis.fetch_add(by.num_milliseconds(), Ordering::SeqCst)
            + by.num_milliseconds();
        DateTime::from_timestamp_millis(next).unwrap_or_default()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}
