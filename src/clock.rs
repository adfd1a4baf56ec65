use chrono::{NaiveDate, NaiveDateTime};
use instant::Instant;
use std::time::Duration;

/// Monotonic time since the session started; drives scheduled tasks.
pub struct SessionClock {
    started: Instant,
}

impl SessionClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Browser-local wall-clock time, second precision.
pub fn local_now() -> NaiveDateTime {
    let d = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(d.get_full_year() as i32, d.get_month() + 1, d.get_date())
        .and_then(|date| date.and_hms_opt(d.get_hours(), d.get_minutes(), d.get_seconds()))
        .unwrap_or_default()
}
