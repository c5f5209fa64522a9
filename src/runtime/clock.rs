//! Cross-platform clock
//!
//! Uses `std::time` on native targets and `js_sys::Date::now()` on `wasm32`
//! targets (where `Instant::now()` panics with "time not implemented on this
//! platform").

use chrono::{DateTime, Utc};

// ── Native implementation ───────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
mod imp {
    use chrono::{DateTime, Utc};
    use std::time::{Instant, SystemTime};

    #[derive(Clone)]
    pub struct Stopwatch {
        start: Instant,
    }

    impl Stopwatch {
        pub fn start() -> Self {
            Self {
                start: Instant::now(),
            }
        }

        pub fn elapsed_ms(&self) -> f64 {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }

    pub fn now_utc() -> DateTime<Utc> {
        DateTime::<Utc>::from(SystemTime::now())
    }
}

// ── WASM implementation ─────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
mod imp {
    use chrono::{DateTime, Utc};

    #[derive(Clone)]
    pub struct Stopwatch {
        start_ms: f64,
    }

    impl Stopwatch {
        pub fn start() -> Self {
            Self {
                start_ms: js_sys::Date::now(),
            }
        }

        pub fn elapsed_ms(&self) -> f64 {
            js_sys::Date::now() - self.start_ms
        }
    }

    pub fn now_utc() -> DateTime<Utc> {
        DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
    }
}

pub use imp::Stopwatch;

/// Current wall-clock time
pub fn now_utc() -> DateTime<Utc> {
    imp::now_utc()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopwatch_is_monotonic() {
        let watch = Stopwatch::start();
        let first = watch.elapsed_ms();
        let second = watch.elapsed_ms();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[test]
    fn test_now_is_after_2021() {
        assert!(now_utc().timestamp() > 1_609_459_200);
    }
}
