use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

/// Issues millisecond-precision UTC timestamps, each strictly later than
/// the last one this clock handed out.
///
/// Two mutations landing in the same millisecond still get distinct,
/// ordered `lastUpdated` values.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last_millis: AtomicI64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        let wall = Utc::now().timestamp_millis();
        let mut prev = self.last_millis.load(Ordering::Relaxed);
        loop {
            let next = wall.max(prev + 1);
            match self.last_millis.compare_exchange_weak(
                prev,
                next,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => {
                    return DateTime::from_timestamp_millis(next).unwrap_or_else(Utc::now);
                }
                Err(actual) => prev = actual,
            }
        }
    }

    /// ISO-8601 string in the `YYYY-MM-DDTHH:MM:SS.mmmZ` shape.
    pub fn now_iso(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_shape() {
        let ts = MonotonicClock::new().now_iso();
        assert_eq!(ts.len(), "2026-10-19T10:00:00.000Z".len(), "got: {ts}");
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn strictly_increasing() {
        let clock = MonotonicClock::new();
        let stamps: Vec<String> = (0..1000).map(|_| clock.now_iso()).collect();
        for pair in stamps.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn strictly_increasing_across_threads() {
        let clock = std::sync::Arc::new(MonotonicClock::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = clock.clone();
                std::thread::spawn(move || {
                    (0..250).map(|_| clock.now().timestamp_millis()).collect::<Vec<_>>()
                })
            })
            .collect();
        let mut all: Vec<i64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), total, "clock issued a duplicate timestamp");
    }
}
