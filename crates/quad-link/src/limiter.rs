use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Throttles repeated warnings so a dead peer does not flood the log
/// at the tick rate.
#[derive(Debug)]
pub struct WarnLimiter {
    min_interval: Duration,
    last: HashMap<&'static str, Instant>,
    suppressed: HashMap<&'static str, u64>,
}

impl WarnLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval, last: HashMap::new(), suppressed: HashMap::new() }
    }

    /// `Some(n)` if a warning of this class may be logged now, where `n`
    /// is how many were swallowed since the last one.
    pub fn allow(&mut self, class: &'static str) -> Option<u64> {
        let now = Instant::now();
        if let Some(t) = self.last.get(class) {
            if now.duration_since(*t) < self.min_interval {
                *self.suppressed.entry(class).or_default() += 1;
                return None;
            }
        }
        self.last.insert(class, now);
        Some(self.suppressed.remove(class).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_warning_passes_then_suppressed() {
        let mut l = WarnLimiter::new(Duration::from_secs(3600));
        assert_eq!(l.allow("send"), Some(0));
        assert_eq!(l.allow("send"), None);
        assert_eq!(l.allow("send"), None);
        // other classes are independent
        assert_eq!(l.allow("recv"), Some(0));
    }

    #[test]
    fn reports_suppressed_count() {
        let mut l = WarnLimiter::new(Duration::from_millis(20));
        assert_eq!(l.allow("send"), Some(0));
        assert_eq!(l.allow("send"), None);
        assert_eq!(l.allow("send"), None);
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(l.allow("send"), Some(2));
    }

    #[test]
    fn zero_interval_never_suppresses() {
        let mut l = WarnLimiter::new(Duration::ZERO);
        for _ in 0..5 {
            assert_eq!(l.allow("send"), Some(0));
        }
    }
}
