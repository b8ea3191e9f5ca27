use std::sync::atomic::{AtomicU64, Ordering};

/// Usage counters the store bumps as a side effect of its operations.
///
/// Two counters exist: `inserted` (records stored by Set) and `fetched`
/// (records served by Get). Increments are atomic, so a single `Usage`
/// can be shared across tasks without locking. The counters are injected
/// into the service rather than living in a process-wide singleton.
#[derive(Debug, Default)]
pub struct Usage {
    inserted: AtomicU64,
    fetched: AtomicU64,
}

impl Usage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bumps the `inserted` counter by one.
    pub fn record_inserted(&self) {
        self.inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Bumps the `fetched` counter by one.
    pub fn record_fetched(&self) {
        self.fetched.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of the `inserted` counter.
    pub fn inserted(&self) -> u64 {
        self.inserted.load(Ordering::Relaxed)
    }

    /// Current value of the `fetched` counter.
    pub fn fetched(&self) -> u64 {
        self.fetched.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn counters_start_at_zero() {
        let usage = Usage::new();
        assert_eq!(usage.inserted(), 0);
        assert_eq!(usage.fetched(), 0);
    }

    #[test]
    fn counters_increment_independently() {
        let usage = Usage::new();

        usage.record_inserted();
        usage.record_inserted();
        usage.record_fetched();

        assert_eq!(usage.inserted(), 2);
        assert_eq!(usage.fetched(), 1);
    }

    #[test]
    fn counters_are_safe_to_share_across_threads() {
        let usage = Arc::new(Usage::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let usage = Arc::clone(&usage);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    usage.record_inserted();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(usage.inserted(), 800);
    }
}
