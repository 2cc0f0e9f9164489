use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Trait for session clocks
pub trait Timer: Clone + Send + Sync {
    type Timestamp: Copy + Clone + Send + Sync;
    fn now(&self) -> Self::Timestamp;
    fn elapsed(&self, ts: Self::Timestamp) -> Duration;
    fn between(&self, earlier: Self::Timestamp, later: Self::Timestamp) -> Duration;
    /// Wall-clock seconds since the Unix epoch for a timestamp
    fn unix_seconds(&self, ts: Self::Timestamp) -> f64;
}

/// Monotonic nanosecond clock anchored to the wall clock once, at creation
#[derive(Debug, Clone)]
pub struct HighPrecisionTimer {
    pub start: Instant,
    start_unix: Duration,
}

impl Timer for HighPrecisionTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.start.elapsed().as_nanos() as u64
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn between(&self, earlier: u64, later: u64) -> Duration {
        Duration::from_nanos(later.saturating_sub(earlier))
    }
    fn unix_seconds(&self, ts: u64) -> f64 {
        (self.start_unix + Duration::from_nanos(ts)).as_secs_f64()
    }
}

impl HighPrecisionTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            start_unix: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default(),
        }
    }
}

impl Default for HighPrecisionTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    now_ns: Arc<AtomicU64>,
    start_unix: Duration,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchors timestamp zero at `start_unix` after the epoch.
    pub fn starting_at(start_unix: Duration) -> Self {
        Self {
            now_ns: Arc::new(AtomicU64::new(0)),
            start_unix,
        }
    }

    pub fn advance(&self, d: Duration) {
        self.now_ns
            .fetch_add(d.as_nanos() as u64, Ordering::SeqCst);
    }

    pub fn set(&self, ns: u64) {
        self.now_ns.store(ns, Ordering::SeqCst);
    }
}

impl Timer for ManualTimer {
    type Timestamp = u64;
    fn now(&self) -> u64 {
        self.now_ns.load(Ordering::SeqCst)
    }
    fn elapsed(&self, ts: u64) -> Duration {
        Duration::from_nanos(self.now().saturating_sub(ts))
    }
    fn between(&self, earlier: u64, later: u64) -> Duration {
        Duration::from_nanos(later.saturating_sub(earlier))
    }
    fn unix_seconds(&self, ts: u64) -> f64 {
        (self.start_unix + Duration::from_nanos(ts)).as_secs_f64()
    }
}
