//! State shared between the monitor loop and the API layer.
//!
//! Each field sits behind its own guard. Reading the config and the armed
//! flag back to back is two separate operations, not one snapshot.

use monitor_core::AlertConfig;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Counters for the monitor.
#[derive(Debug, Default)]
pub struct MonitorStats {
    /// Number of ticks run.
    pub checks: AtomicU64,
    /// Number of ticks where the feed failed.
    pub feed_failures: AtomicU64,
    /// Number of rising edges that produced an alert.
    pub alerts_sent: AtomicU64,
    /// Number of alerts the notifier failed to deliver.
    pub notify_failures: AtomicU64,
    /// Start time in milliseconds.
    pub started_at_ms: AtomicU64,
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl MonitorStats {
    pub fn new() -> Self {
        Self {
            started_at_ms: AtomicU64::new(now_ms()),
            ..Default::default()
        }
    }

    pub fn record_check(&self) {
        self.checks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_feed_failure(&self) {
        self.feed_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_alert(&self) {
        self.alerts_sent.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_notify_failure(&self) {
        self.notify_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime_secs(&self) -> u64 {
        now_ms().saturating_sub(self.started_at_ms.load(Ordering::Relaxed)) / 1000
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            checks: self.checks.load(Ordering::Relaxed),
            feed_failures: self.feed_failures.load(Ordering::Relaxed),
            alerts_sent: self.alerts_sent.load(Ordering::Relaxed),
            notify_failures: self.notify_failures.load(Ordering::Relaxed),
            uptime_secs: self.uptime_secs(),
        }
    }
}

/// Summary of statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSummary {
    pub checks: u64,
    pub feed_failures: u64,
    pub alerts_sent: u64,
    pub notify_failures: u64,
    pub uptime_secs: u64,
}

/// Config, last observed price and the alert-armed flag.
#[derive(Debug)]
pub struct SharedState {
    config: RwLock<AlertConfig>,
    /// Last observed price as `f64` bits. 0.0 until the first successful fetch.
    price: AtomicU64,
    /// True once an alert fired for the current streak.
    armed: AtomicBool,
    /// Monitor statistics.
    pub stats: MonitorStats,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}

impl SharedState {
    /// Create state with `config` and the alert disarmed.
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config: RwLock::new(config),
            price: AtomicU64::new(0f64.to_bits()),
            armed: AtomicBool::new(false),
            stats: MonitorStats::new(),
        }
    }

    pub fn config(&self) -> AlertConfig {
        match self.config.read() {
            Ok(config) => *config,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_config(&self, config: AlertConfig) {
        match self.config.write() {
            Ok(mut stored) => *stored = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    /// Last observed price, 0.0 if none yet.
    pub fn price(&self) -> f64 {
        f64::from_bits(self.price.load(Ordering::Acquire))
    }

    pub fn set_price(&self, price: f64) {
        self.price.store(price.to_bits(), Ordering::Release);
    }

    /// Flip the flag false -> true. Returns true if this call flipped it.
    pub fn try_arm(&self) -> bool {
        self.armed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn set_armed(&self, armed: bool) {
        self.armed.store(armed, Ordering::Release);
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    pub fn stats_summary(&self) -> StatsSummary {
        self.stats.summary()
    }
}

/// Shared state handle.
pub type SharedStateRef = Arc<SharedState>;

/// Create shared state.
pub fn create_state(config: AlertConfig) -> SharedStateRef {
    Arc::new(SharedState::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_core::Direction;
    use std::time::Duration;

    #[test]
    fn test_initial_state() {
        let state = SharedState::default();
        assert_eq!(state.config(), AlertConfig::default());
        assert_eq!(state.price(), 0.0);
        assert!(!state.is_armed());
    }

    #[test]
    fn test_config_replaced_wholesale() {
        let state = SharedState::default();
        let config = AlertConfig::new(70_000.0, Duration::from_secs(60), Direction::BelowOrEqual);
        state.set_config(config);
        assert_eq!(state.config(), config);
    }

    #[test]
    fn test_price_roundtrip_keeps_precision() {
        let state = SharedState::default();
        state.set_price(66_000.123_456_78);
        assert_eq!(state.price(), 66_000.123_456_78);
    }

    #[test]
    fn test_try_arm_only_flips_once() {
        let state = SharedState::default();
        assert!(state.try_arm());
        assert!(!state.try_arm());
        assert!(state.is_armed());

        state.set_armed(false);
        assert!(state.try_arm());
    }

    #[test]
    fn test_stats_record() {
        let stats = MonitorStats::new();
        stats.record_check();
        stats.record_check();
        stats.record_feed_failure();
        stats.record_alert();

        let summary = stats.summary();
        assert_eq!(summary.checks, 2);
        assert_eq!(summary.feed_failures, 1);
        assert_eq!(summary.alerts_sent, 1);
        assert_eq!(summary.notify_failures, 0);
        assert!(stats.started_at_ms.load(Ordering::Relaxed) > 0);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let state = create_state(AlertConfig::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let state = state.clone();
                std::thread::spawn(move || {
                    for n in 0..1000 {
                        let threshold = 1.0 + (i * 1000 + n) as f64;
                        state.set_config(AlertConfig::new(
                            threshold,
                            Duration::from_secs(60),
                            Direction::AboveOrEqual,
                        ));
                        assert!(state.config().threshold >= 1.0);
                        state.set_price(threshold);
                        assert!(state.price() >= 1.0);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(state.config().period, Duration::from_secs(60));
    }
}
