//! Configuration entry point for the API layer.

use crate::state::{SharedStateRef, StatsSummary};
use monitor_core::{AlertConfig, ConfigPayload, MonitorError};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::info;

/// Validates and applies config updates, then wakes the monitor loop.
///
/// Cloning is cheap; every clone shares the same state and wake signal.
#[derive(Debug, Clone)]
pub struct ConfigPort {
    state: SharedStateRef,
    wake: Arc<Notify>,
}

impl ConfigPort {
    pub fn new(state: SharedStateRef, wake: Arc<Notify>) -> Self {
        Self { state, wake }
    }

    /// Replace the active config.
    ///
    /// The config is stored before the armed flag is cleared, and both happen
    /// before the wake, so the next check never sees the old flag with the
    /// new threshold. On error nothing is mutated.
    pub fn update(&self, config: AlertConfig) -> Result<(), MonitorError> {
        config.validate()?;

        self.state.set_config(config);
        self.state.set_armed(false);
        // Stores at most one permit; repeated updates collapse into one wake.
        self.wake.notify_one();

        info!(
            threshold = config.threshold,
            period_secs = config.period.as_secs(),
            direction = config.direction.as_str(),
            "Config updated"
        );
        Ok(())
    }

    /// Convert a wire payload and apply it.
    pub fn apply(&self, payload: ConfigPayload) -> Result<AlertConfig, MonitorError> {
        let config = AlertConfig::try_from(payload)?;
        self.update(config)?;
        Ok(config)
    }

    pub fn query(&self) -> AlertConfig {
        self.state.config()
    }

    pub fn current_price(&self) -> f64 {
        self.state.price()
    }

    pub fn is_armed(&self) -> bool {
        self.state.is_armed()
    }

    pub fn stats(&self) -> StatsSummary {
        self.state.stats_summary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_state;
    use monitor_core::Direction;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn port() -> ConfigPort {
        ConfigPort::new(create_state(AlertConfig::default()), Arc::new(Notify::new()))
    }

    fn payload(price: f64, interval: i64, direction: &str) -> ConfigPayload {
        ConfigPayload {
            price,
            interval,
            direction: direction.to_string(),
        }
    }

    #[test]
    fn test_update_replaces_config_and_disarms() {
        let port = port();
        port.state.set_armed(true);

        let config = AlertConfig::new(70_000.0, Duration::from_secs(120), Direction::BelowOrEqual);
        port.update(config).unwrap();

        assert_eq!(port.query(), config);
        assert!(!port.is_armed());
    }

    #[test]
    fn test_zero_price_rejected_without_mutation() {
        let port = port();
        port.state.set_armed(true);

        let err = port
            .update(AlertConfig::new(0.0, Duration::from_secs(60), Direction::AboveOrEqual))
            .unwrap_err();

        assert!(matches!(err, MonitorError::InvalidConfig(_)));
        assert_eq!(port.query(), AlertConfig::default());
        assert!(port.is_armed());
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let port = port();
        let err = port.apply(payload(70_000.0, 5, "sideways")).unwrap_err();
        assert!(matches!(err, MonitorError::InvalidConfig(_)));
        assert_eq!(port.query(), AlertConfig::default());
    }

    #[test]
    fn test_apply_payload() {
        let port = port();
        let config = port.apply(payload(61_000.0, 1, "less")).unwrap();
        assert_eq!(config.period, Duration::from_secs(60));
        assert_eq!(port.query(), config);
    }

    #[test]
    fn test_reads_do_not_mutate() {
        let port = port();
        port.state.set_price(65_000.0);
        for _ in 0..3 {
            assert_eq!(port.query(), AlertConfig::default());
            assert_eq!(port.current_price(), 65_000.0);
            assert!(!port.is_armed());
        }
    }

    #[tokio::test]
    async fn test_update_signals_wake() {
        let port = port();
        port.update(AlertConfig::default()).unwrap();

        // The permit is stored, so this completes without a waiter present.
        tokio::time::timeout(Duration::from_secs(1), port.wake.notified())
            .await
            .expect("wake permit should be pending");
    }

    #[tokio::test]
    async fn test_rejected_update_does_not_wake() {
        let port = port();
        let _ = port.apply(payload(-5.0, 5, "greater"));

        let woke = tokio::time::timeout(Duration::from_millis(20), port.wake.notified()).await;
        assert!(woke.is_err());
    }
}
