//! Alert configuration and its wire representation.

use crate::MonitorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Check period used when a configured period is zero.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Threshold used until the user configures one.
pub const DEFAULT_THRESHOLD: f64 = 65_900.0;

/// Which side of the threshold triggers an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    /// Alert when `price >= threshold`.
    #[default]
    #[serde(rename = "greater")]
    AboveOrEqual,
    /// Alert when `price <= threshold`.
    #[serde(rename = "less")]
    BelowOrEqual,
}

impl Direction {
    /// Parse the wire name ("greater" / "less").
    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "greater" => Some(Direction::AboveOrEqual),
            "less" => Some(Direction::BelowOrEqual),
            _ => None,
        }
    }

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::AboveOrEqual => "greater",
            Direction::BelowOrEqual => "less",
        }
    }

    /// Comparison symbol used in alert messages.
    pub fn symbol(self) -> &'static str {
        match self {
            Direction::AboveOrEqual => "≥",
            Direction::BelowOrEqual => "≤",
        }
    }

    /// Whether `price` satisfies this direction against `threshold`.
    #[inline]
    pub fn is_satisfied(self, price: f64, threshold: f64) -> bool {
        match self {
            Direction::AboveOrEqual => price >= threshold,
            Direction::BelowOrEqual => price <= threshold,
        }
    }
}

/// The single active alert configuration.
///
/// Replaced wholesale on every update; there are no partial updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlertConfig {
    /// Price level to compare against, in quote units.
    pub threshold: f64,
    /// Time between ordinary checks.
    pub period: Duration,
    /// Side of the threshold that triggers.
    pub direction: Direction,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            period: DEFAULT_PERIOD,
            direction: Direction::AboveOrEqual,
        }
    }
}

impl AlertConfig {
    pub fn new(threshold: f64, period: Duration, direction: Direction) -> Self {
        Self {
            threshold,
            period,
            direction,
        }
    }

    /// Reject non-positive thresholds and zero periods.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(MonitorError::InvalidConfig(format!(
                "price must be a positive number, got {}",
                self.threshold
            )));
        }
        if self.period.is_zero() {
            return Err(MonitorError::InvalidConfig(
                "interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Period to wait before the next check, falling back to [`DEFAULT_PERIOD`].
    pub fn effective_period(&self) -> Duration {
        if self.period.is_zero() {
            DEFAULT_PERIOD
        } else {
            self.period
        }
    }

    /// Whether `price` satisfies this configuration.
    #[inline]
    pub fn is_triggered(&self, price: f64) -> bool {
        self.direction.is_satisfied(price, self.threshold)
    }
}

/// JSON shape of the configuration exchanged with the API layer.
///
/// `interval` is in minutes. `direction` stays a plain string so unknown
/// values are rejected by validation instead of by the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigPayload {
    pub price: f64,
    pub interval: i64,
    pub direction: String,
}

impl From<&AlertConfig> for ConfigPayload {
    fn from(config: &AlertConfig) -> Self {
        Self {
            price: config.threshold,
            interval: (config.period.as_secs() / 60) as i64,
            direction: config.direction.as_str().to_string(),
        }
    }
}

impl TryFrom<ConfigPayload> for AlertConfig {
    type Error = MonitorError;

    fn try_from(payload: ConfigPayload) -> Result<Self, Self::Error> {
        if payload.interval <= 0 {
            return Err(MonitorError::InvalidConfig(
                "Invalid price or interval".to_string(),
            ));
        }
        let direction = Direction::from_name(&payload.direction).ok_or_else(|| {
            MonitorError::InvalidConfig("Direction must be 'greater' or 'less'".to_string())
        })?;

        let secs = (payload.interval as u64).checked_mul(60).ok_or_else(|| {
            MonitorError::InvalidConfig(format!(
                "interval of {} minutes is too large",
                payload.interval
            ))
        })?;

        let config = AlertConfig::new(payload.price, Duration::from_secs(secs), direction);
        config.validate()?;
        Ok(config)
    }
}
