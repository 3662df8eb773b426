//! Offline price source for demo runs.

use crate::feed::PriceFeed;
use async_trait::async_trait;
use monitor_core::MonitorError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Deterministic drifting price around a base level.
///
/// Each fetch advances an internal counter; the price oscillates by up to
/// `amplitude` (as a fraction of `base`) so thresholds near the base are
/// crossed in both directions over time.
#[derive(Debug)]
pub struct SimulatedPriceFeed {
    symbol: String,
    base: f64,
    amplitude: f64,
    counter: AtomicU64,
}

impl SimulatedPriceFeed {
    pub fn new(symbol: impl Into<String>, base: f64) -> Self {
        Self {
            symbol: symbol.into(),
            base,
            amplitude: 0.01,
            counter: AtomicU64::new(0),
        }
    }

    /// Set the oscillation amplitude as a fraction of the base price.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    fn price_at(&self, step: u64) -> f64 {
        let variance = 1.0 + (step as f64 * 0.5).sin() * self.amplitude;
        self.base * variance
    }
}

#[async_trait]
impl PriceFeed for SimulatedPriceFeed {
    async fn fetch_price(&self) -> Result<f64, MonitorError> {
        let step = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(self.price_at(step))
    }

    fn symbol(&self) -> &str {
        &self.symbol
    }
}
