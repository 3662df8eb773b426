//! Periodic price check loop.
//!
//! Runs one check immediately, then alternates between waiting and checking.
//! A wait ends either when the configured period elapses or when the
//! [`ConfigPort`] signals a config change, whichever comes first.

use crate::evaluator::evaluate;
use crate::port::ConfigPort;
use crate::state::SharedStateRef;
use monitor_alerts::Notifier;
use monitor_core::MonitorError;
use monitor_feeds::PriceFeed;
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{debug, info, warn};

/// What a single check did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Price fetched and evaluated. `notified` is true on a rising edge,
    /// whether or not delivery succeeded.
    Checked { price: f64, notified: bool },
    /// The feed failed; price and armed flag were left untouched.
    FeedFailed(MonitorError),
}

/// Owns the schedule and drives feed -> evaluator -> notifier.
pub struct PriceMonitor {
    state: SharedStateRef,
    feed: Arc<dyn PriceFeed>,
    notifier: Arc<dyn Notifier>,
    wake: Arc<Notify>,
    title: String,
}

impl PriceMonitor {
    pub fn new(
        state: SharedStateRef,
        feed: Arc<dyn PriceFeed>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let title = format!("{} price alert", feed.symbol());
        Self {
            state,
            feed,
            notifier,
            wake: Arc::new(Notify::new()),
            title,
        }
    }

    /// Override the notification title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Port for config writers, wired to this monitor's wake signal.
    pub fn config_port(&self) -> ConfigPort {
        ConfigPort::new(self.state.clone(), self.wake.clone())
    }

    pub fn state(&self) -> &SharedStateRef {
        &self.state
    }

    /// Run one check: fetch, store, evaluate, notify on a rising edge.
    pub async fn tick(&self) -> TickOutcome {
        self.state.stats.record_check();

        let price = match self.feed.fetch_price().await {
            Ok(price) => price,
            Err(e) => {
                self.state.stats.record_feed_failure();
                warn!(symbol = self.feed.symbol(), error = %e, "Error fetching price");
                return TickOutcome::FeedFailed(e);
            }
        };

        self.state.set_price(price);
        info!("Current {} price: ${:.2}", self.feed.symbol(), price);

        let config = self.state.config();
        let eval = evaluate(price, &config, self.state.is_armed());

        // Only the edge claim sets the flag. A still-armed streak never writes
        // it back, so a reset from a concurrent config update survives.
        if !eval.armed {
            self.state.set_armed(false);
        }
        let fire = eval.should_notify && self.state.try_arm();

        if !fire {
            return TickOutcome::Checked {
                price,
                notified: false,
            };
        }

        self.state.stats.record_alert();
        info!("Alert triggered! {}", eval.message);

        if let Err(e) = self.notifier.notify(&self.title, &eval.message).await {
            self.state.stats.record_notify_failure();
            warn!(sink = self.notifier.name(), error = %e, "Failed to push notification");
        }

        TickOutcome::Checked {
            price,
            notified: true,
        }
    }

    /// Run forever. Abort the task to stop.
    pub async fn run(self) {
        info!(symbol = self.feed.symbol(), "Starting price monitor");

        self.tick().await;

        loop {
            let period = self.state.config().effective_period();
            debug!(period_secs = period.as_secs(), "Waiting for next check");

            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = self.wake.notified() => {
                    info!("Config updated, restarting monitor timer");
                }
            }

            self.tick().await;
        }
    }
}
