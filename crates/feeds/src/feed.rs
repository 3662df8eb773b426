//! Price feed capability consumed by the monitor loop.

use async_trait::async_trait;
use monitor_core::MonitorError;

/// Source of the current price.
///
/// Every failure (network, status, payload) surfaces as
/// [`MonitorError::FeedUnavailable`]. There is no retry policy here; the
/// monitor simply tries again on its next tick.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the latest price.
    async fn fetch_price(&self) -> Result<f64, MonitorError>;

    /// Human-readable name of the instrument, used in alert titles.
    fn symbol(&self) -> &str;
}

