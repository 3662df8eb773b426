//! Notification capability and the simple sinks.

use async_trait::async_trait;
use monitor_core::MonitorError;
use std::sync::Arc;
use tracing::{info, warn};

/// Delivers a human-readable alert.
///
/// Delivery is best-effort: callers log a [`MonitorError::NotifyFailed`]
/// and carry on.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, message: &str) -> Result<(), MonitorError>;

    /// Short sink name for logs.
    fn name(&self) -> &str;
}

/// Writes alerts to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), MonitorError> {
        info!(title = title, "🚨 {}", message);
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Delivers every alert to all configured sinks.
///
/// All sinks are attempted even if an earlier one fails; the first failure
/// is returned.
#[derive(Default, Clone)]
pub struct FanoutNotifier {
    sinks: Vec<Arc<dyn Notifier>>,
}

impl FanoutNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn Notifier>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn push(&mut self, sink: Arc<dyn Notifier>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Names of the configured sinks, in delivery order.
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.iter().map(|s| s.name().to_string()).collect()
    }
}

impl std::fmt::Debug for FanoutNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutNotifier")
            .field("sinks", &self.sink_names())
            .finish()
    }
}

#[async_trait]
impl Notifier for FanoutNotifier {
    async fn notify(&self, title: &str, message: &str) -> Result<(), MonitorError> {
        let mut first_error = None;

        for sink in &self.sinks {
            if let Err(e) = sink.notify(title, message).await {
                warn!(sink = sink.name(), error = %e, "Notification sink failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "fanout"
    }
}
