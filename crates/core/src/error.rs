//! Error taxonomy shared by the monitor crates.

use thiserror::Error;

/// Errors surfaced by the monitor core and its collaborators.
///
/// None of these are fatal: a rejected config leaves state untouched, a
/// failed fetch skips one tick, and a failed notification is only logged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MonitorError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Price feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("Notification failed: {0}")]
    NotifyFailed(String),
}
