//! Alert delivery for the price monitor.
//!
//! This crate provides:
//! - The `Notifier` capability used by the monitor loop
//! - Log, desktop-command and Telegram sinks
//! - Fan-out delivery to several sinks at once

pub mod command;
pub mod notifier;
pub mod telegram;

pub use command::CommandNotifier;
pub use notifier::{FanoutNotifier, LogNotifier, Notifier};
pub use telegram::{format_alert_message, TelegramNotifier};
