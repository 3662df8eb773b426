//! Core data types for the price monitor.

pub mod config;
pub mod error;

pub use config::*;
pub use error::*;
