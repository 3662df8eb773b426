//! Price sources for the monitor.
//!
//! - `feed` - the `PriceFeed` capability
//! - `rest` - Binance REST ticker feed
//! - `simulator` - offline drifting price for demo runs

pub mod feed;
pub mod rest;
pub mod simulator;

pub use feed::*;
pub use rest::*;
pub use simulator::*;
