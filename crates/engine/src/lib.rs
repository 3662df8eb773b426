//! Price monitor engine.
//!
//! This crate holds the state shared between the check loop and config
//! writers, the rising-edge evaluator, the loop itself, and the port the API
//! layer uses to change config.

pub mod evaluator;
pub mod monitor;
pub mod port;
pub mod state;

pub use evaluator::*;
pub use monitor::*;
pub use port::*;
pub use state::*;
