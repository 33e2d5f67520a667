//! stopwatch runner library entry.
//!
//! Wires config, the script parser, the dispatcher and output rendering around
//! an injected timer registry. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod render;
pub mod runner;
pub mod script;

pub use runner::{run_script, RunSummary};
