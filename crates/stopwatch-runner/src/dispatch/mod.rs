//! Command execution against the injected timer registry.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, Outcome, Registry};
