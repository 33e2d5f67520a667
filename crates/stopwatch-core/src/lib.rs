//! stopwatch core: the named-timer registry and the types around it.
//!
//! This crate owns the timer registry, the clock abstraction it reads time
//! from, the elapsed-time formatting contract, and the error surface shared
//! with the runner. It carries no async runtime or I/O dependencies so it can
//! be embedded directly in test harnesses and scripting hosts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Every failure surfaces as `StopwatchError`/`Result` so a bad timer name
//! never takes the hosting process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod clock;
pub mod error;
pub mod format;
pub mod record;
pub mod registry;

/// Shared result type.
pub use error::{ErrorCode, Result, StopwatchError};

pub use clock::{Clock, ManualClock, SystemClock};
pub use record::TimerRecord;
pub use registry::TimerRegistry;
