//! Top-level facade crate for stopwatch.
//!
//! Re-exports the timer registry core and the script runner so users can depend on a single crate.

pub mod core {
    pub use stopwatch_core::*;
}

pub mod runner {
    pub use stopwatch_runner::*;
}
