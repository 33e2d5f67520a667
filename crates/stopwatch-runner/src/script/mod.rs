//! Line-oriented command scripts.
//!
//! One command per line:
//! - `start NAME... [--force]`
//! - `get [NAME...]`
//! - `stop NAME...`
//! - `reset NAME...`
//! - `remove NAME... [--force]`
//! - `sleep MILLIS`
//! - `list`
//!
//! Blank lines are skipped and a token starting with `#` comments out the rest
//! of the line. The parser never panics; malformed lines are reported as
//! `StopwatchError::BadRequest`.

pub mod command;

pub use command::{parse_line, Command};
