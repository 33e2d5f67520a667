//! Snapshot record returned by `get` and `stop`.

use std::time::Duration;

use serde::Serialize;

use crate::format::format_elapsed;

/// Point-in-time view of one timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TimerRecord {
    /// Timer name.
    pub name: String,
    /// Elapsed time rendered as `HH:MM:SS.ff`.
    pub elapsed_time: String,
    /// Whether the timer was running when the snapshot was taken.
    pub is_running: bool,
    /// Unformatted elapsed time.
    #[serde(skip)]
    pub elapsed: Duration,
}

impl TimerRecord {
    pub fn new(name: impl Into<String>, elapsed: Duration, is_running: bool) -> Self {
        Self {
            name: name.into(),
            elapsed_time: format_elapsed(elapsed),
            is_running,
            elapsed,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_pascal_case_without_raw_duration() {
        let r = TimerRecord::new("build", Duration::from_millis(2_500), false);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(
            v,
            serde_json::json!({
                "Name": "build",
                "ElapsedTime": "00:00:02.50",
                "IsRunning": false
            })
        );
    }
}
