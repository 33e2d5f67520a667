//! Outcome rendering (one line per outcome).
//!
//! `json` emits one object per line: records as `TimerRecord`, confirmations
//! as `{"Message": ..}`, name lists as `{"Names": [..]}`, failures as
//! `{"Error": CODE, "Message": .., "Timer": ..}`. `text` is meant for humans.

use serde_json::json;

use stopwatch_core::error::{Result, StopwatchError};

use crate::config::OutputFormat;
use crate::dispatch::Outcome;

const NAME_WIDTH: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn render(&self, outcome: &Outcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => render_json(outcome),
            OutputFormat::Text => Ok(render_text(outcome)),
        }
    }
}

fn render_json(outcome: &Outcome) -> Result<String> {
    let value = match outcome {
        Outcome::Record(r) => serde_json::to_value(r)
            .map_err(|e| StopwatchError::Internal(format!("serialize record failed: {e}")))?,
        Outcome::Message(m) => json!({ "Message": m }),
        Outcome::Names(n) => json!({ "Names": n }),
        Outcome::Failed(e) => json!({
            "Error": e.code().as_str(),
            "Message": e.to_string(),
            "Timer": e.timer(),
        }),
    };
    Ok(value.to_string())
}

fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Record(r) => {
            let state = if r.is_running { "running" } else { "stopped" };
            format!("{:<width$} {} {state}", r.name, r.elapsed_time, width = NAME_WIDTH)
        }
        Outcome::Message(m) => m.clone(),
        Outcome::Names(n) if n.is_empty() => "(no timers)".to_string(),
        Outcome::Names(n) => n.join(" "),
        Outcome::Failed(e) => format!("error[{}]: {e}", e.code().as_str()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use stopwatch_core::TimerRecord;

    use super::*;

    #[test]
    fn json_error_carries_code_and_timer() {
        let r = Renderer::new(OutputFormat::Json);
        let line = r
            .render(&Outcome::Failed(StopwatchError::NotFound("Y".into())))
            .unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(v["Error"], "NOT_FOUND");
        assert_eq!(v["Timer"], "Y");
        assert_eq!(v["Message"], "timer 'Y' not found");
    }

    #[test]
    fn json_aggregate_error_has_null_timer() {
        let r = Renderer::new(OutputFormat::Json);
        let line = r.render(&Outcome::Failed(StopwatchError::RegistryEmpty)).unwrap();
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(v["Timer"].is_null());
    }

    #[test]
    fn text_record_is_aligned() {
        let r = Renderer::new(OutputFormat::Text);
        let rec = TimerRecord::new("A", Duration::from_millis(1_250), true);
        assert_eq!(
            r.render(&Outcome::Record(rec)).unwrap(),
            format!("A{} 00:00:01.25 running", " ".repeat(15))
        );
    }

    #[test]
    fn text_failure_and_empty_list() {
        let r = Renderer::new(OutputFormat::Text);
        assert_eq!(
            r.render(&Outcome::Failed(StopwatchError::StillRunning("A".into()))).unwrap(),
            "error[STILL_RUNNING]: timer 'A' is still running"
        );
        assert_eq!(r.render(&Outcome::Names(vec![])).unwrap(), "(no timers)");
    }
}
