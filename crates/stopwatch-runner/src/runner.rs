//! Script execution loop: read line, parse, dispatch, render.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use stopwatch_core::error::{Result, StopwatchError};

use crate::app_state::AppState;
use crate::dispatch::Outcome;
use crate::script::parse_line;

/// What happened during one script run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-blank, non-comment lines processed.
    pub commands: usize,
    /// Commands that produced at least one failure.
    pub failed_commands: usize,
    /// Stopped early because `runner.fail_fast` is set.
    pub aborted: bool,
}

pub async fn run_script<R, W>(state: &AppState, reader: R, out: &mut W) -> Result<RunSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let dispatcher = state.dispatcher();
    let renderer = state.renderer();
    let max_names = state.cfg().runner.max_names_per_command;
    let fail_fast = state.cfg().runner.fail_fast;

    let mut summary = RunSummary::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| StopwatchError::Internal(format!("read script failed: {e}")))?
    {
        line_no += 1;
        let outcomes = match parse_line(&line, max_names) {
            Ok(None) => continue,
            Ok(Some(cmd)) => dispatcher.execute(cmd).await,
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "script line rejected");
                vec![Outcome::Failed(e)]
            }
        };
        summary.commands += 1;

        for o in &outcomes {
            let mut rendered = renderer.render(o)?;
            rendered.push('\n');
            out.write_all(rendered.as_bytes())
                .await
                .map_err(|e| StopwatchError::Internal(format!("write output failed: {e}")))?;
        }

        if outcomes.iter().any(Outcome::is_failure) {
            summary.failed_commands += 1;
            if fail_fast {
                tracing::warn!(line = line_no, "fail_fast set, stopping script");
                summary.aborted = true;
                break;
            }
        }
    }

    out.flush()
        .await
        .map_err(|e| StopwatchError::Internal(format!("flush output failed: {e}")))?;
    Ok(summary)
}
