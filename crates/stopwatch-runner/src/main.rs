//! stopwatch runner
//!
//! Usage: `stopwatch-runner [SCRIPT] [--config PATH]`
//! - SCRIPT: command script file; stdin when omitted
//! - --config: YAML config (strict); defaults when omitted
//! - RUST_LOG overrides `log.filter`; logs go to stderr

use std::process::ExitCode;

use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use stopwatch_core::error::{Result, StopwatchError};
use stopwatch_runner::{app_state::AppState, config, run_script, RunSummary};

struct Args {
    script: Option<String>,
    config: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        script: None,
        config: None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--config" | "-c" => {
                let path = it
                    .next()
                    .ok_or_else(|| StopwatchError::BadRequest("--config needs a path".into()))?;
                args.config = Some(path);
            }
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(StopwatchError::BadRequest(format!("unknown argument: {flag}")));
            }
            path if args.script.is_none() => args.script = Some(path.to_string()),
            extra => {
                return Err(StopwatchError::BadRequest(format!("unexpected argument: {extra}")));
            }
        }
    }
    Ok(args)
}

async fn run(args: Args) -> Result<RunSummary> {
    let cfg = match &args.config {
        Some(path) => config::load_from_file(path)?,
        None => config::RunnerConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log.filter));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let state = AppState::new(cfg)?;
    let mut stdout = tokio::io::stdout();

    tracing::info!(script = args.script.as_deref().unwrap_or("-"), "stopwatch-runner starting");
    let summary = match args.script.as_deref() {
        Some(path) if path != "-" => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(|e| StopwatchError::Internal(format!("open script failed: {e}")))?;
            run_script(&state, BufReader::new(file), &mut stdout).await?
        }
        _ => run_script(&state, BufReader::new(tokio::io::stdin()), &mut stdout).await?,
    };
    tracing::info!(
        commands = summary.commands,
        failed = summary.failed_commands,
        aborted = summary.aborted,
        "stopwatch-runner finished"
    );
    Ok(summary)
}

#[tokio::main]
async fn main() -> ExitCode {
    let result = match parse_args() {
        Ok(args) => run(args).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(summary) if summary.aborted => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("stopwatch-runner: {e} ({})", e.code().as_str());
            ExitCode::from(2)
        }
    }
}
