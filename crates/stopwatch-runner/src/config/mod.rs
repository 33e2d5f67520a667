//! Runner config loader (strict parsing).

pub mod schema;

use std::fs;

use stopwatch_core::error::{Result, StopwatchError};

pub use schema::{
    ClockKind, LogSection, OutputFormat, OutputSection, RegistrySection, RunnerConfig,
    RunnerSection,
};

pub fn load_from_file(path: &str) -> Result<RunnerConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| StopwatchError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<RunnerConfig> {
    let cfg: RunnerConfig = serde_yaml::from_str(s)
        .map_err(|e| StopwatchError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
