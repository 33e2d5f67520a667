use serde::Deserialize;
use stopwatch_core::error::{Result, StopwatchError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerConfig {
    pub version: u32,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub runner: RunnerSection,

    #[serde(default)]
    pub registry: RegistrySection,

    #[serde(default)]
    pub log: LogSection,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            output: OutputSection::default(),
            runner: RunnerSection::default(),
            registry: RegistrySection::default(),
            log: LogSection::default(),
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(StopwatchError::UnsupportedVersion);
        }

        self.runner.validate()?;
        self.registry.validate()?;
        self.log.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Text,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockKind {
    #[default]
    System,
    /// Deterministic clock; `sleep` advances it instead of waiting.
    Manual,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunnerSection {
    #[serde(default)]
    pub fail_fast: bool,

    #[serde(default)]
    pub clock: ClockKind,

    #[serde(default = "default_max_names_per_command")]
    pub max_names_per_command: usize,
}

impl Default for RunnerSection {
    fn default() -> Self {
        Self {
            fail_fast: false,
            clock: ClockKind::default(),
            max_names_per_command: default_max_names_per_command(),
        }
    }
}

impl RunnerSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=4096).contains(&self.max_names_per_command) {
            return Err(StopwatchError::BadRequest(
                "runner.max_names_per_command must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_names_per_command() -> usize {
    256
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    /// 0 keeps the dashmap default.
    #[serde(default)]
    pub shards: usize,
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if self.shards != 0 && (self.shards < 2 || !self.shards.is_power_of_two()) {
            return Err(StopwatchError::BadRequest(
                "registry.shards must be 0 or a power of two >= 2".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogSection {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl LogSection {
    pub fn validate(&self) -> Result<()> {
        EnvFilter::try_new(&self.filter)
            .map_err(|e| StopwatchError::BadRequest(format!("log.filter is invalid: {e}")))?;
        Ok(())
    }
}

fn default_log_filter() -> String {
    "info".into()
}
