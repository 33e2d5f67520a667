//! Shared application state for the stopwatch runner.
//!
//! Builds the clock and the timer registry from config and hands the registry
//! to the dispatcher explicitly; nothing here is a process-wide singleton.

use std::sync::Arc;

use stopwatch_core::error::Result;
use stopwatch_core::{Clock, ManualClock, SystemClock, TimerRegistry};

use crate::config::{ClockKind, RunnerConfig};
use crate::dispatch::{Dispatcher, Registry};
use crate::render::Renderer;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    dispatcher: Arc<Dispatcher>,
}

struct AppStateInner {
    cfg: RunnerConfig,
    renderer: Renderer,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report a bad registry setup instead of panicking.
    pub fn new(cfg: RunnerConfig) -> Result<Self> {
        let manual = match cfg.runner.clock {
            ClockKind::System => None,
            ClockKind::Manual => Some(Arc::new(ManualClock::new())),
        };
        let clock: Arc<dyn Clock> = match &manual {
            Some(m) => m.clone(),
            None => Arc::new(SystemClock),
        };

        let registry = match cfg.registry.shards {
            0 => TimerRegistry::with_clock(clock),
            n => TimerRegistry::with_shards(clock, n)?,
        };

        Ok(Self::with_registry(cfg, Arc::new(registry), manual))
    }

    /// Build state around an existing registry (tests, embedding hosts).
    pub fn with_registry(
        cfg: RunnerConfig,
        registry: Arc<Registry>,
        manual_clock: Option<Arc<ManualClock>>,
    ) -> Self {
        let renderer = Renderer::new(cfg.output.format);
        tracing::debug!(
            clock = ?cfg.runner.clock,
            format = ?cfg.output.format,
            "runner state built"
        );
        Self {
            inner: Arc::new(AppStateInner { cfg, renderer }),
            dispatcher: Arc::new(Dispatcher::new(registry, manual_clock)),
        }
    }

    pub fn cfg(&self) -> &RunnerConfig {
        &self.inner.cfg
    }

    pub fn renderer(&self) -> Renderer {
        self.inner.renderer
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }
}
