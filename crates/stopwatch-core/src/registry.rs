//! Timer registry: `name -> Timer`.
//!
//! Per-key atomicity comes from `DashMap` shard locks:
//! - start uses the entry API, so two concurrent starts cannot both create.
//! - remove uses `remove_if`, so two concurrent removes cannot both succeed.
//! - stop/reset mutate in place under `get_mut`.
//!
//! Never hold a map guard across another map call on the same registry; a
//! second lock on the same shard from the same thread deadlocks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::clock::{Clock, SystemClock};
use crate::error::{Result, StopwatchError};
use crate::record::TimerRecord;

/// One named timer.
#[derive(Debug, Clone, Copy)]
struct Timer {
    start: Instant,
    /// Frozen elapsed; only meaningful once stopped.
    elapsed: Duration,
    running: bool,
}

impl Timer {
    fn started(now: Instant) -> Self {
        Self {
            start: now,
            elapsed: Duration::ZERO,
            running: true,
        }
    }

    fn elapsed_at(&self, now: Instant) -> Duration {
        if self.running {
            now.saturating_duration_since(self.start)
        } else {
            self.elapsed
        }
    }
}

/// Concurrent registry of named timers.
pub struct TimerRegistry<C = SystemClock> {
    timers: DashMap<String, Timer>,
    initialized: AtomicBool,
    clock: C,
}

impl TimerRegistry<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TimerRegistry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerRegistry<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            timers: DashMap::new(),
            initialized: AtomicBool::new(false),
            clock,
        }
    }

    /// Registry with an explicit shard count (power of two, at least 2).
    pub fn with_shards(clock: C, shards: usize) -> Result<Self> {
        if shards < 2 || !shards.is_power_of_two() {
            return Err(StopwatchError::BadRequest(format!(
                "shard count must be a power of two >= 2, got {shards}"
            )));
        }
        Ok(Self {
            timers: DashMap::with_shard_amount(shards),
            initialized: AtomicBool::new(false),
            clock,
        })
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// True once any timer has ever been started on this registry.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.timers.contains_key(name)
    }

    /// Current timer names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.timers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Start one timer per name. With `force`, an existing timer is replaced
    /// by a fresh one; without it the existing timer is left untouched.
    pub fn start<I, S>(&self, names: I, force: bool) -> Vec<Result<()>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.start_one(name.as_ref(), force))
            .collect()
    }

    fn start_one(&self, name: &str, force: bool) -> Result<()> {
        let now = self.clock.now();
        match self.timers.entry(name.to_string()) {
            Entry::Vacant(v) => {
                v.insert(Timer::started(now));
            }
            Entry::Occupied(mut o) if force => {
                o.insert(Timer::started(now));
                tracing::debug!(timer = %name, "timer restarted (force)");
            }
            Entry::Occupied(_) => return Err(StopwatchError::AlreadyExists(name.to_string())),
        }
        self.initialized.store(true, Ordering::Release);
        tracing::debug!(timer = %name, "timer started");
        Ok(())
    }

    /// Snapshot the named timers, or every timer when `names` is empty.
    pub fn get<I, S>(&self, names: I) -> Result<Vec<Result<TimerRecord>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_initialized() {
            return Err(StopwatchError::RegistryEmpty);
        }

        let mut names = names.into_iter().peekable();
        if names.peek().is_none() {
            let now = self.clock.now();
            return Ok(self
                .timers
                .iter()
                .map(|e| Ok(TimerRecord::new(e.key().as_str(), e.elapsed_at(now), e.running)))
                .collect());
        }

        Ok(names.map(|name| self.get_one(name.as_ref())).collect())
    }

    fn get_one(&self, name: &str) -> Result<TimerRecord> {
        let now = self.clock.now();
        let t = *self
            .timers
            .get(name)
            .ok_or_else(|| StopwatchError::NotFound(name.to_string()))?;
        Ok(TimerRecord::new(name, t.elapsed_at(now), t.running))
    }

    /// Stop the named timers. Stopping a stopped timer reports the same
    /// frozen elapsed again.
    pub fn stop<I, S>(&self, names: I) -> Result<Vec<Result<TimerRecord>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_initialized() {
            return Err(StopwatchError::RegistryEmpty);
        }
        Ok(names
            .into_iter()
            .map(|name| self.stop_one(name.as_ref()))
            .collect())
    }

    fn stop_one(&self, name: &str) -> Result<TimerRecord> {
        let now = self.clock.now();
        let mut t = self
            .timers
            .get_mut(name)
            .ok_or_else(|| StopwatchError::NotFound(name.to_string()))?;
        if t.running {
            t.elapsed = now.saturating_duration_since(t.start);
            t.running = false;
            tracing::debug!(timer = %name, elapsed_ms = t.elapsed.as_millis() as u64, "timer stopped");
        }
        Ok(TimerRecord::new(name, t.elapsed, false))
    }

    /// Zero the named timers and set them running again.
    pub fn reset<I, S>(&self, names: I) -> Vec<Result<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|name| self.reset_one(name.as_ref()))
            .collect()
    }

    fn reset_one(&self, name: &str) -> Result<String> {
        let now = self.clock.now();
        let mut t = self
            .timers
            .get_mut(name)
            .ok_or_else(|| StopwatchError::NotFound(name.to_string()))?;
        *t = Timer::started(now);
        tracing::debug!(timer = %name, "timer reset");
        Ok(format!("Timer '{name}' has been reset."))
    }

    /// Remove the named timers. Running timers are only removed with `force`.
    pub fn remove<I, S>(&self, names: I, force: bool) -> Result<Vec<Result<String>>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.is_initialized() {
            return Err(StopwatchError::RegistryUndefined);
        }
        Ok(names
            .into_iter()
            .map(|name| self.remove_one(name.as_ref(), force))
            .collect())
    }

    fn remove_one(&self, name: &str, force: bool) -> Result<String> {
        // Guard dropped before remove_if (same shard).
        let running = self
            .timers
            .get(name)
            .map(|t| t.running)
            .ok_or_else(|| StopwatchError::NotFound(name.to_string()))?;
        if running && !force {
            return Err(StopwatchError::StillRunning(name.to_string()));
        }

        match self.timers.remove_if(name, |_, t| force || !t.running) {
            Some(_) => {
                tracing::debug!(timer = %name, force, "timer removed");
                Ok(format!("Timer '{name}' has been removed."))
            }
            None => Err(StopwatchError::RemovalFailed(name.to_string())),
        }
    }
}
