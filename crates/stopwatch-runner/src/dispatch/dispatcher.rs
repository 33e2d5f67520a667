use std::sync::Arc;
use std::time::Duration;

use stopwatch_core::error::{Result, StopwatchError};
use stopwatch_core::{Clock, ManualClock, TimerRecord, TimerRegistry};

use crate::script::Command;

/// Registry type shared by the runner (clock picked at startup).
pub type Registry = TimerRegistry<Arc<dyn Clock>>;

/// One line of command output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Snapshot from `get` / `stop`.
    Record(TimerRecord),
    /// Confirmation from `reset` / `remove`.
    Message(String),
    /// Sorted names from `list`.
    Names(Vec<String>),
    Failed(StopwatchError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

/// Executes parsed commands. Holds the registry it was given; never owns a
/// global one.
pub struct Dispatcher {
    registry: Arc<Registry>,
    manual_clock: Option<Arc<ManualClock>>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, manual_clock: Option<Arc<ManualClock>>) -> Self {
        Self {
            registry,
            manual_clock,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn execute(&self, cmd: Command) -> Vec<Outcome> {
        let verb = cmd.verb();
        let outcomes = match cmd {
            Command::Start { names, force } => self
                .registry
                .start(&names, force)
                .into_iter()
                .filter_map(|r| r.err().map(Outcome::Failed))
                .collect(),
            Command::Get { names } => batch(self.registry.get(&names), Outcome::Record),
            Command::Stop { names } => batch(self.registry.stop(&names), Outcome::Record),
            Command::Reset { names } => batch(Ok(self.registry.reset(&names)), Outcome::Message),
            Command::Remove { names, force } => {
                batch(self.registry.remove(&names, force), Outcome::Message)
            }
            Command::Sleep { millis } => {
                self.sleep(Duration::from_millis(millis)).await;
                vec![]
            }
            Command::List => vec![Outcome::Names(self.registry.names())],
        };

        for o in &outcomes {
            if let Outcome::Failed(e) = o {
                tracing::warn!(
                    command = verb,
                    code = e.code().as_str(),
                    timer = e.timer().unwrap_or("-"),
                    "command failed"
                );
            }
        }
        outcomes
    }

    async fn sleep(&self, d: Duration) {
        match &self.manual_clock {
            Some(clock) => clock.advance(d),
            None => tokio::time::sleep(d).await,
        }
    }
}

/// Flatten an aggregate result of per-name results into outcomes.
fn batch<T>(res: Result<Vec<Result<T>>>, ok: fn(T) -> Outcome) -> Vec<Outcome> {
    match res {
        Ok(items) => items
            .into_iter()
            .map(|r| r.map_or_else(Outcome::Failed, ok))
            .collect(),
        Err(e) => vec![Outcome::Failed(e)],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use stopwatch_core::ErrorCode;

    fn dispatcher() -> Dispatcher {
        let clock = Arc::new(ManualClock::new());
        let shared: Arc<dyn Clock> = clock.clone();
        Dispatcher::new(Arc::new(TimerRegistry::with_clock(shared)), Some(clock))
    }

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn successful_start_is_silent() {
        let d = dispatcher();
        let out = d.execute(Command::Start { names: names(&["A"]), force: false }).await;
        assert!(out.is_empty());
        assert!(d.registry().contains("A"));
    }

    #[tokio::test]
    async fn sleep_advances_manual_clock() {
        let d = dispatcher();
        d.execute(Command::Start { names: names(&["A"]), force: false }).await;
        d.execute(Command::Sleep { millis: 1_500 }).await;

        let out = d.execute(Command::Stop { names: names(&["A"]) }).await;
        match &out[..] {
            [Outcome::Record(r)] => assert_eq!(r.elapsed_time, "00:00:01.50"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn aggregate_error_is_single_outcome() {
        let d = dispatcher();
        let out = d.execute(Command::Remove { names: names(&["A", "B"]), force: true }).await;
        assert_eq!(out, vec![Outcome::Failed(StopwatchError::RegistryUndefined)]);
    }

    #[tokio::test]
    async fn partial_failure_keeps_order() {
        let d = dispatcher();
        d.execute(Command::Start { names: names(&["X"]), force: false }).await;
        let out = d.execute(Command::Reset { names: names(&["Y", "X"]) }).await;
        assert_eq!(out.len(), 2);
        match &out[0] {
            Outcome::Failed(e) => assert_eq!(e.code(), ErrorCode::NotFound),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(out[1], Outcome::Message("Timer 'X' has been reset.".into()));
    }

    #[tokio::test]
    async fn list_is_sorted() {
        let d = dispatcher();
        d.execute(Command::Start { names: names(&["b", "a"]), force: false }).await;
        assert_eq!(
            d.execute(Command::List).await,
            vec![Outcome::Names(names(&["a", "b"]))]
        );
    }
}
