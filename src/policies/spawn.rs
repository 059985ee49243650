//! Execution policy backed by a Tokio runtime (`tokio` feature).

use tokio::runtime::Handle;

use super::policy::{ExecutionPolicy, Task};

/// Hands each task to a Tokio runtime's blocking pool.
///
/// Tasks run outside the `publish` call, in no particular order relative to
/// other spawned tasks; per-subscription ordering is not preserved. Pair
/// with [`TaskQueue`](crate::TaskQueue) instead when FIFO replay matters.
#[derive(Clone, Debug)]
pub struct SpawnPolicy {
    handle: Handle,
}

impl SpawnPolicy {
    /// Creates a policy spawning onto the given runtime handle.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates a policy spawning onto the current runtime.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime context, like
    /// [`Handle::current`] does.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl ExecutionPolicy for SpawnPolicy {
    fn execute(&self, task: Task) {
        let _join = self.handle.spawn_blocking(task);
    }

    fn is_synchronous(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use crate::{Signal, SourceExt};

    use super::*;

    #[test]
    fn test_spawned_task_runs_off_publish() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let signal = Signal::<(i32,)>::new();
        let (tx, rx) = mpsc::channel();

        signal.source().connect_via(
            move |v: i32| {
                tx.send(v).ok();
            },
            SpawnPolicy::new(runtime.handle().clone()),
        );

        signal.publish((9,));
        let got = rx.recv_timeout(Duration::from_secs(5)).expect("delivered");
        assert_eq!(got, 9);
    }
}
