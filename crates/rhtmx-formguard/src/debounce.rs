// File: rhtmx-formguard/src/debounce.rs
// Purpose: Delay validation until edits to a field pause

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::DebounceScope;

struct Timer {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct Timers {
    next_generation: u64,
    pending: HashMap<String, Timer>,
}

/// Re-armable timers keyed by field name (or one shared slot)
///
/// Scheduling again before the delay elapses cancels the pending run.
/// A run whose delay has elapsed is never cancelled.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    scope: DebounceScope,
    timers: Arc<Mutex<Timers>>,
}

impl Debouncer {
    pub fn new(delay: Duration, scope: DebounceScope) -> Self {
        Self {
            delay,
            scope,
            timers: Arc::new(Mutex::new(Timers::default())),
        }
    }

    fn slot(&self, key: &str) -> String {
        match self.scope {
            DebounceScope::PerField => key.to_string(),
            DebounceScope::Shared => String::new(),
        }
    }

    /// Run `task` once `delay` passes without another schedule on the same slot
    pub async fn schedule<F>(&self, key: &str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let slot = self.slot(key);
        let delay = self.delay;
        let timers = self.timers.clone();

        let mut guard = self.timers.lock().await;
        if let Some(previous) = guard.pending.remove(&slot) {
            tracing::trace!("Debounce slot '{}' re-armed", slot);
            previous.handle.abort();
        }

        let generation = guard.next_generation;
        guard.next_generation += 1;

        let task_slot = slot.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut timers = timers.lock().await;
                match timers.pending.get(&task_slot) {
                    Some(timer) if timer.generation == generation => {
                        timers.pending.remove(&task_slot);
                    }
                    _ => return,
                }
            }
            task.await;
        });

        guard.pending.insert(slot, Timer { generation, handle });
    }

    /// Number of timers still waiting for their delay to pass
    pub async fn pending(&self) -> usize {
        self.timers.lock().await.pending.len()
    }

    /// Drop every pending run
    pub async fn cancel_all(&self) {
        let mut guard = self.timers.lock().await;
        for (_, timer) in guard.pending.drain() {
            timer.handle.abort();
        }
    }
}
