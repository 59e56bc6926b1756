//! Fixed-interval background tasks for watch mode.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// A named task that runs `tick` on a fixed interval until cancelled.
/// The first tick fires immediately. The interval never backs off; a tick
/// that finds nothing to do is expected to cost nothing.
pub struct RecurringTask {
    name: &'static str,
    cancel: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RecurringTask {
    pub fn spawn<F, Fut>(name: &'static str, every: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cancel, mut cancelled) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(every);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = timer.tick() => tick().await,
                    _ = cancelled.changed() => {
                        debug!("task '{name}' stopped");
                        break;
                    }
                }
            }
        });
        Self {
            name,
            cancel,
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop the task and wait for the current tick to finish.
    pub async fn cancel(self) {
        let _ = self.cancel.send(true);
        let _ = self.handle.await;
    }
}
