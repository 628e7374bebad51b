//! Cancellable periodic tasks
//!
//! A poller runs `tick` immediately and then once per period until its
//! [`PollHandle`] is shut down or dropped. A tick that is still running when
//! cancellation arrives is dropped, which aborts any request it was awaiting.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::{CancellationToken, DropGuard};

/// Owner of a running poller. Dropping it cancels the task.
pub struct PollHandle {
    name: &'static str,
    token: CancellationToken,
    handle: JoinHandle<()>,
    _guard: DropGuard,
}

impl PollHandle {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel the task and wait for it to exit
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            tracing::error!(task = %self.name, error = %e, "Poller task failed");
        }
    }
}

/// Spawn `tick` every `period`, stopping when `shutdown` is cancelled
/// or the returned handle is dropped.
pub fn spawn_periodic<F, Fut>(
    name: &'static str,
    period: Duration,
    shutdown: CancellationToken,
    mut tick: F,
) -> PollHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let token = shutdown;
    let task_token = token.clone();

    let handle = tokio::spawn(async move {
        tracing::debug!(task = %name, period_secs = period.as_secs(), "Poller started");
        let mut interval = tokio::time::interval(period);
        // Slow ticks must not cause a burst of catch-up ticks
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = task_token.cancelled() => break,
                _ = interval.tick() => {}
            }

            tokio::select! {
                biased;
                _ = task_token.cancelled() => {
                    tracing::debug!(task = %name, "Poller cancelled during tick");
                    break;
                }
                _ = tick() => {}
            }
        }

        tracing::debug!(task = %name, "Poller stopped");
    });

    PollHandle {
        name,
        _guard: token.clone().drop_guard(),
        token,
        handle,
    }
}
