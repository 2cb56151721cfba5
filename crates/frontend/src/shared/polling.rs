//! Cancellable periodic task.
//!
//! The loop sleeps on a `TimeoutFuture` between ticks. `stop()` ends the
//! current run; its loop exits at the next wake-up and each tick receives a
//! [`PollGuard`] so results that arrive after stop can be dropped.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// Liveness check handed to each tick. It belongs to one run: once that run
/// is stopped the guard stays dead, even if the task is started again.
#[derive(Debug, Clone)]
pub struct PollGuard {
    epoch: Arc<AtomicU64>,
    run: u64,
}

impl PollGuard {
    pub fn is_live(&self) -> bool {
        self.epoch.load(Ordering::SeqCst) == self.run
    }
}

#[derive(Debug, Clone, Default)]
pub struct PollingTask {
    running: Arc<AtomicBool>,
    epoch: Arc<AtomicU64>,
}

impl PollingTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new run, or `None` if one is already going
    fn begin(&self) -> Option<PollGuard> {
        if self.running.swap(true, Ordering::SeqCst) {
            return None;
        }
        let run = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        Some(PollGuard {
            epoch: self.epoch.clone(),
            run,
        })
    }

    /// Runs `tick` immediately, then every `interval_ms`, until stopped.
    /// A second start on a running task is ignored.
    pub fn start<F, Fut>(&self, interval_ms: u32, tick: F)
    where
        F: Fn(PollGuard) -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let Some(guard) = self.begin() else {
            return;
        };
        spawn_local(async move {
            while guard.is_live() {
                tick(guard.clone()).await;
                TimeoutFuture::new(interval_ms).await;
            }
            log::debug!("polling task stopped");
        });
    }

    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            self.epoch.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Starts a polling task tied to the current component: it stops when the
/// owner is cleaned up.
pub fn use_polling<F, Fut>(interval_ms: u32, tick: F) -> PollingTask
where
    F: Fn(PollGuard) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let task = PollingTask::new();
    task.start(interval_ms, tick);
    let on_unmount = task.clone();
    on_cleanup(move || on_unmount.stop());
    task
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_follows_stop() {
        let task = PollingTask::new();
        assert!(!task.is_running());

        let guard = task.begin().unwrap();
        assert!(guard.is_live());
        assert!(task.is_running());
        assert!(task.begin().is_none());

        task.stop();
        assert!(!guard.is_live());
        assert!(!task.is_running());
    }

    #[test]
    fn test_restart_does_not_revive_old_run() {
        let task = PollingTask::new();
        let first = task.begin().unwrap();
        task.stop();

        let second = task.begin().unwrap();
        assert!(second.is_live());
        assert!(!first.is_live());

        task.stop();
        task.stop();
        assert!(!second.is_live());
        assert!(!first.is_live());
    }
}
