//! Scoped background tasks.
//!
//! Every task the runtime spawns (the countdown tick source and collaborator
//! calls) is owned by a [`TaskGuard`]. Dropping the guard aborts the task, so
//! releasing a resource is the same as dropping its handle and nothing can
//! post events into a torn-down screen.

use std::{future::Future, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, interval_at},
};

use crate::AppEvent;

/// Owns a spawned task and aborts it on drop.
#[derive(Debug)]
pub struct TaskGuard {
    handle: JoinHandle<()>,
}

impl TaskGuard {
    /// Spawn `future` on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self { handle: tokio::spawn(future) }
    }

    /// Returns true if the task ran to completion or was aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn the countdown tick source.
///
/// Sends [`AppEvent::Tick`] every `period`, starting one full period after
/// the call. Stops on its own if the receiver is gone.
pub fn spawn_ticker(period: Duration, events: mpsc::UnboundedSender<AppEvent>) -> TaskGuard {
    TaskGuard::spawn(async move {
        let mut ticks = interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            if events.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    })
}
