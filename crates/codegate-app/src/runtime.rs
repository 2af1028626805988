//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`CodeService`]: Asynchronous verify/resend collaborators
//! - [`Driver`]: Platform-specific I/O
//!
//! Events are handled one at a time on a single loop. Background work (the
//! countdown tick source and collaborator calls) runs in scoped tasks that
//! report back through an internal channel, so no task ever mutates the App
//! directly.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{App, AppAction, AppEvent, CodeService, Driver, Outcome, TaskGuard, spawn_ticker};

/// Generic runtime that orchestrates App, CodeService, and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Verify/resend collaborator
pub struct Runtime<D, S>
where
    D: Driver,
    S: CodeService,
{
    driver: D,
    app: App,
    service: Arc<S>,
    events_tx: mpsc::UnboundedSender<AppEvent>,
    events_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Countdown tick source. `None` while released.
    ticker: Option<TaskGuard>,
    /// Outstanding collaborator call. `None` while idle.
    in_flight: Option<TaskGuard>,
}

impl<D, S> Runtime<D, S>
where
    D: Driver,
    S: CodeService,
{
    /// Create a new runtime with the given driver, collaborator and app.
    pub fn new(driver: D, service: S, app: App) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            driver,
            app,
            service: Arc::new(service),
            events_tx,
            events_rx,
            ticker: None,
            in_flight: None,
        }
    }

    /// Run the main event loop until the App quits.
    ///
    /// This is the core orchestration loop that:
    /// 1. Mounts the App (acquires the tick source, first render)
    /// 2. Waits for the next driver input, tick, or collaborator outcome
    /// 3. Feeds it to the App and executes the resulting actions
    ///
    /// Every background task is released before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<Outcome, D::Error> {
        let actions = self.app.mount();
        let mut should_quit = self.process_actions(actions)?;

        while !should_quit {
            should_quit = match self.process_cycle().await {
                Ok(quit) => quit,
                Err(err) => {
                    self.release();
                    return Err(err);
                },
            };
        }

        Ok(self.finish())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let event = tokio::select! {
            polled = self.driver.poll_event() => polled?,
            Some(event) = self.events_rx.recv() => Some(event),
        };

        let Some(event) = event else {
            return Ok(false);
        };

        if event.is_settlement() {
            self.in_flight = None;
        }

        tracing::trace!(?event, "handling event");
        let actions = self.app.handle(event);
        self.process_actions(actions)
    }

    /// Execute actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        for action in actions {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(true),
                AppAction::StartTicker { interval } => {
                    tracing::debug!(?interval, "acquiring tick source");
                    self.ticker = Some(spawn_ticker(interval, self.events_tx.clone()));
                },
                AppAction::StopTicker => {
                    if self.ticker.take().is_some() {
                        tracing::debug!("released tick source");
                    }
                },
                AppAction::Verify { code } => self.spawn_verify(code),
                AppAction::Resend => self.spawn_resend(),
            }
        }
        Ok(false)
    }

    fn spawn_verify(&mut self, code: String) {
        let service = Arc::clone(&self.service);
        let events = self.events_tx.clone();

        self.in_flight = Some(TaskGuard::spawn(async move {
            let event = match service.verify_code(code).await {
                Ok(()) => AppEvent::VerifySucceeded,
                Err(err) => {
                    tracing::warn!(%err, "verify failed");
                    AppEvent::VerifyFailed { cause: err.to_string() }
                },
            };
            let _ = events.send(event);
        }));
    }

    fn spawn_resend(&mut self) {
        let service = Arc::clone(&self.service);
        let events = self.events_tx.clone();

        self.in_flight = Some(TaskGuard::spawn(async move {
            let event = match service.resend_code().await {
                Ok(()) => AppEvent::ResendSucceeded,
                Err(err) => {
                    tracing::warn!(%err, "resend failed");
                    AppEvent::ResendFailed { cause: err.to_string() }
                },
            };
            let _ = events.send(event);
        }));
    }

    /// Drop every background task and stop the driver.
    fn release(&mut self) {
        self.ticker = None;
        self.in_flight = None;
        self.driver.stop();
    }

    fn finish(mut self) -> Outcome {
        self.release();
        let outcome = self.app.outcome().cloned().unwrap_or(Outcome::Cancelled);
        tracing::info!(?outcome, "screen closed");
        outcome
    }

    /// Returns true while the countdown tick source is held.
    pub fn ticker_active(&self) -> bool {
        self.ticker.is_some()
    }

    /// Returns true while a collaborator call is outstanding.
    pub fn call_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
