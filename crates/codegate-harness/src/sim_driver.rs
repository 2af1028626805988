//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the terminal driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`codegate_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Input comes from a script of [`Step`]s. Waits are measured on tokio's
//! clock, so under `start_paused` a sixty second countdown finishes
//! instantly while ticks and collaborator latency still interleave with the
//! script in the right order.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use codegate_app::{App, AppEvent, Driver, KeyInput, Status};
use tokio::time::Instant;

use crate::invariants::{EntrySnapshot, InvariantRegistry, Timeline, Violation};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimDriverError {
    /// Every scripted step was consumed and the App is still running.
    ScriptExhausted,
}

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ScriptExhausted => write!(f, "SimDriverError: script exhausted"),
        }
    }
}

impl std::error::Error for SimDriverError {}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Deliver an event.
    Event(AppEvent),
    /// Let simulated time pass. Ticks and collaborator outcomes keep
    /// arriving meanwhile.
    Wait(Duration),
}

/// One rendered frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Simulated time since the driver was created.
    pub at: Duration,
    /// Control state at render time.
    pub snapshot: EntrySnapshot,
    /// Status line at render time.
    pub status: Option<Status>,
}

/// Everything the driver observed.
#[derive(Debug, Default)]
struct Record {
    frames: Vec<Frame>,
    timeline: Timeline,
    violations: Vec<Violation>,
    stopped: bool,
}

fn lock(record: &Mutex<Record>) -> MutexGuard<'_, Record> {
    record.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Simulation driver for deterministic testing.
///
/// Implements [`Driver`] trait so the same [`codegate_app::Runtime`]
/// orchestration code runs in both production TUI and simulation tests.
pub struct SimDriver {
    script: VecDeque<Step>,
    /// Deadline of the wait in progress. Kept across cancelled polls.
    waiting_until: Option<Instant>,
    started: Instant,
    record: Arc<Mutex<Record>>,
    invariants: Option<InvariantRegistry>,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a driver with an empty script.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            waiting_until: None,
            started: Instant::now(),
            record: Arc::new(Mutex::new(Record::default())),
            invariants: None,
        }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Append a step.
    #[must_use]
    pub fn then(mut self, step: Step) -> Self {
        self.script.push_back(step);
        self
    }

    /// Append an event.
    #[must_use]
    pub fn event(self, event: AppEvent) -> Self {
        self.then(Step::Event(event))
    }

    /// Append a key press.
    #[must_use]
    pub fn key(self, key: KeyInput) -> Self {
        self.event(AppEvent::Key(key))
    }

    /// Append one key press per character of `text`.
    #[must_use]
    pub fn typing(self, text: &str) -> Self {
        text.chars().fold(self, |driver, c| driver.key(KeyInput::Char(c)))
    }

    /// Append a wait.
    #[must_use]
    pub fn wait(self, duration: Duration) -> Self {
        self.then(Step::Wait(duration))
    }

    /// Handle for inspecting what the driver observed, usable after the
    /// runtime consumed the driver.
    pub fn observer(&self) -> SimObserver {
        SimObserver { record: Arc::clone(&self.record) }
    }

    /// Scripted steps not yet consumed.
    pub fn remaining_steps(&self) -> usize {
        self.script.len()
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        loop {
            if let Some(deadline) = self.waiting_until {
                tokio::time::sleep_until(deadline).await;
                self.waiting_until = None;
            }

            match self.script.pop_front() {
                Some(Step::Event(event)) => return Ok(Some(event)),
                Some(Step::Wait(duration)) => self.waiting_until = Some(Instant::now() + duration),
                None => return Err(SimDriverError::ScriptExhausted),
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let snapshot = EntrySnapshot::from_app(app);
        let mut record = lock(&self.record);

        record.timeline.record(snapshot.clone());
        if let Some(registry) = &self.invariants
            && let Err(violations) = registry.check_all(&record.timeline)
        {
            for violation in &violations {
                tracing::error!(%violation, "invariant violated");
            }
            record.violations.extend(violations);
        }

        let at = self.started.elapsed();
        record.frames.push(Frame { at, snapshot, status: app.status().cloned() });
        Ok(())
    }

    fn stop(&mut self) {
        lock(&self.record).stopped = true;
    }
}

/// Read-only view of a [`SimDriver`]'s record.
#[derive(Clone)]
pub struct SimObserver {
    record: Arc<Mutex<Record>>,
}

impl SimObserver {
    /// Every rendered frame, oldest first.
    pub fn frames(&self) -> Vec<Frame> {
        lock(&self.record).frames.clone()
    }

    /// Most recently rendered frame.
    pub fn last_frame(&self) -> Option<Frame> {
        lock(&self.record).frames.last().cloned()
    }

    /// Snapshot history.
    pub fn timeline(&self) -> Timeline {
        lock(&self.record).timeline.clone()
    }

    /// Invariant violations seen so far.
    pub fn violations(&self) -> Vec<Violation> {
        lock(&self.record).violations.clone()
    }

    /// Status texts in render order, consecutive duplicates removed.
    pub fn status_history(&self) -> Vec<String> {
        let mut texts: Vec<String> = lock(&self.record)
            .frames
            .iter()
            .filter_map(|f| f.status.as_ref().map(|s| s.text.clone()))
            .collect();
        texts.dedup();
        texts
    }

    /// Returns true once the runtime stopped the driver.
    pub fn stopped(&self) -> bool {
        lock(&self.record).stopped
    }
}

#[cfg(test)]
mod tests {
    use codegate_core::EntryConfig;

    use super::*;

    fn app() -> App {
        App::new(EntryConfig::new(4, 30).unwrap(), "+1 555 0100")
    }

    #[tokio::test(start_paused = true)]
    async fn script_replays_in_order() {
        let mut driver = SimDriver::new().typing("12").key(KeyInput::Enter);
        assert_eq!(driver.remaining_steps(), 3);

        assert_eq!(driver.poll_event().await, Ok(Some(AppEvent::Key(KeyInput::Char('1')))));
        assert_eq!(driver.poll_event().await, Ok(Some(AppEvent::Key(KeyInput::Char('2')))));
        assert_eq!(driver.poll_event().await, Ok(Some(AppEvent::Key(KeyInput::Enter))));
        assert_eq!(driver.poll_event().await, Err(SimDriverError::ScriptExhausted));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_consumes_simulated_time() {
        let mut driver = SimDriver::new().wait(Duration::from_secs(5)).event(AppEvent::Tick);
        let started = Instant::now();

        assert_eq!(driver.poll_event().await, Ok(Some(AppEvent::Tick)));
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_wait_keeps_deadline() {
        let mut driver = SimDriver::new().wait(Duration::from_secs(5)).event(AppEvent::Tick);
        let started = Instant::now();

        let early = tokio::time::timeout(Duration::from_secs(2), driver.poll_event()).await;
        assert!(early.is_err());

        assert_eq!(driver.poll_event().await, Ok(Some(AppEvent::Tick)));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn render_records_frames() {
        let mut driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
        let observer = driver.observer();
        let mut app = app();
        driver.render(&app).unwrap();
        let _ = app.handle(AppEvent::Key(KeyInput::Char('3')));
        driver.render(&app).unwrap();
        driver.stop();

        let frames = observer.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].snapshot.segments[0], Some('3'));
        assert!(observer.violations().is_empty());
        assert!(observer.stopped());
    }
}
