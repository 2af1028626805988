//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the control at a point in
//! time. Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use codegate_app::App;
use codegate_core::{CodeEntry, ExpiryState, Operation};

/// Snapshot of a code entry control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySnapshot {
    /// Configured code length.
    pub length: usize,
    /// Segment contents in order.
    pub segments: Vec<Option<char>>,
    /// Focused segment. `None` when blurred.
    pub focused: Option<usize>,
    /// Countdown state.
    pub expiry: ExpiryState,
    /// Successful countdown restarts so far.
    pub restarts: u32,
    /// Operation in flight. `None` when idle.
    pub busy: Option<Operation>,
}

impl EntrySnapshot {
    /// Capture the observable state of `entry`.
    pub fn from_entry(entry: &CodeEntry) -> Self {
        Self {
            length: entry.config().length(),
            segments: entry.segments().to_vec(),
            focused: entry.focused(),
            expiry: entry.expiry(),
            restarts: entry.timer().restarts(),
            busy: entry.busy(),
        }
    }

    /// Capture the observable state of the control inside `app`.
    pub fn from_app(app: &App) -> Self {
        Self::from_entry(app.entry())
    }

    /// Assembled code when every segment is filled.
    pub fn code(&self) -> Option<String> {
        self.segments.iter().copied().collect()
    }
}

/// Ordered history of snapshots.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    snapshots: Vec<EntrySnapshot>,
}

impl Timeline {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation.
    pub fn record(&mut self, snapshot: EntrySnapshot) {
        self.snapshots.push(snapshot);
    }

    /// All observations, oldest first.
    pub fn snapshots(&self) -> &[EntrySnapshot] {
        &self.snapshots
    }

    /// Most recent observation.
    pub fn latest(&self) -> Option<&EntrySnapshot> {
        self.snapshots.last()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns true if nothing was recorded yet.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
