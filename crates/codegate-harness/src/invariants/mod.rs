//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during execution.
//! Unlike example-based tests that check specific scenarios, invariants
//! verify behavioral properties across all possible execution paths.
//!
//! # Architecture
//!
//! Observable state is extracted from the [`codegate_core::CodeEntry`] (or
//! the [`codegate_app::App`] wrapping it) into an [`EntrySnapshot`] and
//! appended to a [`Timeline`]. Registered [`Invariant`] checks then run
//! against the whole timeline, so history-based properties like countdown
//! monotonicity are checked the same way as point-in-time ones.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let mut timeline = Timeline::new();
//! timeline.record(EntrySnapshot::from_app(&app));
//! registry.check_all(&timeline)?;
//! ```

mod checks;
mod snapshot;

pub use checks::{ExpiryMonotonic, FocusInBounds, SegmentCountFixed, SegmentsAreDigits};
pub use snapshot::{EntrySnapshot, Timeline};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// Segment count never changes after construction.
    SegmentCountFixed,
    /// Every filled segment holds exactly one ASCII digit.
    SegmentsAreDigits,
    /// Focus is either absent or a valid segment index.
    FocusInBounds,
    /// Remaining time never increases except through a restart.
    ExpiryMonotonic,
}

impl InvariantKind {
    /// Invariant name for error reporting.
    pub fn name(self) -> &'static str {
        match self {
            Self::SegmentCountFixed => "segment_count_fixed",
            Self::SegmentsAreDigits => "segments_are_digits",
            Self::FocusInBounds => "focus_in_bounds",
            Self::ExpiryMonotonic => "expiry_monotonic",
        }
    }
}

impl std::fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against observed state.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against everything observed so far.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, timeline: &Timeline) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against a timeline.
/// Use [`InvariantRegistry::standard()`] for the entry invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard entry invariants.
    ///
    /// Includes:
    /// - [`SegmentCountFixed`]: segment count never changes
    /// - [`SegmentsAreDigits`]: segments are empty or one digit
    /// - [`FocusInBounds`]: focus is `None` or a valid index
    /// - [`ExpiryMonotonic`]: countdown only goes down between restarts
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(SegmentCountFixed);
        registry.add(SegmentsAreDigits);
        registry.add(FocusInBounds);
        registry.add(ExpiryMonotonic);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given timeline.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, timeline: &Timeline) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(timeline).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking on first violation.
    ///
    /// Use this in tests where you want immediate failure with context.
    #[allow(clippy::panic, reason = "test assertion helper")]
    pub fn assert_all(&self, timeline: &Timeline, context: &str) {
        if let Err(violations) = self.check_all(timeline) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
