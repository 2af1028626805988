//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{Invariant, InvariantKind, InvariantResult, Timeline, Violation};

/// Segment count must equal the configured length, forever.
///
/// No edit, reset or settlement may add or drop a segment.
pub struct SegmentCountFixed;

impl Invariant for SegmentCountFixed {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SegmentCountFixed
    }

    fn check(&self, timeline: &Timeline) -> InvariantResult {
        let Some(first) = timeline.snapshots().first() else {
            return Ok(());
        };

        for (step, snapshot) in timeline.snapshots().iter().enumerate() {
            if snapshot.segments.len() != snapshot.length || snapshot.length != first.length {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "step {step}: {} segments, configured {}, initially {}",
                        snapshot.segments.len(),
                        snapshot.length,
                        first.length
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Every segment is empty or a single ASCII digit.
pub struct SegmentsAreDigits;

impl Invariant for SegmentsAreDigits {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SegmentsAreDigits
    }

    fn check(&self, timeline: &Timeline) -> InvariantResult {
        for (step, snapshot) in timeline.snapshots().iter().enumerate() {
            let bad = snapshot
                .segments
                .iter()
                .enumerate()
                .find(|(_, segment)| segment.is_some_and(|c| !c.is_ascii_digit()));

            if let Some((index, segment)) = bad {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!("step {step}: segment {index} holds {segment:?}"),
                });
            }
        }
        Ok(())
    }
}

/// Focus is `None` or an index inside the segment range.
pub struct FocusInBounds;

impl Invariant for FocusInBounds {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FocusInBounds
    }

    fn check(&self, timeline: &Timeline) -> InvariantResult {
        for (step, snapshot) in timeline.snapshots().iter().enumerate() {
            if let Some(focused) = snapshot.focused
                && focused >= snapshot.segments.len()
            {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "step {step}: focus {focused} outside {} segments",
                        snapshot.segments.len()
                    ),
                });
            }
        }
        Ok(())
    }
}

/// Remaining time never increases between two observations unless the
/// countdown was restarted in between.
///
/// Expired counts as zero, so leaving the expired state also requires a
/// restart.
pub struct ExpiryMonotonic;

impl Invariant for ExpiryMonotonic {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ExpiryMonotonic
    }

    fn check(&self, timeline: &Timeline) -> InvariantResult {
        for (step, window) in timeline.snapshots().windows(2).enumerate() {
            let (before, after) = (&window[0], &window[1]);

            if after.restarts < before.restarts {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "step {}: restarts decreased {} → {}",
                        step + 1,
                        before.restarts,
                        after.restarts
                    ),
                });
            }

            let restarted = after.restarts > before.restarts;
            if !restarted && after.expiry.remaining() > before.expiry.remaining() {
                return Err(Violation {
                    invariant: self.kind(),
                    message: format!(
                        "step {}: remaining increased {} → {} without restart",
                        step + 1,
                        before.expiry,
                        after.expiry
                    ),
                });
            }
        }
        Ok(())
    }
}
