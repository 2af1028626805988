//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! implementation behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelEntry     CodeEntry       Compare
//!      (reference)    (real)          Results
//! ```

use codegate_core::{CodeEntry, EntryConfig};
use codegate_harness::{
    EntrySnapshot, InvariantRegistry, ModelEntry, ObservableState, Operation, OperationError,
    OperationResult, Timeline, apply_to_entry,
};
use proptest::prelude::*;

/// Strategy for generating operations.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    let slot = 0u8..12;

    prop_oneof![
        // Weight towards edits so codes actually complete
        8 => (slot.clone(), any::<u8>()).prop_map(|(slot, digit)| Operation::Type { slot, digit }),
        1 => (slot.clone(), any::<u8>()).prop_map(|(slot, kind)| Operation::TypeJunk { slot, kind }),
        1 => slot.clone().prop_map(|slot| Operation::Clear { slot }),
        2 => slot.clone().prop_map(|slot| Operation::Backspace { slot }),
        1 => slot.prop_map(|slot| Operation::Focus { slot }),
        1 => Just(Operation::Blur),
        4 => Just(Operation::Tick),
        2 => Just(Operation::Verify),
        2 => Just(Operation::Resend),
        4 => (any::<bool>(), any::<bool>()).prop_map(|(verify, accept)| {
            if verify {
                Operation::SettleVerify { accept }
            } else {
                Operation::SettleResend { accept }
            }
        }),
    ]
}

fn real(length: usize, expiry: u32) -> CodeEntry {
    CodeEntry::new(EntryConfig::new(length, expiry).unwrap())
}

proptest! {
    /// Verify that results and observable state match after every step.
    ///
    /// This is the core model-based test. It generates random operation
    /// sequences and asserts that both implementations return the same
    /// results and expose the same state.
    #[test]
    fn prop_model_matches_real(
        length in 1usize..10,
        expiry in 1u32..15,
        ops in prop::collection::vec(operation_strategy(), 0..120),
    ) {
        let mut model = ModelEntry::new(length, expiry);
        let mut entry = real(length, expiry);

        for (i, op) in ops.iter().enumerate() {
            let model_result = model.apply(op);
            let real_result = apply_to_entry(&mut entry, op);

            prop_assert_eq!(
                &model_result,
                &real_result,
                "Divergence at operation {}: {:?}",
                i, op
            );
            prop_assert_eq!(
                model.observable_state(),
                ObservableState::from_entry(&entry),
                "State divergence after operation {}: {:?}",
                i, op
            );
        }
    }

    /// Invariants hold on the real control for any operation sequence.
    #[test]
    fn prop_entry_invariants_hold(
        length in 1usize..10,
        expiry in 1u32..15,
        ops in prop::collection::vec(operation_strategy(), 0..120),
    ) {
        let mut entry = real(length, expiry);
        let registry = InvariantRegistry::standard();
        let mut timeline = Timeline::new();
        timeline.record(EntrySnapshot::from_entry(&entry));

        for op in &ops {
            let _ = apply_to_entry(&mut entry, op);
            timeline.record(EntrySnapshot::from_entry(&entry));
        }

        prop_assert!(registry.check_all(&timeline).is_ok());
    }

    /// At most one request is in flight: a second submission is always
    /// rejected as busy until the first settles.
    #[test]
    fn prop_busy_rejects_second_request(code in "[0-9]{4}", second_is_verify in any::<bool>()) {
        let mut entry = real(4, 1);
        for (i, c) in code.chars().enumerate() {
            apply_to_entry(&mut entry, &Operation::Type { slot: i as u8, digit: c as u8 - b'0' });
        }
        apply_to_entry(&mut entry, &Operation::Tick);
        prop_assert!(apply_to_entry(&mut entry, &Operation::Verify).is_ok());

        let second = if second_is_verify { Operation::Verify } else { Operation::Resend };
        prop_assert_eq!(
            apply_to_entry(&mut entry, &second),
            OperationResult::Error(OperationError::Busy)
        );
    }
}

#[test]
fn settle_without_request_is_not_pending() {
    let mut entry = real(6, 60);
    assert_eq!(
        apply_to_entry(&mut entry, &Operation::SettleVerify { accept: true }),
        OperationResult::Error(OperationError::NotPending)
    );
    assert_eq!(
        apply_to_entry(&mut entry, &Operation::SettleResend { accept: false }),
        OperationResult::Error(OperationError::NotPending)
    );
}
