//! Fuzz target for the code entry state machine
//!
//! Drive the real control and the reference model with the same operation
//! sequence and require them to agree step for step.
//!
//! # Strategy
//!
//! - Lengths 1..=16 and expiries 1..=32 so expiry is reachable
//! - Operations: typing, junk input, clears, focus moves, ticks, verify and
//!   resend requests and their settlements in any order
//!
//! # Invariants
//!
//! - Model and real control return the same result for every operation
//! - Observable state is identical after every operation
//! - Segment count, digit content, focus bounds and countdown monotonicity
//!   hold across the whole run

#![no_main]

use codegate_core::{CodeEntry, EntryConfig};
use codegate_harness::{
    apply_to_entry, EntrySnapshot, InvariantRegistry, ModelEntry, ObservableState, Operation,
    Timeline,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, Vec<Operation>)| {
    let (length, expiry, ops) = input;
    let length = usize::from(length % 16) + 1;
    let expiry = u32::from(expiry % 32) + 1;

    let Ok(config) = EntryConfig::new(length, expiry) else {
        panic!("config rejected valid bounds: length={length} expiry={expiry}");
    };

    let mut model = ModelEntry::new(length, expiry);
    let mut entry = CodeEntry::new(config);
    let registry = InvariantRegistry::standard();
    let mut timeline = Timeline::new();
    timeline.record(EntrySnapshot::from_entry(&entry));

    for (i, op) in ops.iter().enumerate() {
        let expected = model.apply(op);
        let actual = apply_to_entry(&mut entry, op);
        assert_eq!(expected, actual, "result divergence at op {i}: {op:?}");
        assert_eq!(
            model.observable_state(),
            ObservableState::from_entry(&entry),
            "state divergence at op {i}: {op:?}"
        );

        timeline.record(EntrySnapshot::from_entry(&entry));
        registry.assert_all(&timeline, &format!("after op {i}: {op:?}"));
    }
});
