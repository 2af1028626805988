//! Fuzz target for segment input filtering
//!
//! Feed arbitrary strings into arbitrary slots of a segment store.
//!
//! # Strategy
//!
//! - Values: any UTF-8, including multi-digit pastes, Unicode digits and
//!   control characters
//! - Indices: in range and past the end
//!
//! # Invariants
//!
//! - Only `""` or a single ASCII digit is accepted
//! - Rejected input leaves every slot untouched
//! - Length never changes and every slot holds an ASCII digit or nothing
//! - The assembled code exists exactly when every slot is filled

#![no_main]

use arbitrary::Arbitrary;
use codegate_core::SegmentStore;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Write {
    index: u8,
    value: String,
}

fuzz_target!(|input: (u8, Vec<Write>)| {
    let (length, writes) = input;
    let length = usize::from(length % 16) + 1;
    let mut store = SegmentStore::new(length);

    for write in writes {
        let index = usize::from(write.index) % (length + 2);
        let before = store.clone();

        let mut chars = write.value.chars();
        let acceptable = match (chars.next(), chars.next()) {
            (None, _) => true,
            (Some(c), None) => c.is_ascii_digit(),
            _ => false,
        };

        let result = store.set_digit(index, &write.value);
        assert_eq!(result.is_ok(), index < length && acceptable, "{write:?} at {index}");
        if result.is_err() {
            assert_eq!(store, before, "rejected write changed the store");
        }

        assert_eq!(store.segments().len(), length);
        assert!(store.segments().iter().flatten().all(char::is_ascii_digit));
        assert_eq!(store.code().is_ok(), store.segments().iter().all(Option::is_some));
    }
});
