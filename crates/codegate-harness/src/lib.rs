//! Deterministic simulation harness for Codegate testing.
//!
//! Scripted implementations of the [`codegate_app::Driver`] and
//! [`codegate_app::CodeService`] traits. Combined with tokio's paused clock,
//! the production [`codegate_app::Runtime`] runs a whole verification screen
//! (typing, countdown, collaborator latency) in a few milliseconds of real
//! time and with identical results on every run.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation for model-based
//! testing. Operations are applied to both the model and the real
//! [`codegate_core::CodeEntry`], and their observable states are compared.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the entry
//! invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod model;
pub mod scripted_service;
pub mod sim_driver;

pub use invariants::{
    EntrySnapshot, ExpiryMonotonic, FocusInBounds, Invariant, InvariantKind, InvariantRegistry,
    InvariantResult, SegmentCountFixed, SegmentsAreDigits, Timeline, Violation,
};
pub use model::{
    ModelEntry, ObservableState, Operation, OperationError, OperationResult, apply_to_entry,
};
pub use scripted_service::{ScriptedError, ScriptedService, ServiceCall};
pub use sim_driver::{Frame, SimDriver, SimDriverError, SimObserver, Step};
