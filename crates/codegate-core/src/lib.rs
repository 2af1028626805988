//! Core state machines for Codegate
//!
//! I/O-free building blocks for a fixed-length numeric code captured across
//! N single-character segments. Time is driven by discrete ticks and every
//! asynchronous collaborator is modelled as an action for the caller to
//! execute, so the same code runs under a real runtime and in deterministic
//! simulation.
//!
//! # Components
//!
//! - [`SegmentStore`]: per-position digit storage with a completeness check
//! - [`FocusController`]: type-to-advance and backspace-to-previous focus
//! - [`ExpiryTimer`]: countdown gating the resend affordance
//! - [`CodeEntry`]: the composed control with the verify/resend contracts

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod entry;
pub mod error;
pub mod expiry;
pub mod focus;
pub mod segments;

pub use config::EntryConfig;
pub use entry::{CodeEntry, EntryAction, Operation};
pub use error::{ConfigError, EntryError};
pub use expiry::{ExpiryState, ExpiryTimer, Tick};
pub use focus::FocusController;
pub use segments::{Edit, SegmentStore};
