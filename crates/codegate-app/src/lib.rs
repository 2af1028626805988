//! Application layer for Codegate
//!
//! Pure state machine and generic runtime for the verification-code screen,
//! enabling deterministic simulation testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: UI state machine (key handling, status line, outcome)
//! - [`CodeService`]: Trait for the asynchronous verify/resend collaborators
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver and CodeService

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod driver;
mod event;
mod input;
mod runtime;
mod service;
mod state;
mod task;

pub use action::AppAction;
pub use app::App;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use service::{
    CodeService, DEFAULT_RESEND_DELAY, DEFAULT_VERIFY_DELAY, SimulatedError, SimulatedService,
    SimulatedServiceConfig,
};
pub use state::{Outcome, Status, StatusKind};
pub use task::{TaskGuard, spawn_ticker};
