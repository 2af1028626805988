//! Terminal UI for Codegate
//!
//! A thin shell over [`codegate_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`codegate_app::Runtime`]
//!
//! This crate only handles terminal input and rendering.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use codegate_app::{App, AppAction, AppEvent, Driver, KeyInput, Outcome, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
