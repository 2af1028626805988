//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific input and rendering, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in the terminal frontend and simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, ratatui for rendering
/// - **Simulation**: Replays a scripted event sequence on a paused clock
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if nothing arrived before the
    /// driver's own poll timeout.
    ///
    /// # Cancel safety
    ///
    /// The runtime races this future against ticks and collaborator
    /// outcomes, so it may be dropped at any await point. Dropping it must
    /// not lose input.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release platform resources. Called once when the runtime exits.
    fn stop(&mut self);
}
