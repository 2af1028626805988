//! Asynchronous collaborators.
//!
//! [`CodeService`] is the only external interface of the control: one call
//! to check a complete code and one to request a new code. The runtime
//! spawns each call as a scoped task and feeds the outcome back to the
//! [`crate::App`] as an event, so implementations never touch UI state.

use std::{future::Future, time::Duration};

use thiserror::Error;

/// Latency of the simulated verify call.
pub const DEFAULT_VERIFY_DELAY: Duration = Duration::from_millis(1500);

/// Latency of the simulated resend call.
pub const DEFAULT_RESEND_DELAY: Duration = Duration::from_millis(1000);

/// Verify and resend collaborators.
///
/// Callers guarantee the preconditions: `verify_code` only receives a
/// complete code, `resend_code` is only called once the previous code
/// expired, and never both at once.
pub trait CodeService: Send + Sync + 'static {
    /// Collaborator error. Its `Display` output becomes the reported cause.
    type Error: std::error::Error + Send + 'static;

    /// Check `code` against the one that was sent.
    fn verify_code(&self, code: String) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Send a fresh code to the same target.
    fn resend_code(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Errors from [`SimulatedService`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimulatedError {
    /// Verification was configured to fail.
    #[error("code rejected")]
    Rejected,

    /// Resend was configured to fail.
    #[error("delivery failed")]
    DeliveryFailed,
}

/// Simulated collaborator configuration.
#[derive(Debug, Clone)]
pub struct SimulatedServiceConfig {
    /// Delay before verify settles.
    pub verify_delay: Duration,
    /// Delay before resend settles.
    pub resend_delay: Duration,
    /// Reject every code.
    pub fail_verify: bool,
    /// Fail every resend.
    pub fail_resend: bool,
}

impl Default for SimulatedServiceConfig {
    fn default() -> Self {
        Self {
            verify_delay: DEFAULT_VERIFY_DELAY,
            resend_delay: DEFAULT_RESEND_DELAY,
            fail_verify: false,
            fail_resend: false,
        }
    }
}

/// Stand-in collaborator: a fixed delay, then the configured result.
///
/// With the default config every code is accepted, which is what the
/// screen does until a real backend exists.
#[derive(Debug, Clone, Default)]
pub struct SimulatedService {
    config: SimulatedServiceConfig,
}

impl SimulatedService {
    /// Create a simulated service.
    pub fn new(config: SimulatedServiceConfig) -> Self {
        Self { config }
    }
}

impl CodeService for SimulatedService {
    type Error = SimulatedError;

    async fn verify_code(&self, code: String) -> Result<(), Self::Error> {
        tracing::debug!(digits = code.len(), "simulating verification");
        tokio::time::sleep(self.config.verify_delay).await;

        if self.config.fail_verify { Err(SimulatedError::Rejected) } else { Ok(()) }
    }

    async fn resend_code(&self) -> Result<(), Self::Error> {
        tracing::debug!("simulating resend");
        tokio::time::sleep(self.config.resend_delay).await;

        if self.config.fail_resend { Err(SimulatedError::DeliveryFailed) } else { Ok(()) }
    }
}
