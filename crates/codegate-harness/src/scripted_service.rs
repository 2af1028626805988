//! Scripted collaborator implementing the CodeService trait.
//!
//! Outcomes are queued up front and handed out in call order; an empty
//! queue answers with success. Every call is logged with its simulated
//! start time so tests can assert what reached the collaborator, and when.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use codegate_app::CodeService;
use tokio::time::Instant;

/// Failure returned by [`ScriptedService`]. Displays as the queued cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedError(pub String);

impl std::fmt::Display for ScriptedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ScriptedError {}

/// A call that reached the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    /// `verify_code` with the submitted code.
    Verify {
        /// Submitted code.
        code: String,
        /// Simulated time since the service was created.
        at: Duration,
    },
    /// `resend_code`.
    Resend {
        /// Simulated time since the service was created.
        at: Duration,
    },
}

#[derive(Debug, Default)]
struct Script {
    verify: VecDeque<Result<(), String>>,
    resend: VecDeque<Result<(), String>>,
    calls: Vec<ServiceCall>,
}

/// Deterministic collaborator for simulation tests.
///
/// Cloning shares the script and call log, so a test keeps one clone while
/// the runtime owns the other.
#[derive(Debug, Clone)]
pub struct ScriptedService {
    script: Arc<Mutex<Script>>,
    latency: Duration,
    started: Instant,
}

impl Default for ScriptedService {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl ScriptedService {
    /// Create a service that answers after `latency`.
    pub fn new(latency: Duration) -> Self {
        Self { script: Arc::default(), latency, started: Instant::now() }
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the outcome of the next unanswered verify.
    #[must_use]
    pub fn then_verify(self, outcome: Result<(), &str>) -> Self {
        self.lock().verify.push_back(outcome.map_err(str::to_owned));
        self
    }

    /// Queue the outcome of the next unanswered resend.
    #[must_use]
    pub fn then_resend(self, outcome: Result<(), &str>) -> Self {
        self.lock().resend.push_back(outcome.map_err(str::to_owned));
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    /// Latency applied to every call.
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl CodeService for ScriptedService {
    type Error = ScriptedError;

    async fn verify_code(&self, code: String) -> Result<(), Self::Error> {
        let outcome = {
            let mut script = self.lock();
            let at = self.started.elapsed();
            script.calls.push(ServiceCall::Verify { code, at });
            script.verify.pop_front().unwrap_or(Ok(()))
        };

        tokio::time::sleep(self.latency).await;
        outcome.map_err(ScriptedError)
    }

    async fn resend_code(&self) -> Result<(), Self::Error> {
        let outcome = {
            let mut script = self.lock();
            let at = self.started.elapsed();
            script.calls.push(ServiceCall::Resend { at });
            script.resend.pop_front().unwrap_or(Ok(()))
        };

        tokio::time::sleep(self.latency).await;
        outcome.map_err(ScriptedError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn outcomes_in_order_then_success() {
        let service = ScriptedService::new(Duration::from_millis(200))
            .then_verify(Err("wrong code"))
            .then_verify(Ok(()));

        assert_eq!(
            service.verify_code("111111".into()).await,
            Err(ScriptedError("wrong code".into()))
        );
        assert_eq!(service.verify_code("222222".into()).await, Ok(()));
        assert_eq!(service.verify_code("333333".into()).await, Ok(()));

        let calls = service.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(
            &calls[1],
            ServiceCall::Verify { code, at } if code == "222222" && *at >= Duration::from_millis(200)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_log() {
        let service = ScriptedService::default().then_resend(Err("no signal"));
        let handle = service.clone();

        assert_eq!(service.resend_code().await, Err(ScriptedError("no signal".into())));
        assert_eq!(handle.calls(), vec![ServiceCall::Resend { at: Duration::ZERO }]);
        assert_eq!(handle.latency(), Duration::ZERO);
    }
}
