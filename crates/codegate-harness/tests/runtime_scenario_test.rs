//! End-to-end tests for the verification screen.
//!
//! # Test Strategy
//!
//! Each test runs the production [`Runtime`] against a [`SimDriver`] script
//! and a [`ScriptedService`] on tokio's paused clock:
//! 1. Type digits, wait, press keys (scripted)
//! 2. Ticks and collaborator outcomes arrive on simulated time
//! 3. Every render is checked against the standard invariants
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks on the returned [`Outcome`], the rendered
//! frames and the calls that reached the collaborator.

use std::time::Duration;

use codegate_app::{App, KeyInput, Outcome, Runtime, StatusKind};
use codegate_core::{EntryConfig, ExpiryState, Operation};
use codegate_harness::{
    InvariantRegistry, ScriptedService, ServiceCall, SimDriver, SimDriverError, SimObserver,
};

const SECOND: Duration = Duration::from_secs(1);

fn app(length: usize, expiry: u32) -> App {
    App::new(EntryConfig::new(length, expiry).unwrap(), "+1 555 0100")
}

fn driver() -> SimDriver {
    SimDriver::new().with_invariants(InvariantRegistry::standard())
}

async fn run(
    driver: SimDriver,
    service: ScriptedService,
    app: App,
) -> (Result<Outcome, SimDriverError>, SimObserver) {
    let observer = driver.observer();
    let outcome = Runtime::new(driver, service, app).run().await;
    assert!(observer.violations().is_empty(), "violations: {:?}", observer.violations());
    assert!(observer.stopped());
    (outcome, observer)
}

#[tokio::test(start_paused = true)]
async fn correct_code_is_verified() {
    let service = ScriptedService::new(Duration::from_millis(1500));
    let calls = service.clone();
    let driver = driver().typing("123456").key(KeyInput::Enter).wait(SECOND * 10);

    let (outcome, observer) = run(driver, service, app(6, 60)).await;

    assert_eq!(outcome, Ok(Outcome::Verified { code: "123456".into() }));
    assert!(matches!(
        calls.calls().as_slice(),
        [ServiceCall::Verify { code, .. }] if code == "123456"
    ));
    assert_eq!(observer.status_history(), vec!["Verifying...", "Code verified"]);
}

#[tokio::test(start_paused = true)]
async fn incomplete_code_never_reaches_collaborator() {
    let service = ScriptedService::default();
    let calls = service.clone();
    let driver = driver().typing("123").key(KeyInput::Enter).key(KeyInput::Esc);

    let (outcome, observer) = run(driver, service, app(6, 60)).await;

    assert_eq!(outcome, Ok(Outcome::ChangeNumber));
    assert!(calls.calls().is_empty());
    assert_eq!(observer.status_history(), vec!["Please enter the complete 6-digit code"]);
}

#[tokio::test(start_paused = true)]
async fn rejected_code_clears_segments() {
    let service = ScriptedService::new(Duration::from_millis(500)).then_verify(Err("wrong code"));
    let driver = driver().typing("1111").key(KeyInput::Enter).wait(SECOND).typing("22");

    let (outcome, observer) = run(driver, service, app(4, 60)).await;

    assert_eq!(outcome, Err(SimDriverError::ScriptExhausted));
    let last = observer.last_frame().unwrap();
    assert_eq!(last.snapshot.segments, vec![Some('2'), Some('2'), None, None]);
    assert_eq!(last.snapshot.busy, None);

    let failure = observer
        .frames()
        .into_iter()
        .find(|f| f.status.as_ref().is_some_and(|s| s.kind == StatusKind::Error))
        .unwrap();
    assert!(failure.snapshot.segments.iter().all(Option::is_none));
    assert_eq!(failure.snapshot.focused, Some(0));
    assert_eq!(failure.status.unwrap().text, "Invalid code. Please try again. (wrong code)");
}

#[tokio::test(start_paused = true)]
async fn countdown_expires_then_resend_restarts_it() {
    let service = ScriptedService::new(SECOND);
    let calls = service.clone();
    let driver = driver()
        .key(KeyInput::Char('r'))
        .wait(SECOND * 5)
        .key(KeyInput::Char('r'))
        .wait(SECOND * 3)
        .key(KeyInput::Esc);

    let (outcome, observer) = run(driver, service, app(6, 3)).await;
    assert_eq!(outcome, Ok(Outcome::ChangeNumber));

    // Early resend rejected, the one after expiry accepted
    let resends = calls.calls();
    assert!(matches!(resends.as_slice(), [ServiceCall::Resend { at }] if *at >= SECOND * 5));

    let history = observer.status_history();
    assert_eq!(history[0], "You can request a new code in 0:03");
    assert!(history.contains(&"Code has been resent to +1 555 0100".to_string()));

    let timeline = observer.timeline();
    let expired_at = timeline.snapshots().iter().position(|s| s.expiry.is_expired()).unwrap();
    let restarted =
        timeline.snapshots().iter().skip(expired_at).find(|s| s.restarts == 1).unwrap();
    assert_eq!(restarted.expiry, ExpiryState::Counting { remaining: 3 });

    // Counting again after the restart: 8s in, 2s since resend settled
    let last = observer.last_frame().unwrap();
    assert_eq!(last.snapshot.restarts, 1);
    assert!(!last.snapshot.expiry.is_expired());
}

#[tokio::test(start_paused = true)]
async fn failed_resend_stays_expired() {
    let service = ScriptedService::new(Duration::from_millis(300)).then_resend(Err("no signal"));
    let driver =
        driver().wait(Duration::from_millis(2500)).key(KeyInput::Char('r')).wait(SECOND * 5);

    let (outcome, observer) = run(driver, service, app(6, 2)).await;

    assert_eq!(outcome, Err(SimDriverError::ScriptExhausted));
    let last = observer.last_frame().unwrap();
    assert!(last.snapshot.expiry.is_expired());
    assert_eq!(last.snapshot.restarts, 0);
    assert_eq!(last.snapshot.busy, None);
    assert_eq!(
        last.status.unwrap().text,
        "Failed to resend code. Please try again. (no signal)"
    );
}

#[tokio::test(start_paused = true)]
async fn submissions_blocked_while_busy() {
    let service = ScriptedService::new(SECOND * 2);
    let calls = service.clone();
    let driver = driver()
        .typing("4242")
        .key(KeyInput::Enter)
        .wait(Duration::from_millis(500))
        .key(KeyInput::Enter)
        .wait(SECOND * 5);

    let (outcome, observer) = run(driver, service, app(4, 60)).await;

    assert_eq!(outcome, Ok(Outcome::Verified { code: "4242".into() }));
    assert_eq!(calls.calls().len(), 1);
    assert!(observer.status_history().contains(&"Verifying, please wait".to_string()));
    assert!(
        observer
            .frames()
            .iter()
            .any(|f| f.snapshot.busy == Some(Operation::Verify))
    );
}

#[tokio::test(start_paused = true)]
async fn ticks_keep_running_during_verify() {
    let service = ScriptedService::new(SECOND * 3).then_verify(Err("expired code"));
    let driver = driver().typing("9999").key(KeyInput::Enter).wait(SECOND * 4);

    let (_, observer) = run(driver, service, app(4, 60)).await;

    let busy_remaining: Vec<u32> = observer
        .frames()
        .iter()
        .filter(|f| f.snapshot.busy.is_some())
        .map(|f| f.snapshot.expiry.remaining())
        .collect();
    assert!(busy_remaining.contains(&58));
}
