//! Circuit breaker guarding calls to the external review API.
//!
//! # States
//! - Closed: calls pass through; consecutive failures are counted
//! - Open: calls are rejected without touching the network
//! - HalfOpen: a single trial call decides between Closed and Open
//!
//! # State Transitions
//! ```text
//! Closed   → Open:     consecutive failures reach the threshold
//! Open     → HalfOpen: first call after the break duration has elapsed
//! HalfOpen → Closed:   trial call succeeds
//! HalfOpen → Open:     trial call fails (break window restarts)
//! ```
//!
//! Break expiry is evaluated lazily when a call arrives; the breaker owns no
//! timers or background tasks. Time is read from `tokio::time::Instant` so
//! tests can drive it with a paused clock.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::time::Instant;

use crate::config::ReviewApiOptions;
use crate::error::ReviewsError;

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds for a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerConfig {
    /// Consecutive failures that open the circuit (at least 1).
    pub failure_threshold: u32,
    /// How long the circuit stays open before a trial call.
    pub break_duration: Duration,
}

impl BreakerConfig {
    pub fn new(failure_threshold: u32, break_duration: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            break_duration,
        }
    }

    pub fn from_options(options: &ReviewApiOptions) -> Self {
        Self::new(
            options.exceptions_allowed_before_breaking,
            options.break_duration(),
        )
    }
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(30))
    }
}

/// Hooks invoked after state transitions.
///
/// Hooks are advisory: they run after the state lock is released and cannot
/// influence the breaker's decisions.
pub trait BreakerObserver: Send + Sync {
    /// The circuit opened (from Closed or after a failed trial).
    fn on_open(&self, _break_duration: Duration, _reason: &str) {}

    /// The break elapsed and a trial call is about to be made.
    fn on_half_open(&self) {}

    /// A trial call succeeded and the circuit closed.
    fn on_reset(&self) {}
}

/// Observer that reports transitions through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BreakerObserver for TracingObserver {
    fn on_open(&self, break_duration: Duration, reason: &str) {
        tracing::warn!(
            break_seconds = break_duration.as_secs(),
            reason,
            "circuit breaker opened"
        );
    }

    fn on_half_open(&self) {
        tracing::info!("circuit breaker half-open, testing external API");
    }

    fn on_reset(&self) {
        tracing::info!("circuit breaker reset, external API calls resumed");
    }
}

/// Point-in-time view of the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakerSnapshot {
    pub state: CircuitState,
    pub consecutive_failures: u32,
    pub trial_in_flight: bool,
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    trial_in_flight: bool,
}

enum Transition {
    Opened(String),
    HalfOpened,
    Reset,
}

/// Consecutive-failure circuit breaker.
pub struct CircuitBreaker {
    config: BreakerConfig,
    inner: Mutex<BreakerInner>,
    observer: Arc<dyn BreakerObserver>,
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("config", &self.config)
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl CircuitBreaker {
    /// Create a closed breaker that logs transitions via `tracing`.
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                trial_in_flight: false,
            }),
            observer: Arc::new(TracingObserver),
        }
    }

    /// Replace the transition observer.
    pub fn with_observer(mut self, observer: Arc<dyn BreakerObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &BreakerConfig {
        &self.config
    }

    /// Current state without evaluating break expiry.
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    pub fn snapshot(&self) -> BreakerSnapshot {
        let inner = self.inner.lock();
        BreakerSnapshot {
            state: inner.state,
            consecutive_failures: inner.consecutive_failures,
            trial_in_flight: inner.trial_in_flight,
        }
    }

    /// Ask permission to call the protected service.
    ///
    /// Returns [`ReviewsError::BreakerOpen`] while the circuit is open, or
    /// while a half-open trial is already in flight.
    pub fn try_acquire(&self) -> Result<CallPermit<'_>, ReviewsError> {
        let mut transition = None;

        let permit = {
            let mut inner = self.inner.lock();
            match inner.state {
                CircuitState::Closed => Ok(CallPermit::new(self, false)),
                CircuitState::Open => {
                    let elapsed = inner
                        .opened_at
                        .map(|opened| Instant::now().saturating_duration_since(opened))
                        .unwrap_or(Duration::MAX);
                    if elapsed >= self.config.break_duration {
                        inner.state = CircuitState::HalfOpen;
                        inner.trial_in_flight = true;
                        transition = Some(Transition::HalfOpened);
                        Ok(CallPermit::new(self, true))
                    } else {
                        Err(ReviewsError::BreakerOpen)
                    }
                }
                CircuitState::HalfOpen => {
                    if inner.trial_in_flight {
                        Err(ReviewsError::BreakerOpen)
                    } else {
                        inner.trial_in_flight = true;
                        Ok(CallPermit::new(self, true))
                    }
                }
            }
        };

        self.notify(transition);
        permit
    }

    fn record_success(&self, trial: bool) {
        let mut transition = None;
        {
            let mut inner = self.inner.lock();
            if trial {
                inner.state = CircuitState::Closed;
                inner.consecutive_failures = 0;
                inner.opened_at = None;
                inner.trial_in_flight = false;
                transition = Some(Transition::Reset);
            } else if inner.state == CircuitState::Closed {
                inner.consecutive_failures = 0;
            }
        }
        self.notify(transition);
    }

    fn record_failure(&self, trial: bool, reason: &str) {
        let mut transition = None;
        {
            let mut inner = self.inner.lock();
            if trial {
                inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
                inner.trial_in_flight = false;
                transition = Some(Transition::Opened(reason.to_string()));
            } else if inner.state == CircuitState::Closed {
                inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
                if inner.consecutive_failures >= self.config.failure_threshold {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                    transition = Some(Transition::Opened(reason.to_string()));
                }
            }
        }
        self.notify(transition);
    }

    /// A trial ended without an outcome (the caller went away).
    fn release_trial(&self) {
        let mut inner = self.inner.lock();
        if inner.state == CircuitState::HalfOpen {
            inner.trial_in_flight = false;
        }
    }

    fn notify(&self, transition: Option<Transition>) {
        match transition {
            Some(Transition::Opened(reason)) => {
                self.observer.on_open(self.config.break_duration, &reason)
            }
            Some(Transition::HalfOpened) => self.observer.on_half_open(),
            Some(Transition::Reset) => self.observer.on_reset(),
            None => {}
        }
    }
}

/// Permission to make one protected call.
///
/// Settle it with [`CallPermit::succeed`] or [`CallPermit::fail`]. A permit
/// dropped unsettled (e.g. the calling future was cancelled) records
/// nothing, and a half-open trial slot is released for the next caller.
#[must_use = "a permit must be settled with succeed() or fail()"]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    trial: bool,
    settled: bool,
}

impl<'a> CallPermit<'a> {
    fn new(breaker: &'a CircuitBreaker, trial: bool) -> Self {
        Self {
            breaker,
            trial,
            settled: false,
        }
    }

    /// Whether this is the half-open trial call.
    pub fn is_trial(&self) -> bool {
        self.trial
    }

    /// Record a successful call.
    pub fn succeed(mut self) {
        self.settled = true;
        self.breaker.record_success(self.trial);
    }

    /// Record a failed call.
    pub fn fail(mut self, reason: &dyn fmt::Display) {
        self.settled = true;
        self.breaker.record_failure(self.trial, &reason.to_string());
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.trial {
            self.breaker.release_trial();
        }
    }
}
