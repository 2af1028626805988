//! Expiry countdown.
//!
//! Tick-driven: the caller owns the periodic tick source and feeds one
//! [`ExpiryTimer::tick`] per period. The timer tells the caller when to
//! release that source, and nothing restarts it except a successful resend.

use std::fmt;

/// Countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryState {
    /// Code still valid.
    Counting {
        /// Seconds left, always at least 1.
        remaining: u32,
    },
    /// Code expired, resend available.
    Expired,
}

impl ExpiryState {
    /// Seconds left. Zero once expired.
    pub fn remaining(&self) -> u32 {
        match self {
            Self::Counting { remaining } => *remaining,
            Self::Expired => 0,
        }
    }

    /// Returns true once the countdown reached zero.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl fmt::Display for ExpiryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let remaining = self.remaining();
        write!(f, "{}:{:02}", remaining / 60, remaining % 60)
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Still counting.
    Counting {
        /// Seconds left after this tick.
        remaining: u32,
    },
    /// This tick reached zero. The tick source must be released.
    Expired,
    /// Already expired; the tick had no effect.
    Ignored,
}

/// Countdown from a fixed initial value to [`ExpiryState::Expired`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryTimer {
    initial: u32,
    state: ExpiryState,
    /// Successful restarts since construction
    restarts: u32,
}

impl ExpiryTimer {
    /// Start counting down from `initial_secs`.
    ///
    /// A zero initial value starts expired.
    pub fn new(initial_secs: u32) -> Self {
        Self { initial: initial_secs, state: Self::fresh(initial_secs), restarts: 0 }
    }

    fn fresh(initial_secs: u32) -> ExpiryState {
        if initial_secs == 0 {
            ExpiryState::Expired
        } else {
            ExpiryState::Counting { remaining: initial_secs }
        }
    }

    /// Current state.
    pub fn state(&self) -> ExpiryState {
        self.state
    }

    /// Initial countdown value in seconds.
    pub fn initial(&self) -> u32 {
        self.initial
    }

    /// Number of restarts since construction.
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        match self.state {
            ExpiryState::Counting { remaining } if remaining <= 1 => {
                self.state = ExpiryState::Expired;
                Tick::Expired
            },
            ExpiryState::Counting { remaining } => {
                let remaining = remaining - 1;
                self.state = ExpiryState::Counting { remaining };
                Tick::Counting { remaining }
            },
            ExpiryState::Expired => Tick::Ignored,
        }
    }

    /// Reset to the initial value.
    pub fn restart(&mut self) {
        self.state = Self::fresh(self.initial);
        self.restarts += 1;
    }

    /// Remaining time as `m:ss`.
    pub fn remaining_label(&self) -> String {
        self.state.to_string()
    }
}
