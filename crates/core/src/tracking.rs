//! Tracking loop constants and state machine.
//!
//! Lives in `core` so the transition rules can be checked without the
//! network-facing tracker crate.

use std::time::Duration;

use crate::geo::IssPosition;

// ---------------------------------------------------------------------------
// Timing constants
// ---------------------------------------------------------------------------

/// Delay between polls when nothing was sent.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Quiet period after a notification has been sent.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(10 * 60 * 60);

// ---------------------------------------------------------------------------
// Poll outcome
// ---------------------------------------------------------------------------

/// Result of a single tracking iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PollOutcome {
    /// The sun is up at the target; the ISS was not queried.
    Daylight,
    /// Night, but the ISS is outside the proximity window.
    OutOfRange(IssPosition),
    /// Night and overhead; the notification was sent.
    Notified(IssPosition),
}

impl PollOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daylight => "daylight",
            Self::OutOfRange(_) => "out_of_range",
            Self::Notified(_) => "notified",
        }
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// POLLING ⇄ COOLDOWN. There is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackerState {
    #[default]
    Polling,
    Cooldown,
}

impl TrackerState {
    /// Transition after a poll. Only `Polling` polls, so a poll reported
    /// while in `Cooldown` leaves the state unchanged.
    pub fn next(self, outcome: &PollOutcome) -> Self {
        match (self, outcome) {
            (Self::Polling, PollOutcome::Notified(_)) => Self::Cooldown,
            (state, _) => state,
        }
    }

    /// Unconditional transition when the cooldown timer runs out.
    pub fn cooldown_elapsed(self) -> Self {
        Self::Polling
    }

    /// How long to wait in this state before acting again.
    pub fn wait(self, poll_interval: Duration, cooldown: Duration) -> Duration {
        match self {
            Self::Polling => poll_interval,
            Self::Cooldown => cooldown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Polling => "polling",
            Self::Cooldown => "cooldown",
        }
    }
}
