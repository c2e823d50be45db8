//! Domain types shared by the ISS tracker.
//!
//! This crate has no I/O: it holds the observer/ISS coordinate types, the
//! proximity window check and the POLLING/COOLDOWN state machine so they can
//! be unit-tested without any network collaborators.

pub mod error;
pub mod geo;
pub mod tracking;

pub use error::CoreError;
pub use geo::{IssPosition, TargetLocation};
pub use tracking::{PollOutcome, TrackerState};
