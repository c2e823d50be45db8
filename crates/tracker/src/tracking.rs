//! The polling loop.
//!
//! Each iteration checks whether it is night at the target, and only then
//! asks where the ISS is. If the ISS is inside the proximity window the
//! notifier fires once and the loop waits out the cooldown before polling
//! again. The loop stops when its [`CancellationToken`] is cancelled, and
//! returns the first error from an external call.

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use iss_core::{PollOutcome, TrackerState};

use crate::config::TrackerConfig;
use crate::location::{LocationError, LocationSource};
use crate::notifier::{EmailError, Notifier};
use crate::solar::SolarCalculator;

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Failed to fetch ISS position: {0}")]
    Location(#[from] LocationError),

    #[error("Failed to send notification: {0}")]
    Notify(#[from] EmailError),
}

pub struct Tracker<L, S, N> {
    config: TrackerConfig,
    location: L,
    solar: S,
    notifier: N,
    state: TrackerState,
}

impl<L, S, N> Tracker<L, S, N>
where
    L: LocationSource,
    S: SolarCalculator,
    N: Notifier,
{
    pub fn new(config: TrackerConfig, location: L, solar: S, notifier: N) -> Self {
        Self {
            config,
            location,
            solar,
            notifier,
            state: TrackerState::default(),
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// One iteration without any waiting.
    ///
    /// The ISS is only queried at night, and the notifier is only called
    /// when the ISS is inside the window.
    pub async fn poll_once(&self) -> Result<PollOutcome, TrackerError> {
        let target = &self.config.target;

        if !self.solar.is_night(target, Utc::now()) {
            tracing::debug!("Daylight at target, skipping ISS lookup");
            return Ok(PollOutcome::Daylight);
        }

        let position = self.location.current_position().await?;

        if !target.is_within(&position, self.config.proximity_window_deg) {
            tracing::debug!(
                iss_latitude = position.latitude,
                iss_longitude = position.longitude,
                "ISS out of range"
            );
            return Ok(PollOutcome::OutOfRange(position));
        }

        tracing::info!(
            iss_latitude = position.latitude,
            iss_longitude = position.longitude,
            "ISS overhead at night, sending notification"
        );
        self.notifier.notify().await?;

        Ok(PollOutcome::Notified(position))
    }

    /// Poll until `cancel` fires.
    ///
    /// Waits `poll_interval` after a poll that sent nothing and `cooldown`
    /// after a notification. Cancellation is observed both while waiting and
    /// while a poll is in flight.
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<(), TrackerError> {
        tracing::info!(
            latitude = self.config.target.latitude,
            longitude = self.config.target.longitude,
            poll_interval_secs = self.config.poll_interval.as_secs(),
            cooldown_secs = self.config.cooldown.as_secs(),
            window_deg = self.config.proximity_window_deg,
            "ISS tracker started"
        );

        loop {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                result = self.poll_once() => result?,
            };

            tracing::debug!(outcome = outcome.as_str(), "Poll complete");
            self.transition(self.state.next(&outcome));

            let wait = self
                .state
                .wait(self.config.poll_interval, self.config.cooldown);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }

            if self.state == TrackerState::Cooldown {
                self.transition(self.state.cooldown_elapsed());
            }
        }

        tracing::info!(state = self.state.as_str(), "ISS tracker cancelled");
        Ok(())
    }

    fn transition(&mut self, next: TrackerState) {
        if next != self.state {
            tracing::info!(
                from = self.state.as_str(),
                to = next.as_str(),
                "Tracker state changed"
            );
            self.state = next;
        }
    }
}
