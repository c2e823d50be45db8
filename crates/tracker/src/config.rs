//! Tracker configuration.
//!
//! The operator-supplied values (target coordinates, mail credentials) come
//! from the interactive prompt in [`crate::prompt`]. Endpoint plumbing is
//! loaded from environment variables with defaults:
//!
//! | Env Var                | Default                                   |
//! |------------------------|-------------------------------------------|
//! | `ISS_API_URL`          | `http://api.open-notify.org/iss-now.json` |
//! | `ISS_API_TIMEOUT_SECS` | `10`                                      |
//! | `SMTP_HOST`            | `smtp.gmail.com`                          |
//! | `SMTP_PORT`            | `587`                                     |

use std::fmt;
use std::time::Duration;

use iss_core::geo::PROXIMITY_WINDOW_DEG;
use iss_core::tracking::{DEFAULT_COOLDOWN, DEFAULT_POLL_INTERVAL};
use iss_core::TargetLocation;

/// Public "where is the ISS now" endpoint.
pub const DEFAULT_ISS_API_URL: &str = "http://api.open-notify.org/iss-now.json";

/// Per-request timeout for the ISS API.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Mail relay used when `SMTP_HOST` is not set.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

// ---------------------------------------------------------------------------
// TrackerConfig
// ---------------------------------------------------------------------------

/// Parameters of the tracking loop itself.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Observer location, fixed for the session.
    pub target: TargetLocation,
    /// Wait between polls when nothing was sent (default: 60 s).
    pub poll_interval: Duration,
    /// Wait after a notification (default: 10 h).
    pub cooldown: Duration,
    /// Half-width of the proximity window in degrees (default: 5).
    pub proximity_window_deg: f64,
}

impl TrackerConfig {
    /// Config for `target` with the default timings and window.
    pub fn new(target: TargetLocation) -> Self {
        Self {
            target,
            poll_interval: DEFAULT_POLL_INTERVAL,
            cooldown: DEFAULT_COOLDOWN,
            proximity_window_deg: PROXIMITY_WINDOW_DEG,
        }
    }
}

// ---------------------------------------------------------------------------
// LocationConfig
// ---------------------------------------------------------------------------

/// Where and how to fetch the current ISS position.
#[derive(Debug, Clone)]
pub struct LocationConfig {
    pub api_url: String,
    pub request_timeout: Duration,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_ISS_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl LocationConfig {
    /// Load from `ISS_API_URL` / `ISS_API_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("ISS_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ISS_API_URL.to_string());

        let timeout_secs = lookup("ISS_API_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

// ---------------------------------------------------------------------------
// MailConfig
// ---------------------------------------------------------------------------

/// SMTP relay address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpRelay {
    pub host: String,
    pub port: u16,
}

impl Default for SmtpRelay {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
        }
    }
}

impl SmtpRelay {
    /// Load from `SMTP_HOST` / `SMTP_PORT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("SMTP_HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
            port: lookup("SMTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
        }
    }
}

/// Everything needed to send the notification email.
#[derive(Clone)]
pub struct MailConfig {
    pub relay: SmtpRelay,
    /// RFC 5322 "From" address, also the SMTP username.
    pub sender_email: String,
    pub sender_password: String,
    pub receiver_email: String,
}

// Keeps the password out of logs.
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("relay", &self.relay)
            .field("sender_email", &self.sender_email)
            .field("sender_password", &"<redacted>")
            .field("receiver_email", &self.receiver_email)
            .finish()
    }
}
