//! Current ISS position from the Open Notify API.
//!
//! The endpoint answers `GET /iss-now.json` with
//! `{"message": "success", "timestamp": <unix secs>, "iss_position":
//! {"latitude": "<deg>", "longitude": "<deg>"}}`. Coordinates arrive as
//! strings and are parsed into `f64`.
//!
//! One request per call. There is no retry: failures are returned to the
//! tracking loop, which treats them as fatal.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use iss_core::IssPosition;

use crate::config::LocationConfig;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from fetching or decoding the ISS position.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// The HTTP request failed (network, DNS, timeout, JSON decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("ISS API returned HTTP {0}")]
    HttpStatus(u16),

    /// A coordinate string did not parse as a number.
    #[error("Invalid {field} in ISS API response: {value:?}")]
    Coordinate { field: &'static str, value: String },
}

// ---------------------------------------------------------------------------
// Source trait
// ---------------------------------------------------------------------------

/// Anything that can report where the ISS is right now.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_position(&self) -> Result<IssPosition, LocationError>;
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Body of `iss-now.json`.
#[derive(Debug, Deserialize)]
pub struct IssNowResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub iss_position: RawPosition,
}

/// Coordinates as the API sends them (decimal strings).
#[derive(Debug, Deserialize)]
pub struct RawPosition {
    pub latitude: String,
    pub longitude: String,
}

impl IssNowResponse {
    /// Convert the wire response into a typed position.
    pub fn into_position(self) -> Result<IssPosition, LocationError> {
        let latitude = parse_coordinate("latitude", &self.iss_position.latitude)?;
        let longitude = parse_coordinate("longitude", &self.iss_position.longitude)?;
        let reported_at = self
            .timestamp
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0));

        Ok(IssPosition {
            latitude,
            longitude,
            reported_at,
        })
    }
}

fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, LocationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LocationError::Coordinate {
            field,
            value: raw.to_string(),
        })
}

// ---------------------------------------------------------------------------
// OpenNotifyClient
// ---------------------------------------------------------------------------

/// HTTP client for the Open Notify `iss-now` endpoint.
pub struct OpenNotifyClient {
    client: reqwest::Client,
    api_url: String,
}

impl OpenNotifyClient {
    /// Build a client with the configured URL and request timeout.
    pub fn new(config: &LocationConfig) -> Result<Self, LocationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String) -> Self {
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl LocationSource for OpenNotifyClient {
    async fn current_position(&self) -> Result<IssPosition, LocationError> {
        let response = self.client.get(&self.api_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::HttpStatus(status.as_u16()));
        }

        let body: IssNowResponse = response.json().await?;
        if let Some(message) = body.message.as_deref().filter(|m| *m != "success") {
            tracing::warn!(api_message = message, "ISS API reported a non-success message");
        }

        let position = body.into_position()?;
        tracing::debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "Fetched ISS position"
        );
        Ok(position)
    }
}
