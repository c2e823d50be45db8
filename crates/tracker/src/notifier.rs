//! "ISS overhead" email via SMTP.
//!
//! [`EmailNotifier`] wraps the `lettre` async SMTP transport. It connects to
//! the configured relay with STARTTLS, authenticates with the sender's
//! credentials and sends one fixed plain-text message per call.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailConfig;

/// Subject line of the notification.
pub const NOTIFICATION_SUBJECT: &str = "ISS visible";

/// Body of the notification.
pub const NOTIFICATION_BODY: &str = "The ISS is above you! Look up!";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Why the "ISS visible" email could not be sent.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// Connecting, STARTTLS negotiation or login with the sender's
    /// credentials failed at the relay.
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The operator-supplied sender or receiver is not a valid mailbox.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// lettre rejected the fixed subject/body message.
    #[error("Email build error: {0}")]
    Build(String),
}

// ---------------------------------------------------------------------------
// Notifier trait
// ---------------------------------------------------------------------------

/// Sends the "ISS is overhead" alert.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self) -> Result<(), EmailError>;
}

// ---------------------------------------------------------------------------
// EmailNotifier
// ---------------------------------------------------------------------------

/// [`Notifier`] that mails the receiver through an authenticated relay.
///
/// A fresh SMTP transport is built for every notification.
pub struct EmailNotifier {
    config: MailConfig,
}

impl EmailNotifier {
    /// Create a notifier for the given relay and credentials.
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    /// Assemble the notification message without sending it.
    pub fn build_message(&self) -> Result<Message, EmailError> {
        Message::builder()
            .from(self.config.sender_email.parse()?)
            .to(self.config.receiver_email.parse()?)
            .subject(NOTIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(NOTIFICATION_BODY.to_string())
            .map_err(|e| EmailError::Build(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let credentials = Credentials::new(
            self.config.sender_email.clone(),
            self.config.sender_password.clone(),
        );

        let mailer =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.relay.host)?
                .port(self.config.relay.port)
                .credentials(credentials)
                .build();
        Ok(mailer)
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self) -> Result<(), EmailError> {
        let email = self.build_message()?;
        self.transport()?.send(email).await?;

        tracing::info!(
            to = %self.config.receiver_email,
            relay = %self.config.relay.host,
            "Notification email sent"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
