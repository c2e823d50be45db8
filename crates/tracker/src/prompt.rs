//! Interactive operator prompt.
//!
//! Asks for the five session parameters in a fixed order. A blank answer
//! takes the stated default; end of input takes the default for every
//! remaining question. Answers keep their inner and surrounding spaces
//! except where they are parsed (coordinates, addresses), so a password
//! is used exactly as typed.

use std::io::{BufRead, Write};

use iss_core::TargetLocation;

use crate::config::{MailConfig, SmtpRelay, TrackerConfig};

pub const DEFAULT_LATITUDE: f64 = 123.0;
pub const DEFAULT_LONGITUDE: f64 = 123.0;
pub const DEFAULT_SENDER_EMAIL: &str = "test@gmail.com";
pub const DEFAULT_SENDER_PASSWORD: &str = "xyz";
pub const DEFAULT_RECEIVER_EMAIL: &str = "abc@pace.edu";

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Failed to read operator input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read password from terminal: {0}")]
    Terminal(#[from] dialoguer::Error),

    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// How the sender password question is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordEntry {
    /// Read a line from the same input as the other questions.
    Line,
    /// Read from the terminal without echo.
    Masked,
}

/// Values collected from the operator.
pub struct OperatorInput {
    pub target: TargetLocation,
    pub sender_email: String,
    pub sender_password: String,
    pub receiver_email: String,
}

impl std::fmt::Debug for OperatorInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorInput")
            .field("target", &self.target)
            .field("sender_email", &self.sender_email)
            .field("sender_password", &"<redacted>")
            .field("receiver_email", &self.receiver_email)
            .finish()
    }
}

impl OperatorInput {
    /// Split into loop and mail configuration.
    pub fn into_configs(self, relay: SmtpRelay) -> (TrackerConfig, MailConfig) {
        let tracker = TrackerConfig::new(self.target);
        let mail = MailConfig {
            relay,
            sender_email: self.sender_email,
            sender_password: self.sender_password,
            receiver_email: self.receiver_email,
        };
        (tracker, mail)
    }
}

/// Run the prompt against `input`, writing questions to `output`.
///
/// With [`PasswordEntry::Masked`] the password question goes to the
/// terminal instead of `input`.
pub fn read_operator_input<R, W>(
    input: &mut R,
    output: &mut W,
    password_entry: PasswordEntry,
) -> Result<OperatorInput, PromptError>
where
    R: BufRead,
    W: Write,
{
    let latitude = ask(input, output, "latitude", &DEFAULT_LATITUDE.to_string())?;
    let longitude = ask(input, output, "longitude", &DEFAULT_LONGITUDE.to_string())?;
    let sender_email = ask(input, output, "sender email", DEFAULT_SENDER_EMAIL)?;
    let sender_password = match password_entry {
        PasswordEntry::Line => ask(input, output, PASSWORD_LABEL, DEFAULT_SENDER_PASSWORD)?,
        PasswordEntry::Masked => ask_masked(PASSWORD_LABEL, DEFAULT_SENDER_PASSWORD)?,
    };
    let receiver_email = ask(input, output, "receiver email", DEFAULT_RECEIVER_EMAIL)?;

    let target = TargetLocation::new(
        parse_number("latitude", latitude)?,
        parse_number("longitude", longitude)?,
    );

    if let Err(e) = target.validate() {
        tracing::warn!(error = %e, "Target location is outside the usual coordinate range");
    }

    Ok(OperatorInput {
        target,
        sender_email: sender_email.trim().to_string(),
        sender_password,
        receiver_email: receiver_email.trim().to_string(),
    })
}

const PASSWORD_LABEL: &str = "sender email password";

/// Print `Enter <label> (default is <default>): ` and read one line.
///
/// Only the line ending is stripped from the answer.
fn ask<R, W>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: &str,
) -> Result<String, PromptError>
where
    R: BufRead,
    W: Write,
{
    write!(output, "Enter {label} (default is {default}): ")?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    if read == 0 {
        return Ok(default.to_string());
    }

    Ok(or_default(line.trim_end_matches(['\r', '\n']), default))
}

/// Same question as [`ask`], read from the terminal without echo.
fn ask_masked(label: &str, default: &str) -> Result<String, PromptError> {
    let answer = dialoguer::Password::new()
        .with_prompt(format!("Enter {label} (default is {default})"))
        .allow_empty_password(true)
        .interact()?;
    Ok(or_default(&answer, default))
}

fn or_default(answer: &str, default: &str) -> String {
    if answer.trim().is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    }
}

fn parse_number(field: &'static str, value: String) -> Result<f64, PromptError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PromptError::InvalidNumber { field, value }),
    }
}
