//! `iss-tracker` -- emails you when the ISS passes overhead at night.
//!
//! Prompts on stdin for the observer location and mail credentials, then
//! polls the ISS position once a minute while it is dark at the observer.
//! When the station is within five degrees on both axes a single email is
//! sent and polling pauses for ten hours.
//!
//! # Environment variables
//!
//! | Variable               | Required | Default                                   |
//! |------------------------|----------|-------------------------------------------|
//! | `ISS_API_URL`          | no       | `http://api.open-notify.org/iss-now.json` |
//! | `ISS_API_TIMEOUT_SECS` | no       | `10`                                      |
//! | `SMTP_HOST`            | no       | `smtp.gmail.com`                          |
//! | `SMTP_PORT`            | no       | `587`                                     |
//! | `RUST_LOG`             | no       | `iss_tracker=info`                        |

use std::io::IsTerminal;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iss_tracker::config::{LocationConfig, SmtpRelay};
use iss_tracker::location::OpenNotifyClient;
use iss_tracker::notifier::EmailNotifier;
use iss_tracker::prompt::{self, OperatorInput, PasswordEntry, PromptError};
use iss_tracker::solar::SunCalculator;
use iss_tracker::tracking::Tracker;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iss_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let operator = match read_operator_input().await {
        Ok(input) => input,
        Err(e) => {
            tracing::error!(error = %e, "Invalid operator input");
            std::process::exit(1);
        }
    };

    let location_config = LocationConfig::from_env();
    let (tracker_config, mail_config) = operator.into_configs(SmtpRelay::from_env());

    tracing::info!(
        api_url = %location_config.api_url,
        smtp_host = %mail_config.relay.host,
        smtp_port = mail_config.relay.port,
        receiver = %mail_config.receiver_email,
        "Starting iss-tracker",
    );

    let location = match OpenNotifyClient::new(&location_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build ISS API client");
            std::process::exit(1);
        }
    };

    let mut tracker = Tracker::new(
        tracker_config,
        location,
        SunCalculator,
        EmailNotifier::new(mail_config),
    );

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.cancel();
    });

    if let Err(e) = tracker.run(cancel).await {
        tracing::error!(error = %e, "ISS tracker stopped");
        std::process::exit(1);
    }

    tracing::info!("Shutdown complete");
}

/// Read the five operator answers from stdin on a blocking thread.
///
/// The password is read without echo when stdin is a terminal.
async fn read_operator_input() -> Result<OperatorInput, PromptError> {
    tokio::task::spawn_blocking(|| {
        let stdin = std::io::stdin();
        let password_entry = if stdin.is_terminal() {
            PasswordEntry::Masked
        } else {
            PasswordEntry::Line
        };
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        prompt::read_operator_input(&mut input, &mut output, password_entry)
    })
    .await
    .map_err(|e| PromptError::Io(std::io::Error::other(e)))?
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), stopping tracker");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, stopping tracker");
        }
    }
}
