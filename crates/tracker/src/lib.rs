//! `iss-tracker` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod config;
pub mod location;
pub mod notifier;
pub mod prompt;
pub mod solar;
pub mod tracking;
