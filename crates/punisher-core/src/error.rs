// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Punisher trader mod.

use thiserror::Error;

/// The primary error type shared by the host ports and the lifecycle hooks.
#[derive(Debug, Error)]
pub enum PunisherError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// The catalog failed structural validation. The message lists every violation.
    #[error("catalog validation failed: {0}")]
    Validation(String),

    /// A declarative data file (base.json, presets.json, offers.toml, assort.json)
    /// could not be read or parsed.
    #[error("failed to load {path}: {message}")]
    Data {
        path: String,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A host-provided service call failed. Not recoverable locally.
    #[error("host integration error in {service}: {message}")]
    HostIntegration {
        service: &'static str,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A lifecycle hook was invoked out of order.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Filesystem errors while locating mod resources.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PunisherError {
    /// Shorthand for a host failure without an underlying source error.
    pub fn host(service: &'static str, message: impl Into<String>) -> Self {
        PunisherError::HostIntegration {
            service,
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a data-file failure wrapping its parse error.
    pub fn data<E>(path: impl Into<String>, err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PunisherError::Data {
            path: path.into(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
