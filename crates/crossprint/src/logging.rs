//! Verbosity levels and the per-component logger
//!
//! Library code logs through [`Logger`], which applies the configured
//! [`LogLevel`] before handing events to `tracing`. Applications decide where
//! events go by installing a subscriber, for example with [`init`].

use crate::PrintError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Configured verbosity. Each level includes the ones before it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    None,
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Whether a message at `level` passes this verbosity
    pub fn allows(self, level: LogLevel) -> bool {
        level != LogLevel::None && level <= self
    }
}

impl FromStr for LogLevel {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(LogLevel::None),
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(PrintError::Config(format!("unknown log level '{other}'"))),
        }
    }
}

/// Level-gated logger tagging every event with its component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    component: &'static str,
    level: LogLevel,
}

impl Logger {
    pub fn new(component: &'static str, level: LogLevel) -> Self {
        Self { component, level }
    }

    pub fn component(&self) -> &'static str {
        self.component
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn error(&self, message: impl fmt::Display) {
        if self.level.allows(LogLevel::Error) {
            tracing::error!(component = self.component, "{}", message);
        }
    }

    pub fn warn(&self, message: impl fmt::Display) {
        if self.level.allows(LogLevel::Warn) {
            tracing::warn!(component = self.component, "{}", message);
        }
    }

    pub fn info(&self, message: impl fmt::Display) {
        if self.level.allows(LogLevel::Info) {
            tracing::info!(component = self.component, "{}", message);
        }
    }

    pub fn debug(&self, message: impl fmt::Display) {
        if self.level.allows(LogLevel::Debug) {
            tracing::debug!(component = self.component, "{}", message);
        }
    }
}

/// Install a global `fmt` subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init() -> bool {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
