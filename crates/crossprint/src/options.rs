//! Printer configuration
//!
//! [`PrinterSettings`] is the plain-data part of the configuration and can be
//! read from JSON. [`PrinterOptions`] adds what only exists at runtime: the
//! content node and the surface event listeners.

use crate::error::Result;
use crate::logging::LogLevel;
use dom::{Element, Listener};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Serializable printer settings. Missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrinterSettings {
    /// Title of the printed document; also shown on the host while printing
    pub title: Option<String>,
    /// CSS injected into the surface as the `page-style` block
    pub page_style: Option<String>,
    pub copy_styles: bool,
    pub copy_fonts: bool,
    pub hidden: bool,
    pub reuse_existing: bool,
    pub log_level: LogLevel,
}

impl PrinterSettings {
    /// Configured title; an empty string counts as unset
    pub fn effective_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }

    /// Configured page style; an empty string counts as unset
    pub fn effective_page_style(&self) -> Option<&str> {
        self.page_style.as_deref().filter(|css| !css.is_empty())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Surface event listeners keyed by event name. Setting a name twice keeps
/// the last listener.
#[derive(Clone, Default)]
pub struct EventMap {
    listeners: BTreeMap<String, Listener>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: impl Into<String>, listener: Listener) {
        self.listeners.insert(event.into(), listener);
    }

    pub fn get(&self, event: &str) -> Option<&Listener> {
        self.listeners.get(event)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Listener)> {
        self.listeners
            .iter()
            .map(|(event, listener)| (event.as_str(), listener))
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for EventMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.listeners.keys()).finish()
    }
}

/// Complete printer configuration, handed to a printer when it is built
#[derive(Debug, Clone, Default)]
pub struct PrinterOptions {
    pub content: Option<Element>,
    pub events: EventMap,
    pub settings: PrinterSettings,
}

impl PrinterOptions {
    pub fn new(settings: PrinterSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn with_content(mut self, content: Element) -> Self {
        self.content = Some(content);
        self
    }
}

/// Per-call overrides for `Printer::init`. Unset flags fall back to the
/// printer settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub copy_styles: Option<bool>,
    pub copy_fonts: Option<bool>,
}

impl InitOptions {
    pub fn copy_all() -> Self {
        Self {
            copy_styles: Some(true),
            copy_fonts: Some(true),
        }
    }

    pub fn copy_nothing() -> Self {
        Self {
            copy_styles: Some(false),
            copy_fonts: Some(false),
        }
    }

    pub(crate) fn resolve(self, settings: &PrinterSettings) -> (bool, bool) {
        (
            self.copy_styles.unwrap_or(settings.copy_styles),
            self.copy_fonts.unwrap_or(settings.copy_fonts),
        )
    }
}
