//! Fluent printer configuration

use crate::error::Result;
use crate::host::PrintHost;
use crate::logging::{LogLevel, Logger};
use crate::options::{EventMap, PrinterOptions, PrinterSettings};
use crate::printer::Printer;
use dom::{Element, Listener};

/// Accumulates [`PrinterOptions`] and owns at most one built printer.
///
/// ```rust
/// use crossprint::{InitOptions, PrintStatus, PrinterBuilder};
/// use dom::Window;
///
/// let window = Window::new();
/// let content = window.document().create_element("section");
/// window.document().body().append_child(&content).unwrap();
///
/// let mut builder = PrinterBuilder::new(window.clone())
///     .content(content)
///     .title("Report")
///     .page_style("@page { margin: 1cm }");
/// let printer = builder.build().unwrap();
/// printer.init(InitOptions::default());
/// assert_eq!(printer.print(), PrintStatus::Printed);
/// assert!(builder.destroy());
/// ```
pub struct PrinterBuilder<H> {
    host: H,
    options: PrinterOptions,
    logger: Logger,
    built: Option<Printer<H>>,
}

impl<H: PrintHost + Clone + 'static> PrinterBuilder<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            options: PrinterOptions::default(),
            logger: Logger::new("Builder", LogLevel::None),
            built: None,
        }
    }

    pub fn content(mut self, content: Element) -> Self {
        self.options.content = Some(content);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.settings.title = Some(title.into());
        self
    }

    pub fn page_style(mut self, css: impl Into<String>) -> Self {
        self.options.settings.page_style = Some(css.into());
        self
    }

    /// Listen for `event` on the surface element
    pub fn add_event(mut self, event: impl Into<String>, listener: Listener) -> Self {
        self.options.events.insert(event, listener);
        self
    }

    /// Replace every configured surface listener
    pub fn set_events(mut self, events: EventMap) -> Self {
        self.options.events = events;
        self
    }

    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.options.settings.log_level = level;
        self.logger.set_level(level);
        self
    }

    pub fn copy_styles(mut self, copy: bool) -> Self {
        self.options.settings.copy_styles = copy;
        self
    }

    pub fn copy_fonts(mut self, copy: bool) -> Self {
        self.options.settings.copy_fonts = copy;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.options.settings.hidden = hidden;
        self
    }

    pub fn reuse_existing(mut self, reuse: bool) -> Self {
        self.options.settings.reuse_existing = reuse;
        self
    }

    /// Replace the whole configuration
    pub fn from_options(mut self, options: PrinterOptions) -> Self {
        self.logger.set_level(options.settings.log_level);
        self.options = options;
        self
    }

    pub fn settings(&self) -> &PrinterSettings {
        &self.options.settings
    }

    /// Build a printer from the current configuration. A printer built
    /// earlier by this builder is removed first.
    pub fn build(&mut self) -> Result<Printer<H>> {
        if let Some(previous) = self.built.take() {
            previous.remove();
            self.logger.debug("Removed previously built printer");
        }
        let printer = Printer::new(self.host.clone(), self.options.clone())?;
        self.built = Some(printer.clone());
        self.logger.debug("Built printer");
        Ok(printer)
    }

    pub fn built(&self) -> Option<&Printer<H>> {
        self.built.as_ref()
    }

    /// Remove the built printer. Returns `false` when there was none.
    pub fn destroy(&mut self) -> bool {
        let Some(printer) = self.built.take() else {
            return false;
        };
        printer.remove();
        self.logger.debug("Destroyed printer");
        true
    }
}
