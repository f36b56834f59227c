//! Binding for UI frameworks that mount a container node
//!
//! A [`PrinterMount`] builds its printer once the container is attached to
//! the page, prints through the page-wide signal and tears the printer down
//! on unmount.

use crate::builder::PrinterBuilder;
use crate::error::Result;
use crate::host::PrintHost;
use crate::logging::Logger;
use crate::options::{InitOptions, PrinterOptions};
use crate::printer::Printer;
use crate::signal::send_print_signal;
use dom::Element;

pub struct PrinterMount<H> {
    host: H,
    options: PrinterOptions,
    container: Option<Element>,
    builder: Option<PrinterBuilder<H>>,
    logger: Logger,
}

impl<H: PrintHost + Clone + 'static> PrinterMount<H> {
    pub fn new(host: H, options: PrinterOptions) -> Self {
        let logger = Logger::new("Mount", options.settings.log_level);
        Self {
            host,
            options,
            container: None,
            builder: None,
            logger,
        }
    }

    /// Use `container` as the printed content. The printer is built now if
    /// the container is already attached, otherwise on [`Self::attached`].
    pub fn mount(&mut self, container: Element) -> Result<bool> {
        self.container = Some(container);
        self.attached()
    }

    /// Finish a deferred mount. Returns whether a printer is live.
    pub fn attached(&mut self) -> Result<bool> {
        if self.builder.is_some() {
            return Ok(true);
        }
        let Some(container) = &self.container else {
            return Ok(false);
        };
        if !container.is_connected() {
            self.logger.debug("Container is not attached yet; deferring");
            return Ok(false);
        }

        let mut options = self.options.clone().with_content(container.clone());
        let settings = &mut options.settings;
        settings.copy_styles = false;
        settings.copy_fonts = false;
        settings.hidden = true;
        if settings.effective_title().is_none() {
            let host_title = self.host.document_title();
            settings.title = (!host_title.is_empty()).then_some(host_title);
        }

        let mut builder = PrinterBuilder::new(self.host.clone()).from_options(options);
        let printer = builder.build()?;
        // The page is fully mounted by now, so its styles and fonts are complete.
        printer.init(InitOptions::copy_all());
        self.builder = Some(builder);
        self.logger.debug("Mounted printer");
        Ok(true)
    }

    pub fn printer(&self) -> Option<&Printer<H>> {
        self.builder.as_ref().and_then(PrinterBuilder::built)
    }

    /// Destroy the printer. Safe to call more than once.
    pub fn unmount(&mut self) -> bool {
        self.container = None;
        match self.builder.take() {
            Some(mut builder) => {
                self.logger.debug("Unmounting printer");
                builder.destroy()
            }
            None => false,
        }
    }

    /// Emit the page-wide print signal
    pub fn print(&self) -> bool {
        send_print_signal(&self.host)
    }
}
