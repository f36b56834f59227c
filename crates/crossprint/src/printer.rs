//! The print controller
//!
//! A [`Printer`] owns one print surface and its configuration. It moves
//! through `Uninitialized -> Ready -> (reset) -> Uninitialized` and ends in
//! `Removed`. Misuse (printing before `init`, initializing twice, touching a
//! removed printer) is logged and ignored.

use crate::constants::{PAGE_STYLE_ID, SURFACE_ID};
use crate::error::HostError;
use crate::host::PrintHost;
use crate::logging::Logger;
use crate::mirror::{MirrorOutcome, MirrorResult};
use crate::options::{InitOptions, PrinterOptions};
use crate::signal::{PrintSignalBus, SignalSubscription};
use crate::surface::{SurfaceManager, SurfaceOptions};
use crate::title::TitleGuard;
use dom::{Document, Element, ListenerId};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifecycle {
    Uninitialized,
    Ready,
    Removed,
}

/// What happened to a print request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PrintStatus {
    /// The platform print action was invoked
    Printed,
    /// `init` has not completed; nothing was touched
    NotReady,
    /// The surface is no longer attached to the page
    SurfaceDetached,
    /// The platform print action reported an error
    Failed,
    /// The printer was already in the middle of an operation
    Busy,
}

/// Mirroring outcomes of one `init` call. `None` means not attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Whether this call initialized the printer
    pub applied: bool,
    pub styles: Option<MirrorResult>,
    pub fonts: Option<MirrorResult>,
    pub page_style: Option<MirrorResult>,
    pub content: Option<MirrorResult>,
}

impl InitReport {
    /// Whether any attempted category failed, fully or partly
    pub fn has_failures(&self) -> bool {
        [&self.styles, &self.fonts, &self.page_style, &self.content]
            .into_iter()
            .flatten()
            .any(|result| !matches!(result, Ok(MirrorOutcome::Complete | MirrorOutcome::NothingToCopy)))
    }
}

struct PrinterState<H> {
    surface: SurfaceManager<H>,
    options: PrinterOptions,
    surface_listeners: Vec<(String, ListenerId)>,
    signal: Option<SignalSubscription>,
}

// Lifecycle lives outside the RefCell so it stays readable mid-operation.
struct Shared<H> {
    state: RefCell<PrinterState<H>>,
    lifecycle: Cell<Lifecycle>,
}

/// Handle to a print controller. Clones refer to the same printer.
///
/// Dropping the last handle ends the print signal subscription; the surface
/// stays on the page until [`Printer::remove`].
pub struct Printer<H> {
    shared: Rc<Shared<H>>,
    logger: Logger,
}

impl<H> Clone for Printer<H> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            logger: self.logger,
        }
    }
}

impl<H> fmt::Debug for Printer<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Printer");
        debug.field("lifecycle", &self.shared.lifecycle.get());
        if let Ok(state) = self.shared.state.try_borrow() {
            debug.field("settings", &state.options.settings);
        }
        debug.finish()
    }
}

impl<H: PrintHost + Clone + 'static> Printer<H> {
    /// Create the printer and its surface. The surface is attached right
    /// away; nothing is mirrored until [`Printer::init`].
    pub fn new(host: H, options: PrinterOptions) -> Result<Self, HostError> {
        let settings = &options.settings;
        let logger = Logger::new("Printer", settings.log_level);
        let surface_options = SurfaceOptions {
            id: Some(SURFACE_ID.to_string()),
            hidden: settings.hidden,
            reuse_existing: settings.reuse_existing,
            log_level: settings.log_level,
        };
        let surface = SurfaceManager::new(host, &surface_options)?;

        Ok(Self {
            shared: Rc::new(Shared {
                state: RefCell::new(PrinterState {
                    surface,
                    options,
                    surface_listeners: Vec::new(),
                    signal: None,
                }),
                lifecycle: Cell::new(Lifecycle::Uninitialized),
            }),
            logger,
        })
    }

    /// Register listeners, mirror styles, fonts and content into the surface
    /// and become ready.
    pub fn init(&self, init: InitOptions) -> InitReport {
        let Ok(mut state) = self.shared.state.try_borrow_mut() else {
            self.logger.warn("init requested while the printer is busy");
            return InitReport::default();
        };
        match self.lifecycle() {
            Lifecycle::Ready => {
                self.logger.warn("tried to initialize the printer twice");
                return InitReport::default();
            }
            Lifecycle::Removed => {
                self.logger.warn("tried to initialize a removed printer");
                return InitReport::default();
            }
            Lifecycle::Uninitialized => {}
        }
        if state.options.content.is_none() {
            self.logger
                .error("initializing without content; set content once it is available");
        }

        state.register_surface_listeners();
        let signal = self.subscribe_signal(state.surface.host());
        state.signal = Some(signal);
        self.logger.debug("Registered print signal listener");

        let (copy_styles, copy_fonts) = init.resolve(&state.options.settings);
        let mut report = InitReport {
            applied: true,
            ..InitReport::default()
        };
        let surface = &state.surface;
        if copy_styles {
            report.styles = Some(self.logged("styles", surface.copy_styles_from_dom()));
        }
        if copy_fonts {
            report.fonts = Some(self.logged("fonts", surface.copy_fonts_from_dom()));
        }
        if let Some(css) = state.options.settings.effective_page_style() {
            let result = surface.append_style(PAGE_STYLE_ID, css);
            report.page_style = Some(self.logged("page style", result));
        }
        if let Some(title) = state.options.settings.effective_title() {
            if !surface.set_title(title) {
                self.logger.warn("could not set the surface title");
            }
        }
        if let Some(content) = &state.options.content {
            report.content = Some(self.logged("content", surface.copy_content(content)));
        }

        self.shared.lifecycle.set(Lifecycle::Ready);
        self.logger.info("Printer is ready");
        report
    }

    fn subscribe_signal(&self, host: &H) -> SignalSubscription {
        let weak: Weak<Shared<H>> = Rc::downgrade(&self.shared);
        let logger = self.logger;
        PrintSignalBus::new(host.clone()).subscribe_scoped(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            logger.debug("Received print signal");
            Printer { shared, logger }.print();
        })
    }

    fn logged(&self, what: &str, result: MirrorResult) -> MirrorResult {
        match &result {
            Ok(MirrorOutcome::Complete) => self.logger.debug(format_args!("Copied {what}")),
            Ok(MirrorOutcome::NothingToCopy) => {
                self.logger.debug(format_args!("No {what} to copy"))
            }
            Ok(outcome @ MirrorOutcome::Partial(items)) => {
                let failures = outcome
                    .failures()
                    .filter_map(|item| Some(format!("{}: {}", item.item, item.error()?)))
                    .collect::<Vec<_>>()
                    .join("; ");
                self.logger.error(format_args!(
                    "Failed to copy {what}: {} of {} failed ({failures})",
                    outcome.failure_count(),
                    items.len()
                ));
            }
            Err(err) => self.logger.error(format_args!("Failed to copy {what}: {err}")),
        }
        result
    }

    /// Print the surface, showing the configured title on the host page
    /// while the platform print action runs.
    pub fn print(&self) -> PrintStatus {
        let Ok(state) = self.shared.state.try_borrow_mut() else {
            self.logger.warn("print requested while the printer is busy");
            return PrintStatus::Busy;
        };
        if self.lifecycle() != Lifecycle::Ready {
            self.logger.warn("tried to print before the printer was ready");
            return PrintStatus::NotReady;
        }
        if !state.surface.is_attached() {
            self.logger.error("tried to print a surface that is not attached");
            return PrintStatus::SurfaceDetached;
        }

        let host = state.surface.host();
        let result = {
            let _title = TitleGuard::swap(host, state.options.settings.effective_title());
            host.invoke_native_print(state.surface.element())
        };
        match result {
            Ok(()) => {
                self.logger.debug("Invoked platform print");
                PrintStatus::Printed
            }
            Err(err) => {
                self.logger.error(format_args!("Error while printing: {err}"));
                PrintStatus::Failed
            }
        }
    }

    /// Unregister listeners and clear the surface. The surface stays
    /// attached; `init` may be called again.
    pub fn reset(&self) {
        let Ok(mut state) = self.shared.state.try_borrow_mut() else {
            self.logger.warn("reset requested while the printer is busy");
            return;
        };
        if self.lifecycle() == Lifecycle::Removed {
            self.logger.warn("tried to reset a removed printer");
            return;
        }
        state.unregister_listeners();
        if let Err(err) = state.surface.reset() {
            self.logger.warn(err);
        }
        self.shared.lifecycle.set(Lifecycle::Uninitialized);
        self.logger.debug("Printer reset");
    }

    /// Unregister listeners and detach the surface for good. Returns
    /// `false` when the printer was already removed.
    pub fn remove(&self) -> bool {
        let Ok(mut state) = self.shared.state.try_borrow_mut() else {
            self.logger.warn("remove requested while the printer is busy");
            return false;
        };
        if self.lifecycle() == Lifecycle::Removed {
            return false;
        }
        state.unregister_listeners();
        state.surface.reset_and_remove();
        self.shared.lifecycle.set(Lifecycle::Removed);
        self.logger.debug("Printer removed");
        true
    }

    /// Set the surface title and remember it for later prints. Leaves the
    /// configured title alone when the surface cannot be reached.
    pub fn set_title(&self, title: &str) -> bool {
        let Ok(mut state) = self.shared.state.try_borrow_mut() else {
            self.logger.warn("set_title requested while the printer is busy");
            return false;
        };
        if !state.surface.set_title(title) {
            self.logger.warn("Something went wrong while setting the title");
            return false;
        }
        state.options.settings.title = Some(title.to_string());
        true
    }

    /// Replace the configured content. A ready printer mirrors it at once;
    /// otherwise it is mirrored by the next `init`.
    pub fn set_content(&self, content: Element) -> Option<MirrorResult> {
        let Ok(mut state) = self.shared.state.try_borrow_mut() else {
            self.logger.warn("set_content requested while the printer is busy");
            return None;
        };
        match self.lifecycle() {
            Lifecycle::Removed => {
                self.logger.warn("tried to set content on a removed printer");
                None
            }
            Lifecycle::Uninitialized => {
                state.options.content = Some(content);
                None
            }
            Lifecycle::Ready => {
                let result = self.logged("content", state.surface.copy_content(&content));
                state.options.content = Some(content);
                Some(result)
            }
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.shared.lifecycle.get()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle() == Lifecycle::Ready
    }

    pub fn surface_element(&self) -> Option<Element> {
        if self.lifecycle() == Lifecycle::Removed {
            return None;
        }
        let state = self.shared.state.try_borrow().ok()?;
        Some(state.surface.element().clone())
    }

    pub fn surface_document(&self) -> Option<Document> {
        self.shared.state.try_borrow().ok()?.surface.content_document()
    }

    /// Configured title
    pub fn title(&self) -> Option<String> {
        self.shared.state.try_borrow().ok()?.options.settings.title.clone()
    }
}

impl<H: PrintHost + Clone> PrinterState<H> {
    fn register_surface_listeners(&mut self) {
        let element = self.surface.element().clone();
        for (event, listener) in self.options.events.iter() {
            let id = element.add_event_listener(event, Rc::clone(listener));
            self.surface_listeners.push((event.to_string(), id));
        }
    }

    fn unregister_listeners(&mut self) {
        let element = self.surface.element().clone();
        for (event, id) in self.surface_listeners.drain(..) {
            element.remove_event_listener(&event, id);
        }
        drop(self.signal.take());
    }
}
