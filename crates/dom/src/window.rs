//! Windows (browsing contexts) and the platform print pipeline

use crate::document::WeakDocument;
use crate::event::{dispatch, Listener, ListenerId, ListenerRegistry};
use crate::{Document, DomError, Result};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Platform hook invoked for every print request
pub type PrintHandler = Box<dyn FnMut(&PrintRequest) -> Result<()>>;

/// What the platform saw when print was invoked on a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    /// Title of the document being printed
    pub document_title: String,
    /// Title of the top-level document at the moment of the call
    pub top_level_title: String,
    /// Text content of the printed document's body
    pub body_text: String,
}

/// Page-wide state shared by a top-level window and every nested context
#[derive(Default)]
pub(crate) struct Platform {
    top: RefCell<Option<WeakDocument>>,
    handler: RefCell<Option<PrintHandler>>,
    requests: RefCell<Vec<PrintRequest>>,
}

impl Platform {
    /// Only accepted calls are recorded; a print started while the handler
    /// runs is rejected before it reaches the record.
    fn print(&self, document: &Document) -> Result<()> {
        let Ok(mut handler) = self.handler.try_borrow_mut() else {
            return Err(DomError::PrintFailed(
                "a print dialog is already open".to_string(),
            ));
        };
        let top_level_title = self
            .top
            .borrow()
            .as_ref()
            .and_then(WeakDocument::upgrade)
            .map(|top| top.title())
            .unwrap_or_default();
        let request = PrintRequest {
            document_title: document.title(),
            top_level_title,
            body_text: document.body().text_content(),
        };
        self.requests.borrow_mut().push(request.clone());

        match handler.as_mut() {
            Some(handler) => handler(&request),
            None => Ok(()),
        }
    }
}

struct WindowInner {
    document: Document,
    listeners: RefCell<ListenerRegistry>,
    platform: Rc<Platform>,
}

/// Handle to a browsing context. Clones refer to the same window.
#[derive(Clone)]
pub struct Window {
    inner: Rc<WindowInner>,
}

impl Window {
    /// Create a top-level window whose documents expose a font registry
    pub fn new() -> Self {
        Self::top_level(true)
    }

    /// Create a top-level window for an environment without `document.fonts`
    pub fn without_font_registry() -> Self {
        Self::top_level(false)
    }

    fn top_level(font_registry: bool) -> Self {
        let platform = Rc::new(Platform::default());
        let window = Self::nested(platform.clone(), font_registry);
        *platform.top.borrow_mut() = Some(window.document().downgrade());
        window
    }

    pub(crate) fn nested(platform: Rc<Platform>, font_registry: bool) -> Self {
        let document = Document::create(platform.clone(), font_registry);
        Self {
            inner: Rc::new(WindowInner {
                document,
                listeners: RefCell::default(),
                platform,
            }),
        }
    }

    pub fn document(&self) -> Document {
        self.inner.document.clone()
    }

    pub fn add_event_listener(&self, event: &str, listener: Listener) -> ListenerId {
        self.inner.listeners.borrow_mut().add(event, listener)
    }

    pub fn remove_event_listener(&self, event: &str, id: ListenerId) -> bool {
        self.inner.listeners.borrow_mut().remove(event, id)
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.listeners.borrow().count(event)
    }

    /// Dispatch `event` to every window listener.
    ///
    /// Returns `false` only when a listener cancelled the event.
    pub fn dispatch_event(&self, event: &str) -> bool {
        let listeners = self.inner.listeners.borrow().listeners_for(event);
        dispatch(event, listeners)
    }

    /// Ask the platform to print this window's document
    pub fn print(&self) -> Result<()> {
        self.inner.platform.print(&self.inner.document)
    }

    /// Install the platform print hook shared by the whole page
    pub fn set_print_handler<F>(&self, handler: F)
    where
        F: FnMut(&PrintRequest) -> Result<()> + 'static,
    {
        *self.inner.platform.handler.borrow_mut() = Some(Box::new(handler));
    }

    /// Every print request the page has seen, oldest first
    pub fn print_requests(&self) -> Vec<PrintRequest> {
        self.inner.platform.requests.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Window) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("document", &self.inner.document)
            .field("listeners", &self.inner.listeners.borrow())
            .finish()
    }
}
