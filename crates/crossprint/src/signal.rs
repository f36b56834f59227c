//! Page-wide print signal
//!
//! The signal is a named event on the host's global event bus. Every
//! subscriber receives every emission; there is no addressing.

use crate::constants::PRINT_SIGNAL_ID;
use crate::host::PrintHost;
use dom::{Listener, ListenerId};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct PrintSignalBus<H> {
    host: H,
}

impl<H: PrintHost> PrintSignalBus<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Name of the signal on the global event bus
    pub fn name(&self) -> &'static str {
        PRINT_SIGNAL_ID
    }

    /// Broadcast the signal. Reports whether the host accepted the dispatch,
    /// not whether anyone handled it.
    pub fn emit(&self) -> bool {
        self.host.dispatch_global_event(PRINT_SIGNAL_ID)
    }

    pub fn subscribe<F>(&self, handler: F) -> ListenerId
    where
        F: Fn() + 'static,
    {
        let listener: Listener = Rc::new(move |_| handler());
        self.host.subscribe_global_event(PRINT_SIGNAL_ID, listener)
    }

    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.host.unsubscribe_global_event(PRINT_SIGNAL_ID, id)
    }
}

impl<H: PrintHost + Clone + 'static> PrintSignalBus<H> {
    /// Subscribe for as long as the returned handle lives
    pub fn subscribe_scoped<F>(&self, handler: F) -> SignalSubscription
    where
        F: Fn() + 'static,
    {
        let id = self.subscribe(handler);
        let bus = self.clone();
        SignalSubscription {
            id,
            release: Some(Box::new(move |id| {
                bus.unsubscribe(id);
            })),
        }
    }
}

/// Print signal subscription; dropping it unsubscribes
pub struct SignalSubscription {
    id: ListenerId,
    release: Option<Box<dyn FnOnce(ListenerId)>>,
}

impl SignalSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for SignalSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl fmt::Debug for SignalSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalSubscription")
            .field("id", &self.id)
            .finish()
    }
}

/// Ask every printer on the page to print
pub fn send_print_signal<H: PrintHost>(host: &H) -> bool {
    host.dispatch_global_event(PRINT_SIGNAL_ID)
}
