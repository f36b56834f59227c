//! Crossprint - print an isolated DOM subtree
//!
//! A [`Printer`] mirrors a content node (and optionally the page's styles and
//! fonts) into an off-layout print surface, then runs the platform print
//! action against that surface instead of the whole page. Any code on the
//! page can trigger every printer through the print signal
//! ([`send_print_signal`]) without holding a reference to one.
//!
//! The host page is reached only through the [`PrintHost`] trait;
//! [`dom::Window`] implements it for the headless DOM.
//!
//! # Example
//!
//! ```rust
//! use crossprint::{send_print_signal, InitOptions, PrinterBuilder};
//! use dom::Window;
//!
//! let window = Window::new();
//! let document = window.document();
//! document.set_title("Dashboard");
//! let invoice = document.create_element("article");
//! invoice.append_text("Total: 42").unwrap();
//! document.body().append_child(&invoice).unwrap();
//!
//! let mut builder = PrinterBuilder::new(window.clone())
//!     .content(invoice)
//!     .title("Invoice")
//!     .page_style("body { color: black }");
//! let printer = builder.build().unwrap();
//! printer.init(InitOptions::copy_nothing());
//!
//! assert!(send_print_signal(&window));
//! let requests = window.print_requests();
//! assert_eq!(requests.len(), 1);
//! assert_eq!(requests[0].top_level_title, "Invoice");
//! assert_eq!(document.title(), "Dashboard");
//! ```

mod builder;
mod constants;
mod error;
mod host;
pub mod logging;
mod mirror;
mod mount;
mod options;
mod printer;
mod signal;
mod surface;
mod title;

pub use builder::*;
pub use constants::*;
pub use error::*;
pub use host::*;
pub use logging::{LogLevel, Logger};
pub use mirror::*;
pub use mount::*;
pub use options::*;
pub use printer::*;
pub use signal::*;
pub use surface::*;
pub use title::*;
