//! Headless DOM - the host environment the print surface is mirrored into
//!
//! This crate provides a small, single-threaded, in-memory model of a browser
//! page: a top-level [`Window`] with its [`Document`], elements with attributes,
//! inline style properties and text, `<iframe>` elements that own a nested
//! browsing context while they are connected, a per-document [`FontFaceSet`],
//! and event listener registries on windows and elements.
//!
//! Handles ([`Window`], [`Document`], [`Element`], [`FontFaceSet`]) are cheap
//! reference-counted clones pointing at shared state, the same way script
//! bindings hand out references to platform objects.
//!
//! # Example
//!
//! ```rust
//! use dom::Window;
//!
//! let window = Window::new();
//! let document = window.document();
//! let frame = document.create_element("iframe");
//! assert!(frame.content_window().is_none());
//!
//! document.body().append_child(&frame).unwrap();
//! let inner = frame.content_document().unwrap();
//! inner.set_title("Report");
//! assert_eq!(inner.title(), "Report");
//! ```

mod document;
mod element;
mod error;
mod event;
mod font;
mod node;
mod node_id;
mod tree;
mod window;

pub use document::*;
pub use element::*;
pub use error::*;
pub use event::*;
pub use font::*;
pub use node_id::*;
pub use window::*;
