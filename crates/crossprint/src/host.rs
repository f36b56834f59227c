//! Capability interface to the host page
//!
//! [`PrintHost`] is everything the surface manager and the controller need
//! from the environment. Item-level operations have default implementations
//! on top of the DOM handles, so a host only overrides what differs (tests
//! use this to inject failures for individual items).

use crate::error::HostError;
use dom::{Document, Element, FontFace, Listener, ListenerId, Window};

pub trait PrintHost {
    /// Create a detached surface element
    fn create_surface(&self) -> Result<Element, HostError>;

    /// Attach a surface to the page, giving it a browsing context
    fn attach_surface(&self, surface: &Element) -> Result<(), HostError>;

    /// Find an attached surface by element id. Elements of another kind
    /// carrying the same id are not surfaces.
    fn locate_surface_by_id(&self, id: &str) -> Option<Element>;

    /// Inline style blocks followed by linked stylesheets, in document order
    fn enumerate_style_sources(&self) -> Vec<Element>;

    /// Loaded font faces, or `None` when the page exposes no font registry
    fn enumerate_font_faces(&self) -> Option<Vec<FontFace>>;

    /// Deep-copy `source` and append the copy to `parent`
    fn mirror_node(&self, source: &Element, parent: &Element) -> Result<Element, HostError> {
        let copy = parent.owner_document().import_node(source, true)?;
        parent.append_child(&copy)?;
        Ok(copy)
    }

    /// Register `face` in the font registry of `target`
    fn register_font(&self, target: &Document, face: &FontFace) -> Result<(), HostError> {
        let fonts = target.fonts().ok_or(HostError::NoFontRegistry)?;
        fonts.add(face.clone())?;
        Ok(())
    }

    /// Dispatch a page-wide event; reports whether the dispatch was accepted
    fn dispatch_global_event(&self, name: &str) -> bool;

    fn subscribe_global_event(&self, name: &str, listener: Listener) -> ListenerId;

    fn unsubscribe_global_event(&self, name: &str, id: ListenerId) -> bool;

    /// Invoke the platform print action on a surface
    fn invoke_native_print(&self, surface: &Element) -> Result<(), HostError> {
        let window = surface
            .content_window()
            .ok_or(HostError::NoBrowsingContext)?;
        window.print()?;
        Ok(())
    }

    /// Title of the host document
    fn document_title(&self) -> String;

    fn set_document_title(&self, title: &str);
}

impl PrintHost for Window {
    fn create_surface(&self) -> Result<Element, HostError> {
        Ok(self.document().create_element("iframe"))
    }

    fn attach_surface(&self, surface: &Element) -> Result<(), HostError> {
        self.document().body().append_child(surface)?;
        Ok(())
    }

    fn locate_surface_by_id(&self, id: &str) -> Option<Element> {
        self.document()
            .get_element_by_id(id)
            .filter(|element| element.tag_name() == "iframe")
    }

    fn enumerate_style_sources(&self) -> Vec<Element> {
        let document = self.document();
        let mut sources = document.elements_by_tag_name("style");
        sources.extend(
            document
                .elements_by_tag_name("link")
                .into_iter()
                .filter(is_stylesheet_link),
        );
        sources
    }

    fn enumerate_font_faces(&self) -> Option<Vec<FontFace>> {
        self.document().fonts().map(|fonts| fonts.values())
    }

    fn dispatch_global_event(&self, name: &str) -> bool {
        self.dispatch_event(name)
    }

    fn subscribe_global_event(&self, name: &str, listener: Listener) -> ListenerId {
        self.add_event_listener(name, listener)
    }

    fn unsubscribe_global_event(&self, name: &str, id: ListenerId) -> bool {
        self.remove_event_listener(name, id)
    }

    fn document_title(&self) -> String {
        self.document().title()
    }

    fn set_document_title(&self, title: &str) {
        self.document().set_title(title);
    }
}

fn is_stylesheet_link(link: &Element) -> bool {
    link.get_attribute("rel").is_some_and(|rel| {
        rel.split_ascii_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"))
    })
}
