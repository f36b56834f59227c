//! The isolated print surface and everything mirrored into it

use crate::constants::SURFACE_ID;
use crate::error::{HostError, Unreachable};
use crate::host::PrintHost;
use crate::logging::{LogLevel, Logger};
use crate::mirror::{MirrorItem, MirrorOutcome, MirrorResult};
use dom::{Document, Element};

/// How a [`SurfaceManager`] finds or creates its surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Element id of the surface; required for reuse
    pub id: Option<String>,
    /// Keep the surface out of the page layout
    pub hidden: bool,
    /// Adopt an attached surface with the same id instead of creating one
    pub reuse_existing: bool,
    pub log_level: LogLevel,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            id: Some(SURFACE_ID.to_string()),
            hidden: false,
            reuse_existing: false,
            log_level: LogLevel::None,
        }
    }
}

impl SurfaceOptions {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_reuse_existing(mut self, reuse: bool) -> Self {
        self.reuse_existing = reuse;
        self
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

/// Owns one print surface attached to the host page.
///
/// The style area is the surface document's head and the content area is its
/// body. Once the surface cannot be reached (detached, removed, no browsing
/// context) every operation reports [`Unreachable`] or `false` instead of
/// failing.
#[derive(Debug)]
pub struct SurfaceManager<H> {
    host: H,
    element: Element,
    identity: Option<String>,
    removed: bool,
    logger: Logger,
}

impl<H: PrintHost> SurfaceManager<H> {
    /// Adopt an existing surface (when reuse is requested and one is found)
    /// or create and attach a fresh one.
    pub fn new(host: H, options: &SurfaceOptions) -> Result<Self, HostError> {
        let logger = Logger::new("Surface", options.log_level);
        let element = match Self::find_existing(&host, options, &logger) {
            Some(existing) => existing,
            None => Self::create(&host, options, &logger)?,
        };

        Ok(Self {
            host,
            element,
            identity: options.id.clone(),
            removed: false,
            logger,
        })
    }

    fn find_existing(host: &H, options: &SurfaceOptions, logger: &Logger) -> Option<Element> {
        if !options.reuse_existing {
            return None;
        }
        let id = options.id.as_deref()?;
        logger.debug(format_args!("Searching for an existing surface with id '{id}'"));
        let found = host.locate_surface_by_id(id);
        if found.is_some() {
            logger.debug(format_args!("Reusing surface '{id}'"));
        }
        found
    }

    fn create(host: &H, options: &SurfaceOptions, logger: &Logger) -> Result<Element, HostError> {
        logger.debug("Creating a new surface");
        let element = host.create_surface()?;
        element.set_style_property("border", "none");
        element.set_attribute("srcdoc", "");
        if options.hidden {
            element.set_style_property("position", "absolute");
            element.set_style_property("visibility", "hidden");
            element.set_style_property("width", "0");
            element.set_style_property("height", "0");
        }
        if let Some(id) = &options.id {
            element.set_id(id);
        }
        host.attach_surface(&element)?;
        Ok(element)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    pub fn is_attached(&self) -> bool {
        !self.removed && self.element.is_connected()
    }

    /// Document of the surface's browsing context, if it can be reached
    pub fn content_document(&self) -> Option<Document> {
        if self.removed {
            return None;
        }
        self.element.content_document()
    }

    fn reachable(&self) -> Result<Document, Unreachable> {
        self.content_document().ok_or_else(|| Unreachable {
            surface: self.identity.clone(),
        })
    }

    /// Clone every host style source into the style area
    pub fn copy_styles_from_dom(&self) -> MirrorResult {
        let head = self.reachable()?.head();
        let items = self
            .host
            .enumerate_style_sources()
            .into_iter()
            .map(|source| {
                let item = item_name(&source);
                match self.host.mirror_node(&source, &head) {
                    Ok(_) => MirrorItem::copied(item),
                    Err(err) => MirrorItem::failed(item, err),
                }
            })
            .collect();
        Ok(MirrorOutcome::from_items(items))
    }

    /// Register every loaded host font face in the surface's font registry
    pub fn copy_fonts_from_dom(&self) -> MirrorResult {
        let document = self.reachable()?;
        let Some(faces) = self.host.enumerate_font_faces() else {
            self.logger.debug("Host exposes no font registry");
            return Ok(MirrorOutcome::NothingToCopy);
        };
        let items = faces
            .iter()
            .map(|face| match self.host.register_font(&document, face) {
                Ok(()) => MirrorItem::copied(face.family()),
                Err(err) => MirrorItem::failed(face.family(), err),
            })
            .collect();
        Ok(MirrorOutcome::from_items(items))
    }

    /// Replace the content area with a deep copy of `node`
    pub fn copy_content(&self, node: &Element) -> MirrorResult {
        let body = self.reachable()?.body();
        body.clear_children();
        let result = self.host.mirror_node(node, &body).map(|_| ());
        Ok(MirrorOutcome::from_items(vec![MirrorItem {
            item: item_name(node),
            result,
        }]))
    }

    /// Put a `<style id=..>` block with `css` into the style area, replacing
    /// any block with the same id.
    pub fn append_style(&self, id: &str, css: &str) -> MirrorResult {
        let document = self.reachable()?;
        remove_by_id(&document, id);

        let style = document.create_element("style");
        style.set_id(id);
        let result = style
            .set_text_content(css)
            .and_then(|()| document.head().append_child(&style))
            .map_err(HostError::from);
        Ok(MirrorOutcome::from_items(vec![MirrorItem {
            item: id.to_string(),
            result,
        }]))
    }

    /// Remove the style block with `id`; reports whether one was present
    pub fn remove_style(&self, id: &str) -> Result<bool, Unreachable> {
        let document = self.reachable()?;
        Ok(remove_by_id(&document, id))
    }

    /// Set the surface document title; `false` when unreachable
    pub fn set_title(&self, title: &str) -> bool {
        match self.content_document() {
            Some(document) => {
                document.set_title(title);
                true
            }
            None => false,
        }
    }

    /// Clear the style and content areas along with script-added fonts.
    /// The surface stays attached with the same identity.
    pub fn reset(&self) -> Result<(), Unreachable> {
        let document = self.reachable()?;
        document.head().clear_children();
        document.body().clear_children();
        if let Some(fonts) = document.fonts() {
            fonts.clear();
        }
        Ok(())
    }

    /// Reset, then detach the surface from the page. The manager is spent
    /// afterwards: every later operation reports the surface unreachable.
    pub fn reset_and_remove(&mut self) {
        if self.removed {
            return;
        }
        if let Err(err) = self.reset() {
            self.logger.debug(err);
        }
        self.element.remove();
        self.removed = true;
        self.logger.debug("Removed surface");
    }
}

fn item_name(element: &Element) -> String {
    element.id().unwrap_or_else(|| element.tag_name())
}

fn remove_by_id(document: &Document, id: &str) -> bool {
    let mut removed = false;
    while let Some(existing) = document.get_element_by_id(id) {
        existing.remove();
        removed = true;
    }
    removed
}
