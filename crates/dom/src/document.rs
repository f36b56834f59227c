//! Documents and the per-document shared state

use crate::event::ListenerRegistry;
use crate::node::{ElementData, NodeKind};
use crate::tree::NodeArena;
use crate::window::Platform;
use crate::{Element, FontFaceSet, NodeId, Result, Window};
use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

pub(crate) struct DocumentData {
    pub arena: NodeArena,
    pub root: NodeId,
    pub head: NodeId,
    pub body: NodeId,
    pub fonts: Option<FontFaceSet>,
    /// Nested browsing contexts of connected `<iframe>` elements
    pub frames: HashMap<NodeId, Window>,
    pub listeners: HashMap<NodeId, ListenerRegistry>,
    pub platform: Rc<Platform>,
}

/// Handle to a document. Clones refer to the same document.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocumentData>>,
}

#[derive(Clone)]
pub(crate) struct WeakDocument {
    inner: Weak<RefCell<DocumentData>>,
}

impl WeakDocument {
    pub fn upgrade(&self) -> Option<Document> {
        self.inner.upgrade().map(|inner| Document { inner })
    }
}

impl Document {
    /// Create an empty, valid document: `<html><head></head><body></body></html>`
    pub(crate) fn create(platform: Rc<Platform>, font_registry: bool) -> Self {
        let mut arena = NodeArena::default();
        let root = arena.insert(NodeKind::Element(ElementData::new("html")));
        let head = arena.insert(NodeKind::Element(ElementData::new("head")));
        let body = arena.insert(NodeKind::Element(ElementData::new("body")));
        for child in [head, body] {
            // Fresh element nodes under a fresh root; nothing to reject.
            let _ = arena.append_child(root, child);
        }

        Self {
            inner: Rc::new(RefCell::new(DocumentData {
                arena,
                root,
                head,
                body,
                fonts: font_registry.then(FontFaceSet::new),
                frames: HashMap::new(),
                listeners: HashMap::new(),
                platform,
            })),
        }
    }

    pub(crate) fn data(&self) -> Ref<'_, DocumentData> {
        self.inner.borrow()
    }

    pub(crate) fn data_mut(&self) -> RefMut<'_, DocumentData> {
        self.inner.borrow_mut()
    }

    pub(crate) fn downgrade(&self) -> WeakDocument {
        WeakDocument {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn handle(&self, id: NodeId) -> Element {
        Element::from_parts(self.clone(), id)
    }

    /// The `<html>` element
    pub fn document_element(&self) -> Element {
        let root = self.data().root;
        self.handle(root)
    }

    pub fn head(&self) -> Element {
        let head = self.data().head;
        self.handle(head)
    }

    pub fn body(&self) -> Element {
        let body = self.data().body;
        self.handle(body)
    }

    /// Create a detached element owned by this document
    pub fn create_element(&self, tag: &str) -> Element {
        let id = self
            .data_mut()
            .arena
            .insert(NodeKind::Element(ElementData::new(tag)));
        self.handle(id)
    }

    /// First connected element whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        let found = {
            let data = self.data();
            data.arena.subtree(data.root).into_iter().find(|node| {
                data.arena
                    .element(*node)
                    .and_then(|element| element.attributes.get("id"))
                    .is_some_and(|value| value == id)
            })
        };
        found.map(|node| self.handle(node))
    }

    /// Connected elements with the given tag name, in document order
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<Element> {
        let root = self.data().root;
        self.collect_by_tag(root, tag)
    }

    pub(crate) fn collect_by_tag(&self, root: NodeId, tag: &str) -> Vec<Element> {
        let tag = tag.to_ascii_lowercase();
        let ids: Vec<NodeId> = {
            let data = self.data();
            data.arena
                .subtree(root)
                .into_iter()
                .filter(|node| {
                    data.arena
                        .element(*node)
                        .is_some_and(|element| element.tag == tag)
                })
                .collect()
        };
        ids.into_iter().map(|id| self.handle(id)).collect()
    }

    /// Text of the first `<title>` in the head, with whitespace collapsed
    pub fn title(&self) -> String {
        let head = self.data().head;
        self.collect_by_tag(head, "title")
            .first()
            .map(|title| {
                title
                    .text_content()
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default()
    }

    /// Replace the text of the head `<title>`, creating it when missing
    pub fn set_title(&self, title: &str) {
        let head = self.head();
        let element = match head.elements_by_tag_name("title").into_iter().next() {
            Some(existing) => existing,
            None => {
                let created = self.create_element("title");
                // Head is an element of this document; append cannot fail.
                let _ = head.append_child(&created);
                created
            }
        };
        // Text always fits under a live element of this document.
        let _ = element.set_text_content(title);
    }

    /// Font registry of this document, if the environment exposes one
    pub fn fonts(&self) -> Option<FontFaceSet> {
        self.data().fonts.clone()
    }

    /// Copy `node` (from any document) into a new detached node owned by this one
    pub fn import_node(&self, node: &Element, deep: bool) -> Result<Element> {
        let snapshot = node
            .owner_document()
            .data()
            .arena
            .snapshot(node.node_id(), deep)?;
        let id = self.data_mut().arena.instantiate(&snapshot);
        Ok(self.handle(id))
    }

    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Give every `<iframe>` under `root` a browsing context
    pub(crate) fn connect_frames(&self, root: NodeId) {
        let mut data = self.data_mut();
        let pending: Vec<NodeId> = data
            .arena
            .subtree(root)
            .into_iter()
            .filter(|node| {
                data.arena
                    .element(*node)
                    .is_some_and(|element| element.tag == "iframe")
                    && !data.frames.contains_key(node)
            })
            .collect();
        let font_registry = data.fonts.is_some();
        for id in pending {
            let window = Window::nested(data.platform.clone(), font_registry);
            data.frames.insert(id, window);
        }
    }

    /// Discard browsing contexts of `<iframe>` elements under `root`
    pub(crate) fn disconnect_frames(&self, root: NodeId) {
        let mut data = self.data_mut();
        for id in data.arena.subtree(root) {
            data.frames.remove(&id);
        }
    }

    /// Release per-node resources of nodes dropped from the arena
    pub(crate) fn release_nodes(&self, ids: &[NodeId]) {
        let mut data = self.data_mut();
        for id in ids {
            data.frames.remove(id);
            data.listeners.remove(id);
        }
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        f.debug_struct("Document")
            .field("root", &data.root)
            .field("nodes", &data.arena.subtree(data.root).len())
            .field("frames", &data.frames.len())
            .finish()
    }
}
