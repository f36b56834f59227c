//! Element handles

use crate::event::{dispatch, Listener, ListenerId};
use crate::node::NodeKind;
use crate::{Document, DomError, NodeId, Result, Window};
use std::fmt;

/// Handle to an element node. Clones refer to the same node.
#[derive(Clone)]
pub struct Element {
    document: Document,
    id: NodeId,
}

impl Element {
    pub(crate) fn from_parts(document: Document, id: NodeId) -> Self {
        Self { document, id }
    }

    pub fn node_id(&self) -> NodeId {
        self.id
    }

    pub fn owner_document(&self) -> Document {
        self.document.clone()
    }

    /// Lowercase tag name; empty once the node has been dropped
    pub fn tag_name(&self) -> String {
        self.document
            .data()
            .arena
            .element(self.id)
            .map(|element| element.tag.clone())
            .unwrap_or_default()
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.document
            .data()
            .arena
            .element(self.id)
            .and_then(|element| element.attributes.get(&name.to_ascii_lowercase()).cloned())
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        if let Some(element) = self.document.data_mut().arena.element_mut(self.id) {
            element
                .attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    pub fn remove_attribute(&self, name: &str) -> bool {
        self.document
            .data_mut()
            .arena
            .element_mut(self.id)
            .and_then(|element| element.attributes.remove(&name.to_ascii_lowercase()))
            .is_some()
    }

    /// Value of the `id` attribute
    pub fn id(&self) -> Option<String> {
        self.get_attribute("id")
    }

    pub fn set_id(&self, id: &str) {
        self.set_attribute("id", id);
    }

    /// Inline style property value
    pub fn style_property(&self, name: &str) -> Option<String> {
        self.document
            .data()
            .arena
            .element(self.id)
            .and_then(|element| element.style.get(name).cloned())
    }

    pub fn set_style_property(&self, name: &str, value: &str) {
        if let Some(element) = self.document.data_mut().arena.element_mut(self.id) {
            element.style.insert(name.to_string(), value.to_string());
        }
    }

    /// Append a text node child
    pub fn append_text(&self, text: &str) -> Result<()> {
        let mut data = self.document.data_mut();
        let text_id = data.arena.insert(NodeKind::Text(text.to_string()));
        if let Err(err) = data.arena.append_child(self.id, text_id) {
            data.arena.remove_subtree(text_id);
            return Err(err);
        }
        Ok(())
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        self.document.data().arena.text_content(self.id)
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&self, text: &str) -> Result<()> {
        self.clear_children();
        if text.is_empty() {
            return Ok(());
        }
        self.append_text(text)
    }

    /// Append `child`, moving it out of its current parent.
    ///
    /// Both nodes must belong to the same document; use
    /// [`Document::import_node`] to bring nodes over from another one.
    pub fn append_child(&self, child: &Element) -> Result<()> {
        if !self.document.ptr_eq(&child.document) {
            return Err(DomError::HierarchyRequest(
                "node belongs to another document".to_string(),
            ));
        }
        let was_connected = child.is_connected();
        self.document
            .data_mut()
            .arena
            .append_child(self.id, child.id)?;
        match (was_connected, child.is_connected()) {
            (false, true) => self.document.connect_frames(child.id),
            (true, false) => self.document.disconnect_frames(child.id),
            _ => {}
        }
        Ok(())
    }

    /// Detach this element from its parent. The handle stays usable.
    pub fn remove(&self) {
        let was_connected = self.is_connected();
        self.document.data_mut().arena.detach(self.id);
        if was_connected {
            self.document.disconnect_frames(self.id);
        }
    }

    /// Drop every child subtree (`innerHTML = ""`)
    pub fn clear_children(&self) {
        let removed = self.document.data_mut().arena.clear_children(self.id);
        self.document.release_nodes(&removed);
    }

    /// Element children in order
    pub fn children(&self) -> Vec<Element> {
        let ids: Vec<NodeId> = {
            let data = self.document.data();
            data.arena
                .children(self.id)
                .iter()
                .copied()
                .filter(|child| data.arena.element(*child).is_some())
                .collect()
        };
        ids.into_iter()
            .map(|id| Element::from_parts(self.document.clone(), id))
            .collect()
    }

    pub fn child_element_count(&self) -> usize {
        self.children().len()
    }

    pub fn parent_element(&self) -> Option<Element> {
        let parent = self.document.data().arena.parent(self.id)?;
        Some(Element::from_parts(self.document.clone(), parent))
    }

    /// Descendant elements (excluding this one) with the given tag name
    pub fn elements_by_tag_name(&self, tag: &str) -> Vec<Element> {
        self.document
            .collect_by_tag(self.id, tag)
            .into_iter()
            .filter(|element| element.id != self.id)
            .collect()
    }

    /// Whether this element is reachable from its document's root
    pub fn is_connected(&self) -> bool {
        let data = self.document.data();
        data.arena.get(self.id).is_some() && data.arena.root_of(self.id) == data.root
    }

    /// Copy this element into a new detached node of the same document
    pub fn clone_node(&self, deep: bool) -> Result<Element> {
        self.document.import_node(self, deep)
    }

    /// Nested browsing context of a connected `<iframe>`
    pub fn content_window(&self) -> Option<Window> {
        self.document.data().frames.get(&self.id).cloned()
    }

    pub fn content_document(&self) -> Option<Document> {
        self.content_window().map(|window| window.document())
    }

    pub fn add_event_listener(&self, event: &str, listener: Listener) -> ListenerId {
        self.document
            .data_mut()
            .listeners
            .entry(self.id)
            .or_default()
            .add(event, listener)
    }

    pub fn remove_event_listener(&self, event: &str, id: ListenerId) -> bool {
        self.document
            .data_mut()
            .listeners
            .get_mut(&self.id)
            .is_some_and(|registry| registry.remove(event, id))
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.document
            .data()
            .listeners
            .get(&self.id)
            .map_or(0, |registry| registry.count(event))
    }

    /// Dispatch `event` to this element's listeners
    pub fn dispatch_event(&self, event: &str) -> bool {
        let listeners = self
            .document
            .data()
            .listeners
            .get(&self.id)
            .map(|registry| registry.listeners_for(event))
            .unwrap_or_default();
        dispatch(event, listeners)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.document.ptr_eq(&other.document)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag_name())
            .field("id", &self.id())
            .field("node", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{DomError, Window};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_iframe_gets_context_only_while_connected() {
        let window = Window::new();
        let document = window.document();
        let frame = document.create_element("iframe");
        assert!(frame.content_document().is_none());

        document.body().append_child(&frame).unwrap();
        let inner = frame.content_document().unwrap();
        assert_eq!(inner.body().tag_name(), "body");

        frame.remove();
        assert!(frame.content_window().is_none());
        assert!(!frame.is_connected());
    }

    #[test]
    fn test_iframe_inside_detached_wrapper_connects_with_wrapper() {
        let document = Window::new().document();
        let wrapper = document.create_element("div");
        let frame = document.create_element("iframe");
        wrapper.append_child(&frame).unwrap();
        assert!(frame.content_window().is_none());

        document.body().append_child(&wrapper).unwrap();
        assert!(frame.content_window().is_some());
    }

    #[test]
    fn test_append_child_rejects_foreign_nodes() {
        let first = Window::new().document();
        let second = Window::new().document();
        let foreign = second.create_element("p");

        let err = first.body().append_child(&foreign).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
    }

    #[test]
    fn test_clear_children_discards_nested_frames() {
        let document = Window::new().document();
        let frame = document.create_element("iframe");
        document.body().append_child(&frame).unwrap();
        assert!(frame.content_window().is_some());

        document.body().clear_children();
        assert!(frame.content_window().is_none());
        assert_eq!(document.body().child_element_count(), 0);
    }

    #[test]
    fn test_element_listeners_can_be_removed() {
        let document = Window::new().document();
        let button = document.create_element("button");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let id = button.add_event_listener("click", Rc::new(move |_| counter.set(counter.get() + 1)));

        button.dispatch_event("click");
        assert!(button.remove_event_listener("click", id));
        button.dispatch_event("click");

        assert_eq!(hits.get(), 1);
        assert_eq!(button.listener_count("click"), 0);
    }

    #[test]
    fn test_style_and_attributes() {
        let document = Window::new().document();
        let link = document.create_element("LINK");
        link.set_attribute("REL", "stylesheet");
        link.set_style_property("display", "none");

        assert_eq!(link.tag_name(), "link");
        assert_eq!(link.get_attribute("rel").as_deref(), Some("stylesheet"));
        assert_eq!(link.style_property("display").as_deref(), Some("none"));
        assert!(link.remove_attribute("rel"));
        assert!(link.get_attribute("rel").is_none());
    }
}
