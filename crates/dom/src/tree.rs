//! Arena storage and structural tree operations

use crate::node::{ElementData, NodeData, NodeKind, Snapshot};
use crate::{DomError, NodeId, Result};
use std::collections::HashMap;

/// Flat storage for every node owned by one document
#[derive(Debug, Default)]
pub(crate) struct NodeArena {
    nodes: HashMap<NodeId, NodeData>,
}

impl NodeArena {
    pub fn insert(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, NodeData::new(kind));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(&id)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.nodes.get(&id).and_then(NodeData::element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.nodes.get_mut(&id).and_then(NodeData::element_mut)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Topmost ancestor of `id` (itself when detached)
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self
            .nodes
            .get(&parent)
            .ok_or(DomError::NodeNotFound(parent))?;
        if parent_node.element().is_none() {
            return Err(DomError::HierarchyRequest(
                "text nodes cannot have children".to_string(),
            ));
        }
        if !self.nodes.contains_key(&child) {
            return Err(DomError::NodeNotFound(child));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(
                "the new child is an ancestor of the parent".to_string(),
            ));
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Unlink `id` from its parent, keeping the subtree in the arena
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(&id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|child| *child != id);
        }
    }

    /// Pre-order list of `root` and all of its descendants
    pub fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !self.nodes.contains_key(&id) {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Detach and drop `root` with all of its descendants.
    ///
    /// Returns the dropped ids so owners can release per-node resources.
    pub fn remove_subtree(&mut self, root: NodeId) -> Vec<NodeId> {
        self.detach(root);
        let ids = self.subtree(root);
        for id in &ids {
            self.nodes.remove(id);
        }
        ids
    }

    /// Drop every child subtree of `id`
    pub fn clear_children(&mut self, id: NodeId) -> Vec<NodeId> {
        let children = self.children(id).to_vec();
        children
            .into_iter()
            .flat_map(|child| self.remove_subtree(child))
            .collect()
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.subtree(id)
            .into_iter()
            .filter_map(|node| match &self.nodes.get(&node)?.kind {
                NodeKind::Text(text) => Some(text.as_str()),
                NodeKind::Element(_) => None,
            })
            .collect()
    }

    pub fn snapshot(&self, id: NodeId, deep: bool) -> Result<Snapshot> {
        let node = self.nodes.get(&id).ok_or(DomError::NodeNotFound(id))?;
        let children = if deep {
            node.children
                .iter()
                .map(|child| self.snapshot(*child, true))
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };
        Ok(Snapshot {
            kind: node.kind.clone(),
            children,
        })
    }

    /// Materialise a snapshot as a new detached subtree
    pub fn instantiate(&mut self, snapshot: &Snapshot) -> NodeId {
        let id = self.insert(snapshot.kind.clone());
        for child in &snapshot.children {
            let child_id = self.instantiate(child);
            if let Some(node) = self.nodes.get_mut(&child_id) {
                node.parent = Some(id);
            }
            if let Some(node) = self.nodes.get_mut(&id) {
                node.children.push(child_id);
            }
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(arena: &mut NodeArena, tag: &str) -> NodeId {
        arena.insert(NodeKind::Element(ElementData::new(tag)))
    }

    #[test]
    fn test_append_moves_child_between_parents() {
        let mut arena = NodeArena::default();
        let a = element(&mut arena, "div");
        let b = element(&mut arena, "div");
        let child = element(&mut arena, "span");

        arena.append_child(a, child).unwrap();
        arena.append_child(b, child).unwrap();

        assert!(arena.children(a).is_empty());
        assert_eq!(arena.children(b), &[child]);
        assert_eq!(arena.parent(child), Some(b));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut arena = NodeArena::default();
        let outer = element(&mut arena, "div");
        let inner = element(&mut arena, "div");
        arena.append_child(outer, inner).unwrap();

        let err = arena.append_child(inner, outer).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
        let err = arena.append_child(outer, outer).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
    }

    #[test]
    fn test_text_nodes_cannot_have_children() {
        let mut arena = NodeArena::default();
        let text = arena.insert(NodeKind::Text("hi".to_string()));
        let div = element(&mut arena, "div");
        assert!(arena.append_child(text, div).is_err());
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_structure() {
        let mut arena = NodeArena::default();
        let root = element(&mut arena, "section");
        let p = element(&mut arena, "p");
        let text = arena.insert(NodeKind::Text("hello".to_string()));
        arena.append_child(root, p).unwrap();
        arena.append_child(p, text).unwrap();

        let snapshot = arena.snapshot(root, true).unwrap();
        let copy = arena.instantiate(&snapshot);

        assert_ne!(copy, root);
        assert_eq!(arena.subtree(copy).len(), 3);
        assert_eq!(arena.text_content(copy), "hello");
        assert_eq!(arena.parent(copy), None);
    }

    #[test]
    fn test_shallow_snapshot_has_no_children() {
        let mut arena = NodeArena::default();
        let root = element(&mut arena, "ul");
        let li = element(&mut arena, "li");
        arena.append_child(root, li).unwrap();

        let snapshot = arena.snapshot(root, false).unwrap();
        assert!(snapshot.children.is_empty());
    }

    #[test]
    fn test_clear_children_drops_descendants() {
        let mut arena = NodeArena::default();
        let root = element(&mut arena, "body");
        let div = element(&mut arena, "div");
        let span = element(&mut arena, "span");
        arena.append_child(root, div).unwrap();
        arena.append_child(div, span).unwrap();

        let removed = arena.clear_children(root);
        assert_eq!(removed.len(), 2);
        assert!(arena.get(span).is_none());
        assert!(arena.children(root).is_empty());
    }
}
