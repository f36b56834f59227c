//! Node storage types

use crate::NodeId;
use std::collections::BTreeMap;

/// Payload of a node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Element(ElementData),
    Text(String),
}

/// Element payload: lowercase tag name, attributes and inline style
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ElementData {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub style: BTreeMap<String, String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl NodeData {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(data) => Some(data),
            NodeKind::Text(_) => None,
        }
    }
}

/// Detached, owned copy of a subtree.
///
/// Cloning goes through a snapshot so that copies within one document and
/// imports between documents share a single code path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Snapshot {
    pub kind: NodeKind,
    pub children: Vec<Snapshot>,
}
