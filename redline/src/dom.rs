//! Arena-based element/text tree.
//!
//! All nodes of a document live in one indextree [`Arena`]. A node's identity
//! is its [`NodeId`]: two handles are the same node iff they compare equal,
//! which is what patch targets rely on. Payload nodes handed in by the patch
//! producer are created detached in the same arena, so the renderer can move
//! them into place without copying.

use compact_str::CompactString;
use indextree::{Arena, NodeId};

use crate::props::Properties;

/// String type used for tags, text content and property values.
pub type Stem = CompactString;

/// A tree document. Owns every node, attached or not.
#[derive(Debug, Clone)]
pub struct Document {
    /// THE tree - all nodes live here
    pub arena: Arena<NodeData>,

    /// Root element
    pub root: NodeId,
}

/// What goes in each arena slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: NodeKind,
    /// Created by the renderer (marker or copy) rather than by the producer
    pub synthetic: bool,
}

/// Node types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with tag and properties
    Element(ElementData),
    /// Text content
    Text(Stem),
    /// Comment; neither a valid patch target nor a valid payload
    Comment(Stem),
}

/// Element data (tag + properties)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementData {
    pub tag: Stem,
    pub props: Properties,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            synthetic: false,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.kind {
            NodeKind::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.kind {
            NodeKind::Element(elem) => Some(elem),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(t) => Some(t.as_str()),
            _ => None,
        }
    }
}

impl Document {
    /// Create a document whose root is an empty element with the given tag.
    pub fn new(root_tag: impl Into<Stem>) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::new(NodeKind::Element(ElementData {
            tag: root_tag.into(),
            props: Properties::default(),
        })));
        Document { arena, root }
    }

    /// Whether `id` names a node that exists in this arena (and was not
    /// removed, even if its slot has since been reused).
    pub fn is_live(&self, id: NodeId) -> bool {
        self.arena.get(id).is_some() && !id.is_removed(&self.arena)
    }

    /// Get node data, or `None` for a handle this document doesn't hold.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        if !self.is_live(id) {
            return None;
        }
        self.arena.get(id).map(|node| node.get())
    }

    /// Get mutable node data, or `None` for a handle this document doesn't hold.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        if !self.is_live(id) {
            return None;
        }
        self.arena.get_mut(id).map(|node| node.get_mut())
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id)?.as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id)?.as_element_mut()
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_text()
    }

    /// Parent of a node, if it is attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id)?.parent()
    }

    /// Iterate children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Create a detached element.
    pub fn new_element(&mut self, tag: impl Into<Stem>) -> NodeId {
        self.new_element_with(tag, Properties::default())
    }

    /// Create a detached element with properties.
    pub fn new_element_with(&mut self, tag: impl Into<Stem>, props: Properties) -> NodeId {
        self.arena.new_node(NodeData::new(NodeKind::Element(ElementData {
            tag: tag.into(),
            props,
        })))
    }

    /// Create a detached text node.
    pub fn new_text(&mut self, text: impl Into<Stem>) -> NodeId {
        self.arena.new_node(NodeData::new(NodeKind::Text(text.into())))
    }

    /// Create a detached comment node.
    pub fn new_comment(&mut self, text: impl Into<Stem>) -> NodeId {
        self.arena
            .new_node(NodeData::new(NodeKind::Comment(text.into())))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        parent.append(child, &mut self.arena);
    }

    /// Create an element and append it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: impl Into<Stem>) -> NodeId {
        let id = self.new_element(tag);
        self.append(parent, id);
        id
    }

    /// Create a text node and append it under `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<Stem>) -> NodeId {
        let id = self.new_text(text);
        self.append(parent, id);
        id
    }

    /// Create a detached text node owned by the renderer.
    pub(crate) fn new_synthetic_text(&mut self, text: impl Into<Stem>) -> NodeId {
        self.arena.new_node(NodeData {
            kind: NodeKind::Text(text.into()),
            synthetic: true,
        })
    }

    /// Deep-merge `from` into the properties of element `into`.
    ///
    /// Returns `false` if `into` is not a live element.
    pub fn merge_properties(&mut self, from: &Properties, into: NodeId) -> bool {
        crate::props::merge_properties(
            Some(from),
            self.element_mut(into).map(|elem| &mut elem.props),
        )
    }

    /// Copy the subtree rooted at `id` into fresh, detached nodes.
    ///
    /// The copies are marked synthetic. Returns `None` for a dead handle.
    pub fn deep_clone(&mut self, id: NodeId) -> Option<NodeId> {
        let mut data = self.get(id)?.clone();
        data.synthetic = true;
        let copy = self.arena.new_node(data);

        let children: Vec<NodeId> = id.children(&self.arena).collect();
        for child in children {
            if let Some(child_copy) = self.deep_clone(child) {
                copy.append(child_copy, &mut self.arena);
            }
        }

        Some(copy)
    }
}
