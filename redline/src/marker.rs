//! Marker nodes: synthetic elements that carry a change class.
//!
//! The class names are a stable contract with downstream stylesheets.

use indextree::NodeId;

use crate::dom::{Document, ElementData, NodeData, NodeKind, Stem};
use crate::props::Properties;
use crate::text_diff::RunKind;

/// Original node that a node-replace patch swapped out
pub const REPLACED_OUT: &str = "replaced-out";
/// Replacement node of a node-replace patch
pub const REPLACED_IN: &str = "replaced-in";
/// Node as it was before a properties patch
pub const ATTRIBUTE_REPLACE_OUT: &str = "attribute-replace-out";
/// Node as it is after a properties patch
pub const ATTRIBUTE_REPLACE_IN: &str = "attribute-replace-in";
/// Removed node, kept visible
pub const DELETED: &str = "deleted";
/// Inserted node (a class on the node itself unless it is text)
pub const INSERTED: &str = "inserted";
/// Container of a word-level text diff
pub const TEXT_DIFF: &str = "text-diff";
pub const TEXT_SAME: &str = "text-same";
pub const TEXT_REMOVED: &str = "text-removed";
pub const TEXT_ADDED: &str = "text-added";

/// Class of the marker holding a text diff run.
pub fn run_class(kind: RunKind) -> &'static str {
    match kind {
        RunKind::Same => TEXT_SAME,
        RunKind::Removed => TEXT_REMOVED,
        RunKind::Added => TEXT_ADDED,
    }
}

impl Document {
    /// Create a detached, empty marker element.
    pub(crate) fn new_marker(&mut self, tag: &Stem, class: &str) -> NodeId {
        self.arena.new_node(NodeData {
            kind: NodeKind::Element(ElementData {
                tag: tag.clone(),
                props: Properties::new().with_class(class),
            }),
            synthetic: true,
        })
    }

    /// Put a new marker in `node`'s place and move `node` inside it.
    ///
    /// `node` must be attached.
    pub(crate) fn wrap_in_marker(&mut self, node: NodeId, tag: &Stem, class: &str) -> NodeId {
        let marker = self.new_marker(tag, class);
        node.insert_before(marker, &mut self.arena);
        node.detach(&mut self.arena);
        marker.append(node, &mut self.arena);
        marker
    }

    /// Returns true if `id` is a synthetic element whose class list contains
    /// `class`.
    pub fn is_marker(&self, id: NodeId, class: &str) -> bool {
        self.get(id).is_some_and(|data| {
            data.synthetic
                && data
                    .as_element()
                    .is_some_and(|elem| elem.props.classes().any(|c| c == class))
        })
    }
}
