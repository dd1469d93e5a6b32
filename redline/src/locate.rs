//! Finding a node's slot inside a tree.

use indextree::NodeId;

use crate::dom::{Document, NodeKind};

/// Where a node sits: the `index`-th child of `parent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub parent: NodeId,
    pub index: usize,
}

/// Locate `target` among the descendants of `root`.
///
/// The search is depth-first, pre-order, left to right, and `root` itself is
/// never a match. Returns `None` when either handle is dead, when `root` has no
/// children to search (text or comment), when `target` is neither an element
/// nor a text node, or when `target` is not in the subtree.
pub fn locate(doc: &Document, target: NodeId, root: NodeId) -> Option<Location> {
    let root_data = doc.get(root)?;
    if !root_data.is_element() {
        return None;
    }
    match doc.get(target)?.kind {
        NodeKind::Element(_) | NodeKind::Text(_) => {}
        NodeKind::Comment(_) => return None,
    }

    let found = find_under(doc, target, root)?;
    trace!(?target, parent = ?found.parent, index = found.index, "located node");
    Some(found)
}

/// Pre-order walk below `parent`, keeping each child's index as it goes.
fn find_under(doc: &Document, target: NodeId, parent: NodeId) -> Option<Location> {
    for (index, child) in doc.children(parent).enumerate() {
        if child == target {
            return Some(Location { parent, index });
        }
        if let Some(found) = find_under(doc, target, child) {
            return Some(found);
        }
    }
    None
}

impl Document {
    /// Locate `target` anywhere under the document root.
    pub fn locate(&self, target: NodeId) -> Option<Location> {
        locate(self, target, self.root)
    }

    /// The node at a location, if the location is still valid.
    pub fn node_at(&self, location: Location) -> Option<NodeId> {
        self.children(location.parent).nth(location.index)
    }
}
