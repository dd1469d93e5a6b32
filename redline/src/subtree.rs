//! Whether a patched node has other patched nodes below it.
//!
//! A properties patch normally collapses its target into a before/after pair
//! of copies. If a descendant is also scheduled for change, the copies would
//! hide that nested change, so the renderer must edit in place instead.

use indextree::NodeId;

use crate::dom::Document;
use crate::patch::TargetSet;

/// Returns true if any descendant of `node` (not `node` itself) is in `targets`.
///
/// Non-elements, dead handles and childless elements have no deeper changes.
pub fn has_deeper_changes(doc: &Document, node: NodeId, targets: &TargetSet) -> bool {
    if doc.element(node).is_none() {
        return false;
    }
    node.descendants(&doc.arena)
        .skip(1)
        .any(|id| targets.contains(&id))
}
