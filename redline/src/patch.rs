//! Patch collections as handed in by the tree differ, and their flattening.
//!
//! A differ reports changes keyed by node position. Each key holds either a
//! single patch or an ordered list of patches that apply at the same slot (an
//! attribute change followed by an insertion, say). [`flatten`] normalizes
//! that shape into one ordered sequence right at the boundary; nothing past it
//! needs to care which form a key had.

use std::collections::{BTreeMap, HashSet};
use std::hash::BuildHasherDefault;

use indextree::NodeId;
use rapidhash::RapidHasher;

use crate::props::Properties;

/// Set of node handles, used for "is this node also being patched".
pub type TargetSet = HashSet<NodeId, BuildHasherDefault<RapidHasher>>;

/// One required change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// The original node this patch applies to (for inserts: the parent)
    pub target: NodeId,
    /// What to do, with its payload
    pub kind: PatchKind,
}

/// Patch kinds and their payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchKind {
    /// Replace the target with another node
    ReplaceNode(NodeId),
    /// Replace a text node with new text (or, if the payload is an element,
    /// with that element)
    ReplaceText(NodeId),
    /// Change the target's properties by this delta
    Props(Properties),
    /// Add a new node under the target
    Insert(NodeId),
    /// Remove the target
    Remove,
}

impl PatchKind {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            PatchKind::ReplaceNode(_) => "node-replace",
            PatchKind::ReplaceText(_) => "text-replace",
            PatchKind::Props(_) => "properties-change",
            PatchKind::Insert(_) => "insert",
            PatchKind::Remove => "remove",
        }
    }
}

impl Patch {
    pub fn replace_node(target: NodeId, with: NodeId) -> Self {
        Patch {
            target,
            kind: PatchKind::ReplaceNode(with),
        }
    }

    pub fn replace_text(target: NodeId, with: NodeId) -> Self {
        Patch {
            target,
            kind: PatchKind::ReplaceText(with),
        }
    }

    pub fn props(target: NodeId, delta: Properties) -> Self {
        Patch {
            target,
            kind: PatchKind::Props(delta),
        }
    }

    pub fn insert(parent: NodeId, node: NodeId) -> Self {
        Patch {
            target: parent,
            kind: PatchKind::Insert(node),
        }
    }

    pub fn remove(target: NodeId) -> Self {
        Patch {
            target,
            kind: PatchKind::Remove,
        }
    }
}

/// The value stored under one key of a [`PatchSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchEntry {
    One(Patch),
    /// Co-located patches, applied in list order
    Many(Vec<Patch>),
}

impl PatchEntry {
    /// Iterate the patches of this entry in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Patch> {
        match self {
            PatchEntry::One(patch) => std::slice::from_ref(patch).iter(),
            PatchEntry::Many(patches) => patches.iter(),
        }
    }
}

impl From<Patch> for PatchEntry {
    fn from(patch: Patch) -> Self {
        PatchEntry::One(patch)
    }
}

impl From<Vec<Patch>> for PatchEntry {
    fn from(patches: Vec<Patch>) -> Self {
        PatchEntry::Many(patches)
    }
}

/// Patches keyed by node position. Keys enumerate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSet {
    pub entries: BTreeMap<usize, PatchEntry>,
}

impl PatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a patch at `key`, after any patch already there.
    pub fn push(&mut self, key: usize, patch: Patch) {
        match self.entries.remove(&key) {
            None => {
                self.entries.insert(key, PatchEntry::One(patch));
            }
            Some(PatchEntry::One(first)) => {
                self.entries.insert(key, PatchEntry::Many(vec![first, patch]));
            }
            Some(PatchEntry::Many(mut patches)) => {
                patches.push(patch);
                self.entries.insert(key, PatchEntry::Many(patches));
            }
        }
    }

    /// Store an entry at `key`, replacing what was there.
    pub fn insert(&mut self, key: usize, entry: impl Into<PatchEntry>) {
        self.entries.insert(key, entry.into());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|entry| entry.iter().len() == 0)
    }

    /// Iterate all patches in flattened order without collecting them.
    pub fn iter(&self) -> impl Iterator<Item = &Patch> {
        self.entries.values().flat_map(PatchEntry::iter)
    }
}

impl FromIterator<(usize, Patch)> for PatchSet {
    fn from_iter<I: IntoIterator<Item = (usize, Patch)>>(iter: I) -> Self {
        let mut set = PatchSet::new();
        for (key, patch) in iter {
            set.push(key, patch);
        }
        set
    }
}

/// Flatten a patch collection into one ordered sequence.
///
/// Keys are visited in ascending order; a list entry contributes its patches
/// in list order. A missing or empty collection yields nothing.
pub fn flatten(patches: Option<&PatchSet>) -> Vec<Patch> {
    patches
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default()
}

/// Every node that is the direct target of some patch in the collection.
pub fn targets(patches: Option<&PatchSet>) -> TargetSet {
    patches
        .map(|set| set.iter().map(|patch| patch.target).collect())
        .unwrap_or_default()
}
