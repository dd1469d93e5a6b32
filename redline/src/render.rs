//! Rendering a patch set onto a document as an annotated diff.
//!
//! Each patch of the flattened set is applied in order and mutates the tree in
//! place. Nothing is ever deleted: removed and replaced content is moved under
//! a marker element so both the old and the new state stay visible.
//!
//! | patch             | result                                                        |
//! |-------------------|---------------------------------------------------------------|
//! | node-replace      | `replaced-out` marker around the target, `replaced-in` marker with the payload right after it |
//! | text-replace      | `text-diff` marker with one `text-same`/`text-removed`/`text-added` marker per run, in the target's place |
//! | properties-change | `attribute-replace-out`/`attribute-replace-in` pair, or an in-place merge |
//! | insert            | payload tagged with the `inserted` class                      |
//! | remove            | `deleted` marker around the target                            |
//!
//! Patches that cannot be applied (target gone, payload unusable) are skipped
//! and listed in the [`RenderReport`]; a partially annotated tree is still
//! useful to a reviewer, so rendering never fails as a whole.

use facet::Facet;
use indextree::NodeId;

use crate::dom::{Document, NodeKind, Stem};
use crate::locate::Location;
use crate::marker;
use crate::patch::{Patch, PatchKind, PatchSet, TargetSet, flatten, targets};
use crate::props::{Properties, has_render_relevant_props};
use crate::subtree::has_deeper_changes;
use crate::text_diff::diff_text;

/// Options for rendering.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Tag of synthesized marker elements (default: "span")
    pub marker_tag: Stem,
    /// Whether properties changes that touch nothing visible (no style, src,
    /// href or class) still get a before/after marker pair (default: false,
    /// they are merged silently).
    pub flag_all_prop_changes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            marker_tag: Stem::from("span"),
            flag_all_prop_changes: false,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different tag for marker elements.
    pub fn with_marker_tag(mut self, tag: impl Into<Stem>) -> Self {
        self.marker_tag = tag.into();
        self
    }

    /// Flag every properties change, visible or not.
    pub fn flag_all_prop_changes(mut self) -> Self {
        self.flag_all_prop_changes = true;
        self
    }
}

/// Why a patch was skipped.
#[derive(Facet, Debug, Clone, PartialEq, Eq)]
#[facet(derive(Error))]
#[repr(u8)]
pub enum SkipReason {
    /// target node is not in the tree
    TargetNotFound,

    /// target node is not an element
    TargetNotAnElement,

    /// payload node is missing or is neither an element nor text
    InvalidPayload,

    /// payload node is already part of the tree
    PayloadAttached,
}

/// A patch that was not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    /// Position in the flattened patch sequence
    pub index: usize,
    pub kind: &'static str,
    pub reason: SkipReason,
}

/// What a rendering pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub applied: usize,
    pub skipped: Vec<Skipped>,
}

/// Render `patches` onto `doc` with default options.
///
/// See [`render_patches_with`].
pub fn render_patches(doc: &mut Document, patches: &PatchSet) -> RenderReport {
    render_patches_with(doc, patches, &RenderOptions::default())
}

/// Render `patches` onto `doc`, annotating it in place.
///
/// Patches are applied in flattened order; a node targeted more than once
/// sees the tree as left by the earlier patches.
///
/// Rendering is not idempotent: running it again on an already annotated
/// tree with the same patches is undefined, since the targets now sit inside
/// marker elements. Render each patch set onto a fresh tree exactly once.
pub fn render_patches_with(
    doc: &mut Document,
    patches: &PatchSet,
    options: &RenderOptions,
) -> RenderReport {
    let flat = flatten(Some(patches));
    let insert_parents = flat
        .iter()
        .filter(|patch| matches!(patch.kind, PatchKind::Insert(_)))
        .map(|patch| patch.target)
        .collect();
    let mut renderer = Renderer {
        targets: targets(Some(patches)),
        insert_parents,
        doc,
        options,
    };
    debug!(
        patches = flat.len(),
        targets = renderer.targets.len(),
        "rendering patch set"
    );

    let mut report = RenderReport::default();
    for (index, patch) in flat.iter().enumerate() {
        debug!(index, kind = patch.kind.name(), target = ?patch.target, "applying patch");
        match renderer.apply(patch) {
            Ok(()) => report.applied += 1,
            Err(reason) => {
                debug!(index, kind = patch.kind.name(), %reason, "skipped patch");
                report.skipped.push(Skipped {
                    index,
                    kind: patch.kind.name(),
                    reason,
                });
            }
        }
    }
    report
}

struct Renderer<'a> {
    doc: &'a mut Document,
    options: &'a RenderOptions,
    /// Every patch target of the pass, computed once up front
    targets: TargetSet,
    /// Nodes that receive an insert somewhere in the pass
    insert_parents: TargetSet,
}

impl Renderer<'_> {
    fn apply(&mut self, patch: &Patch) -> Result<(), SkipReason> {
        match &patch.kind {
            PatchKind::ReplaceNode(with) => self.replace_node(patch.target, *with),
            PatchKind::ReplaceText(with) => self.replace_text(patch.target, *with),
            PatchKind::Props(delta) => self.change_props(patch.target, delta),
            PatchKind::Insert(node) => self.insert(patch.target, *node),
            PatchKind::Remove => self.remove(patch.target),
        }
    }

    fn locate(&self, target: NodeId) -> Result<Location, SkipReason> {
        self.doc.locate(target).ok_or(SkipReason::TargetNotFound)
    }

    /// A payload must be a live, detached element or text node.
    fn check_payload(&self, payload: NodeId) -> Result<(), SkipReason> {
        let data = self.doc.get(payload).ok_or(SkipReason::InvalidPayload)?;
        if !(data.is_element() || data.is_text()) {
            return Err(SkipReason::InvalidPayload);
        }
        if payload == self.doc.root || self.doc.parent(payload).is_some() {
            return Err(SkipReason::PayloadAttached);
        }
        Ok(())
    }

    fn wrap(&mut self, node: NodeId, class: &str) -> NodeId {
        self.doc
            .wrap_in_marker(node, &self.options.marker_tag, class)
    }

    /// Put `node` inside a new `class` marker right after `after`.
    fn place_after(&mut self, after: NodeId, node: NodeId, class: &str) {
        let wrapper = self.doc.new_marker(&self.options.marker_tag, class);
        wrapper.append(node, &mut self.doc.arena);
        after.insert_after(wrapper, &mut self.doc.arena);
    }

    fn replace_node(&mut self, target: NodeId, with: NodeId) -> Result<(), SkipReason> {
        self.locate(target)?;
        self.check_payload(with)?;

        let out = self.wrap(target, marker::REPLACED_OUT);
        self.place_after(out, with, marker::REPLACED_IN);
        Ok(())
    }

    fn replace_text(&mut self, target: NodeId, with: NodeId) -> Result<(), SkipReason> {
        self.locate(target)?;
        self.check_payload(with)?;

        let new_text = match self.doc.text(with) {
            Some(text) => Stem::from(text),
            // a text node may be replaced by a whole element subtree
            None => return self.replace_node(target, with),
        };
        let Some(old_text) = self.doc.text(target) else {
            return self.replace_node(target, with);
        };

        let runs = diff_text(old_text, &new_text);
        trace!(runs = runs.len(), "text diff");

        let tag = &self.options.marker_tag;
        let container = self.doc.new_marker(tag, marker::TEXT_DIFF);
        for run in runs {
            let run_marker = self.doc.new_marker(tag, marker::run_class(run.kind));
            let text = self.doc.new_synthetic_text(run.text);
            run_marker.append(text, &mut self.doc.arena);
            container.append(run_marker, &mut self.doc.arena);
        }
        target.insert_before(container, &mut self.doc.arena);
        target.detach(&mut self.doc.arena);
        Ok(())
    }

    fn change_props(&mut self, target: NodeId, delta: &Properties) -> Result<(), SkipReason> {
        self.locate(target)?;
        if self.doc.element(target).is_none() {
            return Err(SkipReason::TargetNotAnElement);
        }

        // an insert under the target is a nested change too
        let deeper = has_deeper_changes(self.doc, target, &self.targets)
            || self.insert_parents.contains(&target);
        let relevant = self.options.flag_all_prop_changes || has_render_relevant_props(Some(delta));
        if deeper || !relevant {
            // keep nested changes visible; irrelevant changes go unflagged
            debug!(deeper, relevant, "merging properties in place");
            self.doc.merge_properties(delta, target);
            return Ok(());
        }

        let after = self
            .doc
            .deep_clone(target)
            .ok_or(SkipReason::TargetNotFound)?;
        self.doc.merge_properties(delta, after);
        let out = self.wrap(target, marker::ATTRIBUTE_REPLACE_OUT);
        self.place_after(out, after, marker::ATTRIBUTE_REPLACE_IN);
        Ok(())
    }

    fn insert(&mut self, parent: NodeId, node: NodeId) -> Result<(), SkipReason> {
        let data = self.doc.get(node).ok_or(SkipReason::InvalidPayload)?;
        let is_text = match data.kind {
            NodeKind::Element(_) => false,
            NodeKind::Text(_) => true,
            NodeKind::Comment(_) => return Err(SkipReason::InvalidPayload),
        };

        let attached = node == self.doc.root || self.doc.parent(node).is_some();
        if !attached {
            if parent != self.doc.root {
                self.locate(parent)?;
            }
            if self.doc.element(parent).is_none() {
                return Err(SkipReason::TargetNotAnElement);
            }
            self.doc.append(parent, node);
        }

        if is_text {
            // text can't carry a class, box it instead
            self.wrap(node, marker::INSERTED);
        } else if let Some(elem) = self.doc.element_mut(node) {
            elem.props.add_class(marker::INSERTED);
        }
        Ok(())
    }

    fn remove(&mut self, target: NodeId) -> Result<(), SkipReason> {
        self.locate(target)?;
        self.wrap(target, marker::DELETED);
        Ok(())
    }
}
