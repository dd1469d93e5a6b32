//! Render tree patches as an annotated before/after document.
//!
//! redline takes a document tree and the patches a virtual-DOM differ computed
//! against it, and turns the tree into a single static view of the change:
//! - **Replaced** and **removed** subtrees are kept and wrapped in marker
//!   elements (`replaced-out`/`replaced-in`, `deleted`)
//! - **Inserted** nodes are tagged with the `inserted` class
//! - **Changed attributes** become an `attribute-replace-out`/`-in` pair,
//!   unless the node has nested changes of its own
//! - **Changed text** is diffed word by word into `text-same`,
//!   `text-removed` and `text-added` runs
//!
//! # Example
//!
//! ```rust
//! use redline::{Document, Patch, PatchSet, render_patches};
//!
//! let mut doc = Document::new("div");
//! let p = doc.append_element(doc.root, "p");
//! let text = doc.append_text(p, "apple cake");
//!
//! let new_text = doc.new_text("apple juice");
//! let mut patches = PatchSet::new();
//! patches.push(0, Patch::replace_text(text, new_text));
//!
//! let report = render_patches(&mut doc, &patches);
//! assert!(report.skipped.is_empty());
//! assert_eq!(
//!     doc.to_html(),
//!     "<div><p><span class=\"text-diff\">\
//!      <span class=\"text-same\">apple </span>\
//!      <span class=\"text-removed\">cake</span>\
//!      <span class=\"text-added\">juice</span>\
//!      </span></p></div>"
//! );
//! ```

#[macro_use]
mod tracing_macros;

pub mod dom;
pub mod locate;
pub mod marker;
pub mod patch;
pub mod props;
pub mod render;
mod serialize;
pub mod subtree;
pub mod text_diff;

pub use indextree::NodeId;

pub use dom::{Document, ElementData, NodeData, NodeKind, Stem};
pub use locate::{Location, locate};
pub use patch::{Patch, PatchEntry, PatchKind, PatchSet, TargetSet, flatten, targets};
pub use props::{
    Attributes, PropMap, PropValue, Properties, has_render_relevant_props, merge_properties,
};
pub use render::{RenderOptions, RenderReport, SkipReason, Skipped, render_patches, render_patches_with};
pub use subtree::has_deeper_changes;
pub use text_diff::{RunKind, TextRun, diff_text};
