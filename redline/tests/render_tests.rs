//! End-to-end rendering of patch sets.

use facet_testhelpers::test;
use redline::marker;
use redline::{Document, Patch, PatchSet, Properties, render_patches};

#[test]
fn test_node_replace_wraps_both_sides() {
    let mut doc = Document::new("div");
    let p = doc.append_element(doc.root, "p");
    doc.append_text(p, "hi");
    let replacement = doc.new_element("p");
    doc.append_text(replacement, "bye");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::replace_node(p, replacement));
    let report = render_patches(&mut doc, &patches);

    assert_eq!(report.applied, 1);
    let children: Vec<_> = doc.children(doc.root).collect();
    assert_eq!(children.len(), 2);
    assert!(doc.is_marker(children[0], marker::REPLACED_OUT));
    assert!(doc.is_marker(children[1], marker::REPLACED_IN));
    assert_eq!(doc.children(children[0]).collect::<Vec<_>>(), [p]);
    assert_eq!(doc.children(children[1]).collect::<Vec<_>>(), [replacement]);
    assert_eq!(
        doc.to_html(),
        "<div><span class=\"replaced-out\"><p>hi</p></span>\
         <span class=\"replaced-in\"><p>bye</p></span></div>"
    );
}

#[test]
fn test_remove_keeps_content_visible() {
    let mut doc = Document::new("div");
    let text = doc.append_text(doc.root, "delete me");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::remove(text));
    render_patches(&mut doc, &patches);

    let wrapper = doc.parent(text).unwrap();
    assert!(doc.is_marker(wrapper, marker::DELETED));
    assert_eq!(doc.parent(wrapper), Some(doc.root));
    assert_eq!(doc.text(text), Some("delete me"));
    assert_eq!(
        doc.to_html(),
        "<div><span class=\"deleted\">delete me</span></div>"
    );
}

#[test]
fn test_text_replace_renders_word_runs() {
    let mut doc = Document::new("p");
    let text = doc.append_text(doc.root, "the old house");
    let new_text = doc.new_text("the new house");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::replace_text(text, new_text));
    render_patches(&mut doc, &patches);

    assert_eq!(
        doc.to_html(),
        "<p><span class=\"text-diff\">\
         <span class=\"text-same\">the </span>\
         <span class=\"text-removed\">old </span>\
         <span class=\"text-added\">new </span>\
         <span class=\"text-same\">house</span>\
         </span></p>"
    );
    assert!(doc.parent(text).is_none(), "old text node is detached");
}

#[test]
fn test_text_replace_with_element_falls_back_to_node_replace() {
    let mut doc = Document::new("div");
    let text = doc.append_text(doc.root, "old");
    let em = doc.new_element("em");
    doc.append_text(em, "new");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::replace_text(text, em));
    let report = render_patches(&mut doc, &patches);

    assert!(report.skipped.is_empty());
    assert_eq!(
        doc.to_html(),
        "<div><span class=\"replaced-out\">old</span>\
         <span class=\"replaced-in\"><em>new</em></span></div>"
    );
}

#[test]
fn test_visible_prop_change_gets_before_and_after() {
    let mut doc = Document::new("div");
    let img = doc.new_element_with("img", Properties::new().with_src("a.png"));
    doc.append(doc.root, img);

    let mut patches = PatchSet::new();
    patches.push(0, Patch::props(img, Properties::new().with_src("b.png")));
    render_patches(&mut doc, &patches);

    assert_eq!(
        doc.to_html(),
        "<div><span class=\"attribute-replace-out\"><img src=\"a.png\"></span>\
         <span class=\"attribute-replace-in\"><img src=\"b.png\"></span></div>"
    );
    assert_eq!(
        doc.element(img).unwrap().props.src.as_deref(),
        Some("a.png"),
        "the original node keeps the old properties"
    );
}

#[test]
fn test_prop_change_with_nested_change_merges_in_place() {
    let mut doc = Document::new("div");
    let section = doc.new_element_with("section", Properties::new().with_class("old"));
    doc.append(doc.root, section);
    let p = doc.append_element(section, "p");
    let text = doc.append_text(p, "x");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::props(section, Properties::new().with_class("new")));
    patches.push(1, Patch::remove(text));
    let report = render_patches(&mut doc, &patches);

    assert_eq!(report.applied, 2);
    assert_eq!(
        doc.to_html(),
        "<div><section class=\"new\"><p><span class=\"deleted\">x</span></p></section></div>"
    );
}

#[test]
fn test_invisible_prop_change_merges_silently() {
    let mut doc = Document::new("form");
    let input = doc.new_element_with("input", Properties::new().with_value("a"));
    doc.append(doc.root, input);

    let mut patches = PatchSet::new();
    patches.push(0, Patch::props(input, Properties::new().with_value("b")));
    render_patches(&mut doc, &patches);

    assert_eq!(doc.to_html(), "<form><input value=\"b\"></form>");
}

#[test]
fn test_colocated_remove_then_insert() {
    let mut doc = Document::new("ul");
    let old = doc.append_element(doc.root, "li");
    doc.append_text(old, "one");
    let new = doc.new_element("li");
    doc.append_text(new, "two");

    let mut patches = PatchSet::new();
    patches.insert(0, vec![Patch::remove(old), Patch::insert(doc.root, new)]);
    render_patches(&mut doc, &patches);

    assert_eq!(
        doc.to_html(),
        "<ul><span class=\"deleted\"><li>one</li></span><li class=\"inserted\">two</li></ul>"
    );
}

#[test]
fn test_colocated_prop_change_then_insert_merges_in_place() {
    let mut doc = Document::new("div");
    let ul = doc.new_element_with("ul", Properties::new().with_class("old"));
    doc.append(doc.root, ul);
    doc.append_element(ul, "li");
    let new_li = doc.new_element("li");

    let mut patches = PatchSet::new();
    patches.insert(
        0,
        vec![
            Patch::props(ul, Properties::new().with_class("new")),
            Patch::insert(ul, new_li),
        ],
    );
    let report = render_patches(&mut doc, &patches);

    assert_eq!(report.applied, 2);
    assert_eq!(doc.parent(new_li), Some(ul));
    assert_eq!(
        doc.to_html(),
        "<div><ul class=\"new\"><li></li><li class=\"inserted\"></li></ul></div>"
    );
}

#[test]
fn test_text_replace_on_element_falls_back_to_node_replace() {
    let mut doc = Document::new("div");
    let p = doc.append_element(doc.root, "p");
    doc.append_text(p, "x");
    let new_text = doc.new_text("y");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::replace_text(p, new_text));
    let report = render_patches(&mut doc, &patches);

    assert!(report.skipped.is_empty());
    assert_eq!(
        doc.to_html(),
        "<div><span class=\"replaced-out\"><p>x</p></span>\
         <span class=\"replaced-in\">y</span></div>"
    );
}

#[test]
fn test_insert_of_attached_node_tags_it_in_place() {
    let mut doc = Document::new("ul");
    let first = doc.append_element(doc.root, "li");
    doc.append_text(first, "a");
    let second = doc.append_element(doc.root, "li");
    doc.append_text(second, "b");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::insert(doc.root, first));
    let report = render_patches(&mut doc, &patches);

    assert_eq!(report.applied, 1);
    assert_eq!(doc.children(doc.root).collect::<Vec<_>>(), [first, second]);
    assert_eq!(
        doc.to_html(),
        "<ul><li class=\"inserted\">a</li><li>b</li></ul>"
    );
}

#[test]
fn test_insert_text_is_boxed() {
    let mut doc = Document::new("p");
    doc.append_text(doc.root, "a");
    let added = doc.new_text("b");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::insert(doc.root, added));
    render_patches(&mut doc, &patches);

    assert_eq!(
        doc.to_html(),
        "<p>a<span class=\"inserted\">b</span></p>"
    );
}

#[test]
fn test_insert_keeps_existing_classes() {
    let mut doc = Document::new("div");
    let section = doc.append_element(doc.root, "section");
    let note = doc.new_element_with("aside", Properties::new().with_class("note"));

    let mut patches = PatchSet::new();
    patches.push(4, Patch::insert(section, note));
    render_patches(&mut doc, &patches);

    assert_eq!(
        doc.to_html(),
        "<div><section><aside class=\"note inserted\"></aside></section></div>"
    );
}

#[test]
fn test_same_target_patches_apply_in_order() {
    let mut doc = Document::new("div");
    let p = doc.append_element(doc.root, "p");
    doc.append_text(p, "x");
    let q = doc.new_element("q");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::remove(p));
    patches.push(0, Patch::replace_node(p, q));
    let report = render_patches(&mut doc, &patches);

    assert_eq!(report.applied, 2);
    assert_eq!(
        doc.to_html(),
        "<div><span class=\"deleted\">\
         <span class=\"replaced-out\"><p>x</p></span>\
         <span class=\"replaced-in\"><q></q></span>\
         </span></div>"
    );
}

#[test]
fn test_unlocatable_targets_are_skipped_and_rest_applies() {
    let mut doc = Document::new("div");
    let kept = doc.append_text(doc.root, "kept");
    let stray = doc.new_element("p");
    let payload = doc.new_element("p");

    let mut patches = PatchSet::new();
    patches.push(0, Patch::replace_node(stray, payload));
    patches.push(1, Patch::remove(kept));
    let report = render_patches(&mut doc, &patches);

    assert_eq!(report.applied, 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 0);
    assert_eq!(report.skipped[0].kind, "node-replace");
    assert_eq!(
        doc.to_html(),
        "<div><span class=\"deleted\">kept</span></div>"
    );
}

#[test]
fn test_empty_patch_set_leaves_tree_alone() {
    let mut doc = Document::new("div");
    doc.append_text(doc.root, "same");
    let before = doc.to_html();

    let report = render_patches(&mut doc, &PatchSet::new());

    assert_eq!(report.applied, 0);
    assert!(report.skipped.is_empty());
    assert_eq!(doc.to_html(), before);
}
