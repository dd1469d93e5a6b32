use divan::{Bencher, black_box};
use redline::{Document, Patch, PatchSet, Properties, diff_text, render_patches};

fn main() {
    divan::main();
}

/// A `ul` with `items` list items and one patch per item, cycling through
/// remove, text-replace and a visible properties change.
fn patched_list(items: usize) -> (Document, PatchSet) {
    let mut doc = Document::new("ul");
    let mut patches = PatchSet::new();

    for i in 0..items {
        let li = doc.new_element_with("li", Properties::new().with_class("item"));
        doc.append(doc.root, li);
        let text = doc.append_text(li, format!("item number {i} of the list"));

        let patch = match i % 3 {
            0 => Patch::remove(li),
            1 => {
                let new_text = doc.new_text(format!("entry number {i} in the list"));
                Patch::replace_text(text, new_text)
            }
            _ => Patch::props(li, Properties::new().with_class("item changed")),
        };
        patches.push(i, patch);
    }

    (doc, patches)
}

#[divan::bench(args = [10, 100, 1000])]
fn render(bencher: Bencher, items: usize) {
    bencher
        .with_inputs(|| patched_list(items))
        .bench_local_values(|(mut doc, patches)| {
            let report = render_patches(&mut doc, black_box(&patches));
            black_box((doc, report));
        });
}

const PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog while the cat \
                         watches from the window and the bird sings in the old oak tree";

#[divan::bench]
fn text_diff_paragraph() {
    let changed = PARAGRAPH
        .replace("quick", "slow")
        .replace("old oak", "young birch");
    black_box(diff_text(black_box(PARAGRAPH), black_box(&changed)));
}
