//! Word-level text diff rendered as same/removed/added runs.
//!
//! Text is split into words, each word carrying the whitespace that follows
//! it (leading whitespace becomes a token with an empty word). Words are
//! aligned with a longest-common-subsequence pass; whitespace never anchors a
//! match on its own. Runs of the same kind are coalesced, and inside each gap
//! between common words the removed text comes before the added text.

use facet::Facet;
use similar::{Algorithm, DiffTag};
use smallvec::SmallVec;

/// Classification of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Facet)]
#[repr(u8)]
pub enum RunKind {
    /// Present in both texts
    Same,
    /// Only in the old text
    Removed,
    /// Only in the new text
    Added,
}

/// A maximal stretch of text with one classification.
#[derive(Debug, Clone, PartialEq, Eq, Facet)]
pub struct TextRun {
    pub kind: RunKind,
    pub text: String,
}

impl TextRun {
    pub fn new(kind: RunKind, text: impl Into<String>) -> Self {
        TextRun {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    word: &'a str,
    space: &'a str,
}

type Tokens<'a> = SmallVec<[Token<'a>; 32]>;

fn tokenize(text: &str) -> Tokens<'_> {
    let mut tokens = Tokens::new();
    let trimmed = text.trim_start();
    let (lead, mut rest) = text.split_at(text.len() - trimmed.len());
    if !lead.is_empty() {
        tokens.push(Token {
            word: "",
            space: lead,
        });
    }

    while !rest.is_empty() {
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (word, after) = rest.split_at(word_end);
        let space_end = after.len() - after.trim_start().len();
        let (space, next) = after.split_at(space_end);
        tokens.push(Token { word, space });
        rest = next;
    }

    tokens
}

/// Accumulates runs, holding back removed/added text until the next common
/// word so removals always come first.
#[derive(Default)]
struct RunBuilder {
    runs: Vec<TextRun>,
    removed: String,
    added: String,
}

impl RunBuilder {
    fn same(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.flush();
        self.push(RunKind::Same, text);
    }

    fn removed(&mut self, token: &Token<'_>) {
        self.removed.push_str(token.word);
        self.removed.push_str(token.space);
    }

    fn added(&mut self, token: &Token<'_>) {
        self.added.push_str(token.word);
        self.added.push_str(token.space);
    }

    fn flush(&mut self) {
        let removed = std::mem::take(&mut self.removed);
        let added = std::mem::take(&mut self.added);
        if !removed.is_empty() {
            self.push(RunKind::Removed, &removed);
        }
        if !added.is_empty() {
            self.push(RunKind::Added, &added);
        }
    }

    fn push(&mut self, kind: RunKind, text: &str) {
        match self.runs.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => self.runs.push(TextRun::new(kind, text)),
        }
    }

    fn finish(mut self) -> Vec<TextRun> {
        self.flush();
        self.runs
    }
}

/// Diff two texts word by word.
///
/// Concatenating the `Same` and `Removed` runs gives back `old`; concatenating
/// the `Same` and `Added` runs gives back `new`. Identical texts produce a
/// single `Same` run (none at all if both are empty), fully disjoint texts one
/// `Removed` run followed by one `Added` run.
pub fn diff_text(old: &str, new: &str) -> Vec<TextRun> {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);
    let old_words: SmallVec<[&str; 32]> = old_tokens.iter().map(|t| t.word).collect();
    let new_words: SmallVec<[&str; 32]> = new_tokens.iter().map(|t| t.word).collect();

    let ops = similar::capture_diff_slices(Algorithm::Lcs, &old_words[..], &new_words[..]);
    trace!(
        old_words = old_words.len(),
        new_words = new_words.len(),
        ops = ops.len(),
        "aligned words"
    );

    let mut builder = RunBuilder::default();
    for op in ops {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        let old_slice = &old_tokens[old_range];
        let new_slice = &new_tokens[new_range];
        match tag {
            DiffTag::Equal => {
                for (o, n) in old_slice.iter().zip(new_slice) {
                    builder.same(o.word);
                    if o.space == n.space {
                        builder.same(o.space);
                    } else {
                        builder.removed(&Token {
                            word: "",
                            space: o.space,
                        });
                        builder.added(&Token {
                            word: "",
                            space: n.space,
                        });
                    }
                }
            }
            DiffTag::Delete => old_slice.iter().for_each(|t| builder.removed(t)),
            DiffTag::Insert => new_slice.iter().for_each(|t| builder.added(t)),
            DiffTag::Replace => {
                old_slice.iter().for_each(|t| builder.removed(t));
                new_slice.iter().for_each(|t| builder.added(t));
            }
        }
    }

    builder.finish()
}
