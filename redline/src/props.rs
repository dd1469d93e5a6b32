//! Element properties and the deep merge used when a patch changes them.
//!
//! Properties mirror what a virtual-DOM node carries: a handful of well-known
//! top-level fields, an `attributes` branch holding the HTML attributes, and
//! open extension maps on both levels for everything else. Maps nest
//! arbitrarily deep; merging recurses through every nested map and overwrites
//! scalars.

use indexmap::IndexMap;

use crate::Stem;

/// Insertion-ordered map of nested property values.
pub type PropMap = IndexMap<Stem, PropValue>;

/// Top-level property keys whose change is visible enough to be flagged.
const RENDER_RELEVANT_KEYS: [&str; 3] = ["style", "src", "href"];

/// A property value: either a scalar or a nested map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropValue {
    /// A plain string value
    Scalar(Stem),
    /// A nested map, merged key by key
    Map(PropMap),
}

impl PropValue {
    /// Build a nested map value from `(key, value)` pairs.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<Stem>,
        V: Into<PropValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        PropValue::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns the scalar string, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            PropValue::Scalar(s) => Some(s.as_str()),
            PropValue::Map(_) => None,
        }
    }

    /// Returns the nested map, if this is a map.
    pub fn as_map(&self) -> Option<&PropMap> {
        match self {
            PropValue::Map(m) => Some(m),
            PropValue::Scalar(_) => None,
        }
    }

    /// Merge `from` into `self`: maps merge key by key, anything else is
    /// overwritten.
    pub fn merge_from(&mut self, from: &PropValue) {
        if let (PropValue::Map(into), PropValue::Map(from)) = (&mut *self, from) {
            merge_maps(from, into);
            return;
        }
        *self = from.clone();
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Scalar(Stem::from(s))
    }
}

impl From<Stem> for PropValue {
    fn from(s: Stem) -> Self {
        PropValue::Scalar(s)
    }
}

impl From<PropMap> for PropValue {
    fn from(m: PropMap) -> Self {
        PropValue::Map(m)
    }
}

/// Deep-merge `from` into `into`. Keys only on `into` survive.
pub fn merge_maps(from: &PropMap, into: &mut PropMap) {
    for (key, value) in from {
        match into.get_mut(key) {
            Some(existing) => existing.merge_from(value),
            None => {
                into.insert(key.clone(), value.clone());
            }
        }
    }
}

/// The `attributes` branch of an element's properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Space-separated class list
    pub class: Option<Stem>,
    /// Form control value
    pub value: Option<Stem>,
    /// Any other attribute (`id`, `data-*`, ...)
    pub extra: PropMap,
}

impl Attributes {
    /// Merge `from` into `self`, overwriting fields `from` sets.
    pub fn merge_from(&mut self, from: &Attributes) {
        if let Some(class) = &from.class {
            self.class = Some(class.clone());
        }
        if let Some(value) = &from.value {
            self.value = Some(value.clone());
        }
        merge_maps(&from.extra, &mut self.extra);
    }

    /// Returns true if no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.class.is_none() && self.value.is_none() && self.extra.is_empty()
    }
}

/// Properties of an element node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    /// Inline style, either a raw string or a map of declarations
    pub style: Option<PropValue>,
    /// Resource URL of embedded content
    pub src: Option<Stem>,
    /// Link target
    pub href: Option<Stem>,
    /// HTML attributes
    pub attributes: Attributes,
    /// Everything else
    pub extra: PropMap,
}

impl Properties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the class list.
    pub fn with_class(mut self, class: impl Into<Stem>) -> Self {
        self.attributes.class = Some(class.into());
        self
    }

    /// Set the `value` attribute.
    pub fn with_value(mut self, value: impl Into<Stem>) -> Self {
        self.attributes.value = Some(value.into());
        self
    }

    /// Set an arbitrary attribute.
    pub fn with_attribute(mut self, name: impl Into<Stem>, value: impl Into<PropValue>) -> Self {
        self.attributes.extra.insert(name.into(), value.into());
        self
    }

    /// Set the inline style.
    pub fn with_style(mut self, style: impl Into<PropValue>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Set `src`.
    pub fn with_src(mut self, src: impl Into<Stem>) -> Self {
        self.src = Some(src.into());
        self
    }

    /// Set `href`.
    pub fn with_href(mut self, href: impl Into<Stem>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Set an extension property.
    pub fn with_extra(mut self, name: impl Into<Stem>, value: impl Into<PropValue>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Deep-merge `from` into `self`.
    ///
    /// Every field set on `from` is copied over. Map-valued fields (`attributes`,
    /// a map `style`, nested `extra` entries) merge recursively, so keys only
    /// present on `self` survive. Scalars are overwritten.
    pub fn merge_from(&mut self, from: &Properties) {
        if let Some(style) = &from.style {
            match &mut self.style {
                Some(into) => into.merge_from(style),
                None => self.style = Some(style.clone()),
            }
        }
        if let Some(src) = &from.src {
            self.src = Some(src.clone());
        }
        if let Some(href) = &from.href {
            self.href = Some(href.clone());
        }
        self.attributes.merge_from(&from.attributes);
        merge_maps(&from.extra, &mut self.extra);
    }

    /// Whether these properties touch anything worth flagging visually:
    /// `style`, `src`, `href`, or the class list.
    pub fn is_render_relevant(&self) -> bool {
        self.style.is_some()
            || self.src.is_some()
            || self.href.is_some()
            || self.attributes.class.is_some()
            || RENDER_RELEVANT_KEYS
                .iter()
                .any(|key| self.extra.contains_key(*key))
    }

    /// Iterate the class tokens.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .class
            .as_deref()
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    /// Append a class token unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if self.classes().any(|c| c == class) {
            return;
        }
        match &mut self.attributes.class {
            Some(existing) if !existing.trim().is_empty() => {
                existing.push(' ');
                existing.push_str(class);
            }
            slot => *slot = Some(Stem::from(class)),
        }
    }
}

/// Deep-merge `from` into `into`.
///
/// Returns `false` without touching anything if either side is missing,
/// `true` once the merge is done.
pub fn merge_properties(from: Option<&Properties>, into: Option<&mut Properties>) -> bool {
    let (Some(from), Some(into)) = (from, into) else {
        return false;
    };
    into.merge_from(from);
    true
}

/// Whether a property set contains a change worth flagging visually.
///
/// Missing properties are never relevant.
pub fn has_render_relevant_props(props: Option<&Properties>) -> bool {
    props.is_some_and(Properties::is_render_relevant)
}
