//! Embeddable content shapes
//!
//! `Payload` is the default payload type for embedded nodes: a closed set of
//! shapes a renderer knows how to emit. Embedded nodes never look inside it.

use compact_str::CompactString;

use crate::attr::{Attrs, AttrsExt};
use crate::hash::{Fingerprint, StableHasher};

// =============================================================================
// Payload
// =============================================================================

/// Content spliced into a document verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Pre-rendered markup
    Html(String),
    /// Structured markup record
    Hiccup(Hiccup),
    /// Pre-rendered bytes, expected to be UTF-8 markup
    Bytes(Vec<u8>),
}

impl Payload {
    /// Markup payload
    pub fn html(markup: impl Into<String>) -> Self {
        Self::Html(markup.into())
    }

    /// Byte payload
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    /// Short name of the shape, for logs
    pub fn shape(&self) -> &'static str {
        match self {
            Payload::Html(_) => "html",
            Payload::Hiccup(_) => "hiccup",
            Payload::Bytes(_) => "bytes",
        }
    }

    /// Check if the payload carries no content
    pub fn is_empty(&self) -> bool {
        match self {
            Payload::Html(s) => s.is_empty(),
            Payload::Hiccup(_) => false,
            Payload::Bytes(b) => b.is_empty(),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Html(String::new())
    }
}

impl From<String> for Payload {
    fn from(markup: String) -> Self {
        Self::Html(markup)
    }
}

impl From<&str> for Payload {
    fn from(markup: &str) -> Self {
        Self::Html(markup.to_string())
    }
}

impl From<Hiccup> for Payload {
    fn from(record: Hiccup) -> Self {
        Self::Hiccup(record)
    }
}

impl From<Vec<u8>> for Payload {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl Fingerprint for Payload {
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher {
        match self {
            Payload::Html(s) => hasher.update_tag(0).update_str(s),
            Payload::Hiccup(h) => h.fingerprint_into(hasher.update_tag(1)),
            Payload::Bytes(b) => hasher.update_tag(2).update_bytes(b),
        }
    }
}

// =============================================================================
// Hiccup
// =============================================================================

/// Markup record in hiccup form: `[tag {attrs} children...]`.
///
/// The tag may use the shorthand `name#id.class1.class2`; the renderer
/// expands it into `id` and `class` attributes.
///
/// ```
/// use splice_ast::payload::Hiccup;
///
/// let img = Hiccup::new("img").attr("src", "x.png");
/// assert_eq!(img.tag, "img");
/// assert_eq!(img.get_attr("src"), Some("x.png"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hiccup {
    /// Tag, possibly in `name#id.class` shorthand
    pub tag: CompactString,
    /// Attributes in insertion order
    pub attrs: Attrs,
    /// Child content
    pub children: Vec<HiccupChild>,
}

/// Child of a hiccup record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HiccupChild {
    /// Text, escaped on render
    Text(String),
    /// Markup, emitted as-is
    Raw(String),
    /// Nested record
    Element(Hiccup),
}

impl Hiccup {
    /// Create a record with no attributes or children
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Builder: append a text child
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(HiccupChild::Text(text.into()));
        self
    }

    /// Builder: append a raw markup child
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push(HiccupChild::Raw(markup.into()));
        self
    }

    /// Builder: append a nested record
    pub fn child(mut self, record: Hiccup) -> Self {
        self.children.push(HiccupChild::Element(record));
        self
    }

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }
}

impl Fingerprint for Hiccup {
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher {
        let mut hasher = hasher
            .update_str(&self.tag)
            .update_usize(self.attrs.len());
        for (name, value) in &self.attrs {
            hasher = hasher.update_str(name).update_str(value);
        }
        hasher = hasher.update_usize(self.children.len());
        for child in &self.children {
            hasher = match child {
                HiccupChild::Text(s) => hasher.update_tag(0).update_str(s),
                HiccupChild::Raw(s) => hasher.update_tag(1).update_str(s),
                HiccupChild::Element(h) => h.fingerprint_into(hasher.update_tag(2)),
            };
        }
        hasher
    }
}
