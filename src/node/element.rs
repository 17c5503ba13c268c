//! Element type - container nodes of the document
//!
//! An element carries its tag, attributes and backing source segments.
//! Its children live in the owning [`Document`](super::Document).

use compact_str::CompactString;
use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt};
use crate::span::Segment;

// =============================================================================
// Element
// =============================================================================

/// Container node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// HTML tag name
    pub tag: CompactString,
    /// Element attributes
    pub attrs: Attrs,
    /// Backing source ranges of the element's own markers (e.g. `# ` of a
    /// heading). Children's text is never included.
    pub segments: SmallVec<[Segment; 2]>,
}

impl Element {
    /// Create an element with no attributes and no source
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            segments: SmallVec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builders
    // ─────────────────────────────────────────────────────────────────────────

    /// Builder: set an attribute
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Builder: add a class
    pub fn with_class(mut self, class: &str) -> Self {
        self.attrs.add_class(class);
        self
    }

    /// Builder: append a backing source range
    pub fn with_segment(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Set attribute value (update if exists, add if not)
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.set_attr(name, value);
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering hints
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element is a void element (self-closing).
    pub fn is_void(&self) -> bool {
        is_void_tag(&self.tag)
    }

    /// Check if element is block-level (gets a trailing newline when not minified).
    pub fn is_block(&self) -> bool {
        matches!(
            self.tag.as_str(),
            "address"
                | "article"
                | "aside"
                | "blockquote"
                | "body"
                | "div"
                | "dl"
                | "figure"
                | "footer"
                | "h1"
                | "h2"
                | "h3"
                | "h4"
                | "h5"
                | "h6"
                | "header"
                | "hr"
                | "li"
                | "ol"
                | "p"
                | "pre"
                | "section"
                | "table"
                | "ul"
        )
    }
}

/// Check if a tag is a void element (self-closing).
pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::new("p").with_segment(0..12).attr("id", "intro");
        assert_eq!(elem.tag, "p");
        assert_eq!(elem.get_attr("id"), Some("intro"));
        assert_eq!(elem.segments.as_slice(), &[Segment::new(0, 12)]);
        assert!(elem.is_block());
        assert!(!elem.is_void());
    }

    #[test]
    fn test_void_tags() {
        assert!(Element::new("img").is_void());
        assert!(Element::new("br").is_void());
        assert!(!Element::new("span").is_void());
    }
}
