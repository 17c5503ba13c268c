//! Node capability set
//!
//! `AstNode` is what generic tree logic (rendering, serialization,
//! validation, source reconstruction) relies on to treat every node variant
//! uniformly: whether to recurse into a node, and which source segments back
//! it.

use std::fmt;

use crate::span::Segment;

// =============================================================================
// NodeKind
// =============================================================================

/// Variant tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Container element
    Element,
    /// Text run
    Text,
    /// Opaque embedded content
    Embedded,
}

impl NodeKind {
    /// Lowercase name for diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            NodeKind::Element => "element",
            NodeKind::Text => "text",
            NodeKind::Embedded => "embedded",
        }
    }

    /// Whether nodes of this kind may be given children
    pub const fn accepts_children(self) -> bool {
        matches!(self, NodeKind::Element)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// AstNode
// =============================================================================

/// Structural queries every node variant answers.
///
/// # Contract
///
/// - `has_children() == false` means generic traversal must not recurse
///   into the node.
/// - `segments()` lists the source ranges backing the node. An empty slice
///   means the node owns no source text and is skipped when reconstructing
///   source from segments.
pub trait AstNode {
    /// Variant tag
    fn kind(&self) -> NodeKind;

    /// Whether the node currently has children
    fn has_children(&self) -> bool;

    /// Source segments backing the node, in source order
    fn segments(&self) -> &[Segment];

    /// Check if the node is a leaf for traversal purposes
    #[inline]
    fn is_leaf(&self) -> bool {
        !self.has_children()
    }

    /// Smallest segment covering all of `segments()`
    fn source_span(&self) -> Option<Segment> {
        self.segments().iter().copied().reduce(Segment::join)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<Segment>);

    impl AstNode for Fixed {
        fn kind(&self) -> NodeKind {
            NodeKind::Text
        }

        fn has_children(&self) -> bool {
            false
        }

        fn segments(&self) -> &[Segment] {
            &self.0
        }
    }

    #[test]
    fn test_source_span_covers_segments() {
        let node = Fixed(vec![Segment::new(4, 6), Segment::new(10, 15)]);
        assert_eq!(node.source_span(), Some(Segment::new(4, 15)));
        assert!(node.is_leaf());
        assert_eq!(Fixed(Vec::new()).source_span(), None);
    }

    #[test]
    fn test_kind_accepts_children() {
        assert!(NodeKind::Element.accepts_children());
        assert!(!NodeKind::Text.accepts_children());
        assert!(!NodeKind::Embedded.accepts_children());
        assert_eq!(NodeKind::Embedded.to_string(), "embedded");
    }
}
