//! Text node type
//!
//! Text runs parsed from source. A text node is always a leaf.

use crate::capability::{AstNode, NodeKind};
use crate::span::Segment;

// =============================================================================
// TextKind
// =============================================================================

/// How a renderer should treat text content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextKind {
    /// Escaped on render
    #[default]
    Normal,
    /// Emitted as-is (inline HTML found in source)
    Raw,
}

// =============================================================================
// Text
// =============================================================================

/// Text content node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    /// Text content
    pub content: String,
    /// Escaping mode
    pub kind: TextKind,
    /// Backing source range, if parsed from source
    pub segment: Option<Segment>,
}

impl Text {
    /// Create a normal text node
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: TextKind::Normal,
            segment: None,
        }
    }

    /// Create a raw text node
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            kind: TextKind::Raw,
            ..Self::new(content)
        }
    }

    /// Builder: attach the backing source range
    pub fn with_segment(mut self, segment: impl Into<Segment>) -> Self {
        self.segment = Some(segment.into());
        self
    }

    /// Check if this is raw text
    pub fn is_raw(&self) -> bool {
        self.kind == TextKind::Raw
    }

    /// Check if text content is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get text length in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if text is only whitespace
    pub fn is_whitespace(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl AstNode for Text {
    fn kind(&self) -> NodeKind {
        NodeKind::Text
    }

    fn has_children(&self) -> bool {
        false
    }

    fn segments(&self) -> &[Segment] {
        self.segment.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node() {
        let text = Text::new("  hello world  ");
        assert!(!text.is_empty());
        assert!(!text.is_whitespace());
        assert!(!text.is_raw());
        assert!(text.segments().is_empty());
    }

    #[test]
    fn test_text_segment() {
        let text = Text::raw("<br>").with_segment(4..8);
        assert!(text.is_raw());
        assert_eq!(text.segments(), &[Segment::new(4, 8)]);
        assert!(!text.has_children());
    }
}
