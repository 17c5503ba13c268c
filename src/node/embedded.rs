//! Embedded content node
//!
//! A leaf that carries an opaque payload built outside the parser (e.g. by
//! an extension handler) to be emitted verbatim by a renderer. The node
//! never inspects its payload, never has children, and owns no source text.

use crate::capability::{AstNode, NodeKind};
use crate::payload::Payload;
use crate::span::Segment;

// =============================================================================
// Embedded<T>
// =============================================================================

/// Leaf node holding an opaque payload.
///
/// The payload is fixed at construction. There is no way to mutate it
/// through the node; `payload()` hands out a shared reference only.
///
/// ```
/// use splice_ast::capability::AstNode;
/// use splice_ast::node::Embedded;
///
/// let node = Embedded::new("<b>raw</b>");
/// assert_eq!(*node.payload(), "<b>raw</b>");
/// assert!(!node.has_children());
/// assert!(node.segments().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Embedded<T = Payload> {
    payload: T,
    provenance: Option<Segment>,
}

impl<T> Embedded<T> {
    /// Wrap a payload. Never fails and does not look at `payload`.
    #[inline]
    pub const fn new(payload: T) -> Self {
        Self {
            payload,
            provenance: None,
        }
    }

    /// Record where the embedded content came from in source.
    ///
    /// Provenance is informational only: it is not reported by
    /// [`AstNode::segments`], so source reconstruction still skips the node.
    #[inline]
    pub fn with_provenance(mut self, origin: Segment) -> Self {
        self.provenance = Some(origin);
        self
    }

    /// The payload
    #[inline]
    pub const fn payload(&self) -> &T {
        &self.payload
    }

    /// Source range the content replaced, if recorded
    #[inline]
    pub const fn provenance(&self) -> Option<Segment> {
        self.provenance
    }

    /// Consume the node, returning its payload
    #[inline]
    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T> AstNode for Embedded<T> {
    #[inline]
    fn kind(&self) -> NodeKind {
        NodeKind::Embedded
    }

    #[inline]
    fn has_children(&self) -> bool {
        false
    }

    #[inline]
    fn segments(&self) -> &[Segment] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Hiccup;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Embedded<Payload>: Send, Sync, Clone);
    assert_impl_all!(Embedded<String>: Send, Sync);

    fn assert_leaf<T>(node: &Embedded<T>) {
        assert_eq!(node.kind(), NodeKind::Embedded);
        assert!(!node.has_children());
        assert!(node.is_leaf());
        assert!(node.segments().is_empty());
        assert_eq!(node.source_span(), None);
    }

    #[test]
    fn test_raw_markup_payload() {
        let node = Embedded::new(Payload::html("<b>raw</b>"));
        assert_leaf(&node);
        assert_eq!(node.payload(), &Payload::Html("<b>raw</b>".to_string()));
    }

    #[test]
    fn test_structured_payload() {
        let record = Hiccup::new("img").attr("src", "x.png");
        let node = Embedded::new(Payload::Hiccup(record.clone()));
        assert_leaf(&node);
        match node.payload() {
            Payload::Hiccup(h) => {
                assert_eq!(h, &record);
                assert_eq!(h.tag, "img");
                assert_eq!(h.get_attr("src"), Some("x.png"));
            }
            other => panic!("expected hiccup payload, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_payloads_are_not_special() {
        assert_leaf(&Embedded::new(()));
        assert_leaf(&Embedded::new(String::new()));
        assert_leaf(&Embedded::new(Payload::bytes(Vec::new())));
        assert_leaf(&Embedded::new(None::<Payload>));
    }

    #[test]
    fn test_instances_are_independent() {
        let shared = String::from("<hr/>");
        let a = Embedded::new(shared.clone());
        let b = Embedded::new(shared);
        assert_eq!(a, b);

        // Taking one payload out leaves the other untouched
        let mut taken = a.into_payload();
        taken.push_str("<br/>");
        assert_eq!(b.payload(), "<hr/>");
    }

    #[test]
    fn test_payload_pointer_is_stable() {
        let node = Embedded::new(vec![1u8, 2, 3]);
        let first = node.payload().as_ptr();
        let clone = node.clone();
        assert_eq!(node.payload().as_ptr(), first);
        assert_eq!(clone.payload(), node.payload());
    }

    #[test]
    fn test_provenance_is_not_a_segment() {
        let node = Embedded::new("x").with_provenance(Segment::new(10, 24));
        assert_eq!(node.provenance(), Some(Segment::new(10, 24)));
        assert!(node.segments().is_empty());
        assert_leaf(&node);
    }
}
