//! Node types for the document AST.
//!
//! `Node<T>` is the sum of all node variants. `T` is the payload type of
//! embedded nodes and defaults to [`Payload`](crate::payload::Payload).
//!
//! Nodes hold no links to each other. Parent/child structure is owned by
//! [`Document`], which stores nodes in an arena and addresses them by
//! [`NodeId`](crate::id::NodeId).

mod document;
mod element;
mod embedded;
mod text;

pub use document::{Descendants, Document, NodeRef, Stats};
pub use element::Element;
pub use embedded::Embedded;
pub use text::{Text, TextKind};

pub(crate) use element::is_void_tag;

use crate::capability::NodeKind;
use crate::payload::Payload;
use crate::span::Segment;

/// Node in a document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T = Payload> {
    Element(Element),
    Text(Text),
    Embedded(Embedded<T>),
}

impl<T> Node<T> {
    // Generates for each variant (element -> Element, etc.):
    //   - is_xxx(&self) -> bool
    //   - as_xxx(&self) -> Option<&Type>
    //   - as_xxx_mut(&mut self) -> Option<&mut Type>
    impl_enum_accessors!(element: Element, text: Text, embedded: Embedded<T>);

    /// Embedded node wrapping `payload`
    pub fn embedded(payload: T) -> Self {
        Node::Embedded(Embedded::new(payload))
    }

    /// Variant tag
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
            Node::Embedded(_) => NodeKind::Embedded,
        }
    }

    /// Backing source segments of this node alone (not its children)
    pub fn segments(&self) -> &[Segment] {
        match self {
            Node::Element(e) => &e.segments,
            Node::Text(t) => t.segment.as_slice(),
            Node::Embedded(_) => &[],
        }
    }
}

impl_node_from!(Element, Text);

impl<T> From<Embedded<T>> for Node<T> {
    fn from(value: Embedded<T>) -> Self {
        Node::Embedded(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_accessors() {
        let mut node: Node = Element::new("div").into();
        assert!(node.is_element());
        assert!(!node.is_embedded());
        node.as_element_mut().unwrap().set_attr("id", "main");
        assert_eq!(node.as_element().unwrap().get_attr("id"), Some("main"));
        assert!(node.as_text().is_none());
    }

    #[test]
    fn test_embedded_variant() {
        let node: Node<&str> = Node::embedded("<hr>");
        assert_eq!(node.kind(), NodeKind::Embedded);
        assert_eq!(node.as_embedded().map(|e| *e.payload()), Some("<hr>"));
        assert!(node.segments().is_empty());
    }

    #[test]
    fn test_segments_per_variant() {
        let text: Node = Text::new("hi").with_segment(3..5).into();
        assert_eq!(text.segments(), &[Segment::new(3, 5)]);

        let elem: Node = Element::new("p").with_segment(0..2).with_segment(7..9).into();
        assert_eq!(elem.segments().len(), 2);
    }
}
