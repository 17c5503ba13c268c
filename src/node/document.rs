//! Document type - arena storage for the node tree
//!
//! Nodes live in a flat vector and are addressed by `NodeId`. Each slot
//! stores the node next to its parent and child links, so node values stay
//! link-free and the tree structure is owned by the document alone.

use std::sync::Arc;

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::capability::{AstNode, NodeKind};
use crate::error::{AstError, AstResult};
use crate::hash::{Fingerprint, StableHasher};
use crate::id::NodeId;
use crate::payload::Payload;
use crate::span::Segment;

use super::{Element, Embedded, Node, Text};

// =============================================================================
// Slot
// =============================================================================

#[derive(Debug, Clone)]
struct Slot<T> {
    node: Node<T>,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 8]>,
}

impl<T> Slot<T> {
    fn new(node: Node<T>, parent: Option<NodeId>) -> Self {
        Self {
            node,
            parent,
            children: SmallVec::new(),
        }
    }
}

// =============================================================================
// Document<T>
// =============================================================================

/// Root container: an arena of nodes plus the source they were parsed from.
///
/// The root (`NodeId::ROOT`) is always an [`Element`].
///
/// ```
/// use splice_ast::node::{Document, Element, Text};
/// use splice_ast::payload::Payload;
///
/// let mut doc: Document = Document::new(Element::new("body"));
/// let p = doc.append(doc.root(), Element::new("p")).unwrap();
/// doc.append(p, Text::new("see below")).unwrap();
/// doc.splice(doc.root(), Payload::html("<b>raw</b>")).unwrap();
///
/// assert_eq!(doc.stats().embedded_count, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Document<T = Payload> {
    slots: Vec<Slot<T>>,
    source: Option<Arc<str>>,
}

impl<T> Document<T> {
    /// Create a new document with a root element
    pub fn new(root: Element) -> Self {
        Self {
            slots: vec![Slot::new(Node::Element(root), None)],
            source: None,
        }
    }

    /// Create a document whose segments refer to `source`
    pub fn with_source(root: Element, source: impl Into<Arc<str>>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::new(root)
        }
    }

    /// Root handle
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Source text, if the document was built from source
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Number of nodes ever added, including detached ones
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the document holds only its root
    pub fn is_empty(&self) -> bool {
        self.slots.len() <= 1
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access
    // ─────────────────────────────────────────────────────────────────────────

    fn slot(&self, id: NodeId) -> AstResult<&Slot<T>> {
        self.slots.get(id.index()).ok_or(AstError::UnknownNode(id))
    }

    /// Get a node by handle
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.slots.get(id.index()).map(|s| &s.node)
    }

    /// Mutable access to an element in place.
    ///
    /// Changing a node's variant goes through [`Document::replace`], which
    /// keeps the root an element and detaches children from new leaves.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.slots
            .get_mut(id.index())
            .and_then(|s| s.node.as_element_mut())
    }

    /// Mutable access to a text node in place
    pub fn text_mut(&mut self, id: NodeId) -> Option<&mut Text> {
        self.slots.get_mut(id.index()).and_then(|s| s.node.as_text_mut())
    }

    /// Tree-aware view of a node
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T>> {
        let slot = self.slots.get(id.index())?;
        Some(NodeRef { doc: self, id, slot })
    }

    /// Parent handle (`None` for the root and detached nodes)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.slots.get(id.index()).and_then(|s| s.parent)
    }

    /// Child handles in order (empty for leaves and unknown handles)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.index())
            .map(|s| s.children.as_slice())
            .unwrap_or(&[])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Append `node` as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// - [`AstError::UnknownNode`] if `parent` is not in this document
    /// - [`AstError::LeafParent`] if `parent` cannot have children
    pub fn append(&mut self, parent: NodeId, node: impl Into<Node<T>>) -> AstResult<NodeId> {
        let kind = self.slot(parent)?.node.kind();
        if !kind.accepts_children() {
            return Err(AstError::LeafParent { parent, kind });
        }

        let node = node.into();
        let child_kind = node.kind();
        let id = NodeId::from_index(self.slots.len());
        self.slots.push(Slot::new(node, Some(parent)));
        self.slots[parent.index()].children.push(id);
        trace!(%parent, %id, kind = %child_kind, "appended node");
        Ok(id)
    }

    /// Append an embedded node carrying `payload` under `parent`.
    pub fn splice(&mut self, parent: NodeId, payload: T) -> AstResult<NodeId> {
        self.append(parent, Embedded::new(payload))
    }

    /// Swap the node stored at `id`, returning the previous value.
    ///
    /// If the new node is a leaf, any children of the slot are detached:
    /// their parent link is cleared and they are no longer reachable from
    /// the root.
    ///
    /// # Errors
    ///
    /// - [`AstError::UnknownNode`] if `id` is not in this document
    /// - [`AstError::RootNotElement`] if `id` is the root and `node` is not
    ///   an element
    pub fn replace(&mut self, id: NodeId, node: impl Into<Node<T>>) -> AstResult<Node<T>> {
        let node = node.into();
        if id.is_root() && !node.is_element() {
            return Err(AstError::RootNotElement);
        }

        let slot = self
            .slots
            .get_mut(id.index())
            .ok_or(AstError::UnknownNode(id))?;
        let old = std::mem::replace(&mut slot.node, node);

        if !slot.node.kind().accepts_children() && !slot.children.is_empty() {
            let orphans = std::mem::take(&mut slot.children);
            debug!(%id, detached = orphans.len(), "replaced container with leaf");
            for child in orphans {
                if let Some(child_slot) = self.slots.get_mut(child.index()) {
                    child_slot.parent = None;
                }
            }
        }
        Ok(old)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Pre-order traversal starting at `id` (inclusive).
    ///
    /// Nodes whose [`AstNode::has_children`] is false are yielded but never
    /// recursed into.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_, T> {
        let stack = if self.slots.len() > id.index() {
            vec![id]
        } else {
            Vec::new()
        };
        Descendants { doc: self, stack }
    }

    /// Pre-order traversal of every node reachable from the root
    pub fn iter(&self) -> Descendants<'_, T> {
        self.descendants(self.root())
    }

    /// Handles of all reachable nodes matching `predicate`, in document order
    pub fn find_all<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&NodeRef<'_, T>) -> bool,
    {
        self.iter()
            .filter(|node| predicate(node))
            .map(|node| node.id())
            .collect()
    }

    /// All reachable embedded nodes, in document order
    pub fn embedded(&self) -> impl Iterator<Item = (NodeId, &Embedded<T>)> + '_ {
        self.iter()
            .filter_map(|node| node.node().as_embedded().map(|e| (node.id(), e)))
    }

    /// Collect statistics about reachable nodes
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        for node in self.iter() {
            match node.kind() {
                NodeKind::Element => stats.element_count += 1,
                NodeKind::Text => stats.text_count += 1,
                NodeKind::Embedded => stats.embedded_count += 1,
            }
        }
        stats.detached_count = self.slots.len() - stats.node_count();
        stats
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Source
    // ─────────────────────────────────────────────────────────────────────────

    /// Backing segments of all reachable nodes, sorted by source position.
    ///
    /// Embedded nodes contribute nothing.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments: Vec<Segment> = self
            .iter()
            .flat_map(|node| node.node().segments().iter().copied())
            .collect();
        segments.sort_by_key(|s| (s.start, s.end));
        segments
    }

    /// Rebuild source text from the segments of reachable nodes.
    ///
    /// Source ranges not backed by any node (such as text an extension
    /// replaced with embedded content) are left out.
    ///
    /// # Errors
    ///
    /// - [`AstError::MissingSource`] if the document has no source
    /// - [`AstError::SegmentOutOfBounds`] if a segment does not slice it
    pub fn reconstruct_source(&self) -> AstResult<String> {
        let source = self.source().ok_or(AstError::MissingSource)?;
        let mut out = String::with_capacity(source.len());
        for segment in self.segments() {
            let piece = segment.slice(source).ok_or(AstError::SegmentOutOfBounds {
                segment,
                len: source.len(),
            })?;
            out.push_str(piece);
        }
        Ok(out)
    }
}

impl<T> Default for Document<T> {
    fn default() -> Self {
        Self::new(Element::new("body"))
    }
}

impl<T: Fingerprint> Fingerprint for Document<T> {
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher {
        let mut hasher = hasher;
        for node in self.iter() {
            hasher = match node.node() {
                Node::Element(e) => {
                    let mut h = hasher.update_tag(0).update_str(&e.tag);
                    h = h.update_usize(e.attrs.len());
                    for (name, value) in &e.attrs {
                        h = h.update_str(name).update_str(value);
                    }
                    hash_segments(h, &e.segments)
                }
                Node::Text(t) => {
                    let h = hasher
                        .update_tag(1)
                        .update_tag(t.is_raw() as u8)
                        .update_str(&t.content);
                    hash_segments(h, t.segment.as_slice())
                }
                Node::Embedded(e) => e.payload().fingerprint_into(hasher.update_tag(2)),
            };
            hasher = hasher.update_usize(node.children().len());
        }
        hasher
    }
}

/// Spans end up in rendered output (`RenderConfig::emit_spans`), so they are
/// part of the fingerprint.
fn hash_segments(hasher: StableHasher, segments: &[Segment]) -> StableHasher {
    segments
        .iter()
        .fold(hasher.update_usize(segments.len()), |h, s| {
            h.update_usize(s.start).update_usize(s.end)
        })
}

// =============================================================================
// NodeRef - tree-aware node view
// =============================================================================

/// A node together with its position in a document.
///
/// This is the type generic tree logic works with: unlike a bare node
/// value, it knows whether the node currently has children.
pub struct NodeRef<'a, T> {
    doc: &'a Document<T>,
    id: NodeId,
    slot: &'a Slot<T>,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("node", &self.slot.node)
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// Handle of this node
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node value
    #[inline]
    pub fn node(&self) -> &'a Node<T> {
        &self.slot.node
    }

    /// Owning document
    #[inline]
    pub fn document(&self) -> &'a Document<T> {
        self.doc
    }

    /// Parent handle
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.slot.parent
    }

    /// Child handles in order
    #[inline]
    pub fn children(&self) -> &'a [NodeId] {
        &self.slot.children
    }

    /// Iterate over child views
    pub fn child_nodes(&self) -> impl Iterator<Item = NodeRef<'a, T>> + 'a {
        let doc = self.doc;
        self.slot.children.iter().filter_map(move |&id| doc.node(id))
    }
}

impl<T> AstNode for NodeRef<'_, T> {
    fn kind(&self) -> NodeKind {
        self.slot.node.kind()
    }

    fn has_children(&self) -> bool {
        self.kind().accepts_children() && !self.slot.children.is_empty()
    }

    fn segments(&self) -> &[Segment] {
        self.slot.node.segments()
    }
}

// =============================================================================
// Descendants - pre-order traversal
// =============================================================================

/// Pre-order iterator over node views
pub struct Descendants<'a, T> {
    doc: &'a Document<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iterator for Descendants<'a, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            let Some(node) = self.doc.node(id) else {
                continue;
            };
            if node.has_children() {
                // Push children in reverse order so they're visited left-to-right
                self.stack.extend(node.children().iter().rev().copied());
            }
            return Some(node);
        }
    }
}

// =============================================================================
// Stats - document statistics
// =============================================================================

/// Document statistics collected from traversal
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub element_count: usize,
    pub text_count: usize,
    pub embedded_count: usize,
    /// Slots no longer reachable from the root
    pub detached_count: usize,
}

impl Stats {
    /// Reachable nodes of every kind
    pub fn node_count(&self) -> usize {
        self.element_count + self.text_count + self.embedded_count
    }

    /// Check if document has any embedded content
    pub fn has_embedded(&self) -> bool {
        self.embedded_count > 0
    }
}

/// Slot-level corruption for exercising the validator. The public API
/// cannot produce these states.
#[cfg(test)]
impl<T> Document<T> {
    pub(crate) fn overwrite_node(&mut self, id: NodeId, node: Node<T>) {
        self.slots[id.index()].node = node;
    }

    pub(crate) fn push_child_link(&mut self, parent: NodeId, child: NodeId) {
        self.slots[parent.index()].children.push(child);
    }
}
