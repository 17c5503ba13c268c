//! Node handles for the arena document
//!
//! Nodes never point at each other directly. The document owns every node
//! in a flat vector and hands out `NodeId`s, which are plain indices into
//! that vector. Parent/child links are stored next to the node, not in it.

use std::fmt;

/// Handle to a node inside a [`Document`](crate::node::Document).
///
/// # Memory Layout
///
/// - 4 bytes (u32)
/// - Copy, no heap allocation
///
/// ```
/// use splice_ast::id::NodeId;
///
/// let id = NodeId::from_raw(3);
/// assert_eq!(id.index(), 3);
/// assert_eq!(id.to_string(), "#3");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root of every document.
    pub const ROOT: NodeId = NodeId(0);

    /// Create a NodeId from a raw u32 value.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 representation
    #[inline]
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Index into the document's slot vector
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Check if this is the root handle
    #[inline]
    pub const fn is_root(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "document exceeds u32 node ids");
        Self(index as u32)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_id() {
        assert!(NodeId::ROOT.is_root());
        assert!(!NodeId::from_raw(1).is_root());
        assert_eq!(NodeId::from_index(7).as_raw(), 7);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", NodeId::from_raw(12)), "NodeId(12)");
    }
}
