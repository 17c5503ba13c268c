//! Error types for splice-ast.
//!
//! Embedded nodes themselves cannot fail. Errors come from the document
//! (bad handles, attaching children to leaves), from source reconstruction,
//! and from renderers that cannot interpret a payload.

use thiserror::Error;

use crate::capability::NodeKind;
use crate::id::NodeId;
use crate::span::Segment;

/// Errors that can occur during document operations.
#[derive(Debug, Error)]
pub enum AstError {
    /// Handle does not belong to this document
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    /// Attempted to give children to a node that cannot have any
    #[error("cannot attach children to {kind} node {parent}")]
    LeafParent {
        /// The would-be parent
        parent: NodeId,
        /// Its kind
        kind: NodeKind,
    },

    /// The root must stay an element
    #[error("document root must be an element")]
    RootNotElement,

    /// A renderer could not interpret an embedded payload
    #[error("invalid embedded payload: {0}")]
    InvalidPayload(String),

    /// Byte payload is not valid UTF-8
    #[error("embedded payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    NonUtf8Payload {
        /// Length of the longest valid prefix
        valid_up_to: usize,
    },

    /// Source reconstruction was requested on a document without source
    #[error("document has no source text")]
    MissingSource,

    /// A segment does not slice the document source
    #[error("segment {segment} out of bounds for source of {len} bytes")]
    SegmentOutOfBounds {
        /// Offending segment
        segment: Segment,
        /// Source length in bytes
        len: usize,
    },
}

/// Result type alias for document operations.
pub type AstResult<T> = Result<T, AstError>;

impl AstError {
    /// Create an invalid payload error with a message.
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }
}

impl From<std::str::Utf8Error> for AstError {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::NonUtf8Payload {
            valid_up_to: err.valid_up_to(),
        }
    }
}
