//! Prelude for common imports.
//!
//! ```
//! use splice_ast::prelude::*;
//! ```

// Capability
pub use crate::capability::{AstNode, NodeKind};

// Node types
pub use crate::node::{Document, Element, Embedded, Node, NodeRef, Text, TextKind};

// Payloads
pub use crate::payload::{Hiccup, HiccupChild, Payload};

// Attributes
pub use crate::attr::{Attrs, AttrsExt};

// Identity and source
pub use crate::id::NodeId;
pub use crate::span::Segment;

// Error
pub use crate::error::{AstError, AstResult};

// Hashing
pub use crate::hash::{Fingerprint, StableHasher};

// Render
pub use crate::render::{
    DEFAULT_SPAN_ATTR, EmbedPolicy, RenderConfig, RenderEmbed, render_document,
    render_document_bytes, render_node,
};

#[cfg(feature = "parallel")]
pub use crate::render::render_batch;

// Validation
pub use crate::validate::{ValidateError, ValidateErrors, validate};

// Cache
pub use crate::cache::{CacheEntry, CacheKey, RenderCache};
