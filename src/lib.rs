//! splice-ast - Document AST with opaque embedded content
//!
//! ## Core Concepts
//!
//! **Embedded leaves**: [`Embedded<T>`] splices a pre-built payload into a
//! document. It never has children and owns no source text, so traversal
//! never descends into it and source reconstruction skips it. Only a
//! renderer looks at the payload.
//!
//! **Arena tree**: [`Document<T>`] owns every node and all parent/child
//! links. Nodes are addressed by [`NodeId`].
//!
//! ## Modules
//! - `capability`: The `AstNode` trait every node view implements
//! - `node`: Element/Text/Embedded node types and the arena `Document`
//! - `payload`: Default payload shapes (HTML, hiccup records, bytes)
//! - `render`: HTML rendering and the `RenderEmbed` trait
//! - `validate`: Structural invariant checks
//! - `cache`: Fingerprint-keyed render cache
//!
//! ## Usage
//!
//! ```
//! use splice_ast::prelude::*;
//!
//! let mut doc: Document = Document::new(Element::new("body"));
//! let p = doc.append(doc.root(), Element::new("p")).unwrap();
//! doc.append(p, Text::new("Figure:")).unwrap();
//! doc.splice(doc.root(), Payload::Hiccup(Hiccup::new("img").attr("src", "x.png"))).unwrap();
//!
//! let html = render_document(&doc, &RenderConfig::PROD).unwrap();
//! assert_eq!(html, "<body><p>Figure:</p><img src=\"x.png\" /></body>");
//! ```

#[macro_use]
mod macros;

/// The node capability set
pub mod capability;

/// Node types: Document, Element, Embedded, Node, Text
pub mod node;

/// Embeddable content shapes
pub mod payload;

/// Attribute types
pub mod attr;

/// Node handles
pub mod id;

/// Source segments
pub mod span;

/// Deterministic fingerprints
pub mod hash;

/// Error types
pub mod error;

/// HTML rendering
pub mod render;

/// Structural validation
pub mod validate;

/// Render cache
pub mod cache;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Capability
pub use capability::{AstNode, NodeKind};

// Node types
pub use node::{Descendants, Document, Element, Embedded, Node, NodeRef, Stats, Text, TextKind};

// Payloads
pub use payload::{Hiccup, HiccupChild, Payload};

// Attribute types
pub use attr::{Attrs, AttrsExt};

// Identity and source
pub use id::NodeId;
pub use span::Segment;

// Hashing
pub use hash::{Fingerprint, StableHasher};

// Error types
pub use error::{AstError, AstResult};

// Rendering
pub use render::{EmbedPolicy, RenderConfig, RenderEmbed, render_document};

// Validation
pub use validate::{ValidateError, ValidateErrors, validate};

// Cache
pub use cache::{CacheEntry, CacheKey, RenderCache};
