//! Structural validation for documents.
//!
//! Checks the invariants generic tree logic relies on: the root is an
//! element, links agree in both directions and leaves have no children.
//! When the document holds source, segments and embedded provenance must
//! slice it.

use thiserror::Error;
use tracing::debug;

use crate::capability::AstNode;
use crate::id::NodeId;
use crate::node::Document;

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{rule}: {message}{}", format_node(.node_id))]
pub struct ValidateError {
    /// Short name of the violated rule.
    pub rule: &'static str,
    /// The error message.
    pub message: String,
    /// The node that violates the rule (if applicable).
    pub node_id: Option<NodeId>,
}

fn format_node(node_id: &Option<NodeId>) -> String {
    match node_id {
        Some(id) => format!(" [node: {id}]"),
        None => String::new(),
    }
}

impl ValidateError {
    /// Create a new validation error.
    pub fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            node_id: None,
        }
    }

    /// Attach the node that caused this error.
    pub fn with_node(mut self, id: NodeId) -> Self {
        self.node_id = Some(id);
        self
    }
}

/// Every broken invariant found in a document.
#[derive(Debug, Default, Error)]
#[error("{} validation error(s):\n{}", self.errors.len(), format_errors(&self.errors))]
pub struct ValidateErrors {
    /// List of individual validation errors.
    pub errors: Vec<ValidateError>,
}

fn format_errors(errors: &[ValidateError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidateErrors {
    /// Check if there are any errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if any error violates `rule`.
    pub fn has_rule(&self, rule: &str) -> bool {
        self.errors.iter().any(|e| e.rule == rule)
    }

    fn push(&mut self, error: ValidateError) {
        self.errors.push(error);
    }
}

/// Validate every node in `doc`, including detached ones.
///
/// # Errors
///
/// Returns all violations found, not just the first.
pub fn validate<T>(doc: &Document<T>) -> Result<(), ValidateErrors> {
    let mut errors = ValidateErrors::default();
    let source = doc.source();

    if doc.get(doc.root()).is_some_and(|root| !root.is_element()) {
        errors.push(
            ValidateError::new("root-element", "document root is not an element")
                .with_node(doc.root()),
        );
    }

    for index in 0..doc.len() {
        let id = NodeId::from_index(index);
        let Some(node) = doc.node(id) else {
            continue;
        };

        for &child in node.children() {
            if doc.parent(child) != Some(id) {
                errors.push(
                    ValidateError::new(
                        "parent-link",
                        format!("child {child} does not link back to its parent"),
                    )
                    .with_node(id),
                );
            }
        }

        if !node.children().is_empty() && !node.kind().accepts_children() {
            errors.push(
                ValidateError::new(
                    "leaf-children",
                    format!("{} node has {} children", node.kind(), node.children().len()),
                )
                .with_node(id),
            );
        }

        if let Some(source) = source {
            let provenance = node.node().as_embedded().and_then(|e| e.provenance());
            if let Some(segment) = provenance {
                if segment.slice(source).is_none() {
                    errors.push(
                        ValidateError::new(
                            "embedded-provenance",
                            format!("provenance {segment} does not slice source"),
                        )
                        .with_node(id),
                    );
                }
            }

            for segment in node.segments() {
                if segment.slice(source).is_none() {
                    errors.push(
                        ValidateError::new(
                            "segment-bounds",
                            format!(
                                "segment {segment} does not slice source of {} bytes",
                                source.len()
                            ),
                        )
                        .with_node(id),
                    );
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        debug!(count = errors.len(), "document failed validation");
        Err(errors)
    }
}
