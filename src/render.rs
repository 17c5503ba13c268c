//! HTML Rendering for documents
//!
//! Walks a document and writes HTML. Elements and text are rendered by the
//! walker itself; embedded nodes are recognized by variant and their
//! payloads handed to [`RenderEmbed`].

use tracing::{debug, trace};

use crate::attr::{Attrs, AttrsExt};
use crate::capability::AstNode;
use crate::error::{AstError, AstResult};
use crate::hash::{Fingerprint, StableHasher};
use crate::id::NodeId;
use crate::node::{Document, Element, Embedded, Node, NodeRef, is_void_tag};
use crate::payload::{Hiccup, HiccupChild, Payload};

// =============================================================================
// RenderConfig
// =============================================================================

/// Default attribute name for source spans.
pub const DEFAULT_SPAN_ATTR: &str = "data-src";

/// What to do with embedded payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmbedPolicy {
    /// Emit payload markup as-is
    #[default]
    Verbatim,
    /// Emit payload markup escaped, so it shows as text
    Escape,
    /// Leave embedded nodes out of the output
    Drop,
}

/// Configuration for HTML rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether to omit the newline after block-level elements.
    pub minify: bool,
    /// How embedded payloads are emitted.
    pub embed: EmbedPolicy,
    /// Whether to emit source span attributes on elements parsed from source.
    pub emit_spans: bool,
    /// Attribute name for source spans (default: "data-src").
    pub span_attr_name: String,
}

impl RenderConfig {
    /// Development config (spans, newlines).
    pub const DEV: Self = Self {
        minify: false,
        embed: EmbedPolicy::Verbatim,
        emit_spans: true,
        span_attr_name: String::new(), // Will use DEFAULT_SPAN_ATTR
    };

    /// Production config (no spans, minified).
    pub const PROD: Self = Self {
        minify: true,
        embed: EmbedPolicy::Verbatim,
        emit_spans: false,
        span_attr_name: String::new(),
    };

    /// Create a new config.
    pub fn new(emit_spans: bool, minify: bool) -> Self {
        Self {
            minify,
            embed: EmbedPolicy::Verbatim,
            emit_spans,
            span_attr_name: DEFAULT_SPAN_ATTR.to_string(),
        }
    }

    /// Set the embed policy.
    pub fn with_embed(mut self, policy: EmbedPolicy) -> Self {
        self.embed = policy;
        self
    }

    /// Set custom attribute name for source spans.
    pub fn with_span_attr(mut self, attr_name: impl Into<String>) -> Self {
        self.span_attr_name = attr_name.into();
        self
    }

    /// Get the attribute name for source spans.
    pub fn span_attr(&self) -> &str {
        if self.span_attr_name.is_empty() {
            DEFAULT_SPAN_ATTR
        } else {
            &self.span_attr_name
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Fingerprint for RenderConfig {
    fn fingerprint_into(&self, hasher: StableHasher) -> StableHasher {
        hasher
            .update_tag(self.minify as u8)
            .update_tag(self.embed as u8)
            .update_tag(self.emit_spans as u8)
            .update_str(self.span_attr())
    }
}

// =============================================================================
// RenderEmbed
// =============================================================================

/// Payload types a renderer knows how to emit.
///
/// Implement this for a custom payload type to render documents that
/// embed it.
pub trait RenderEmbed {
    /// Append the payload's markup to `out`.
    fn render_embed(&self, out: &mut String) -> AstResult<()>;
}

impl<R: RenderEmbed + ?Sized> RenderEmbed for &R {
    fn render_embed(&self, out: &mut String) -> AstResult<()> {
        (**self).render_embed(out)
    }
}

impl RenderEmbed for str {
    fn render_embed(&self, out: &mut String) -> AstResult<()> {
        out.push_str(self);
        Ok(())
    }
}

impl RenderEmbed for String {
    fn render_embed(&self, out: &mut String) -> AstResult<()> {
        out.push_str(self);
        Ok(())
    }
}

impl RenderEmbed for [u8] {
    fn render_embed(&self, out: &mut String) -> AstResult<()> {
        out.push_str(std::str::from_utf8(self)?);
        Ok(())
    }
}

impl RenderEmbed for Vec<u8> {
    fn render_embed(&self, out: &mut String) -> AstResult<()> {
        self.as_slice().render_embed(out)
    }
}

impl RenderEmbed for Payload {
    fn render_embed(&self, out: &mut String) -> AstResult<()> {
        match self {
            Payload::Html(markup) => markup.render_embed(out),
            Payload::Hiccup(record) => record.render_embed(out),
            Payload::Bytes(bytes) => bytes.render_embed(out),
        }
    }
}

impl RenderEmbed for Hiccup {
    fn render_embed(&self, out: &mut String) -> AstResult<()> {
        let (name, id, classes) = split_tag(&self.tag)?;

        // Shorthand id/classes first, explicit attributes after
        let mut attrs: Attrs = Vec::with_capacity(self.attrs.len() + 2);
        if let Some(id) = id {
            attrs.set_attr("id", id);
        }
        for class in classes {
            attrs.add_class(class);
        }
        for (key, value) in &self.attrs {
            if !is_valid_name(key) {
                return Err(AstError::invalid_payload(format!(
                    "invalid attribute name {key:?} on <{name}>"
                )));
            }
            if key == "class" {
                value.split_whitespace().for_each(|c| attrs.add_class(c));
            } else {
                attrs.set_attr(key.as_str(), value.as_str());
            }
        }

        out.push('<');
        out.push_str(name);
        render_attrs(&attrs, out);

        if is_void_tag(name) && self.children.is_empty() {
            out.push_str(" />");
            return Ok(());
        }
        out.push('>');

        for child in &self.children {
            match child {
                HiccupChild::Text(text) => push_escaped_html(text, out),
                HiccupChild::Raw(markup) => out.push_str(markup),
                HiccupChild::Element(record) => record.render_embed(out)?,
            }
        }

        out.push_str("</");
        out.push_str(name);
        out.push('>');
        Ok(())
    }
}

/// Split `name#id.class1.class2` into its parts.
fn split_tag(tag: &str) -> AstResult<(&str, Option<&str>, Vec<&str>)> {
    let is_marker = |c: char| c == '#' || c == '.';
    let name_end = tag.find(is_marker).unwrap_or(tag.len());
    let name = &tag[..name_end];
    if !is_valid_name(name) {
        return Err(AstError::invalid_payload(format!("invalid tag {tag:?}")));
    }

    let mut id = None;
    let mut classes = Vec::new();
    let mut rest = &tag[name_end..];
    while let Some(marker) = rest.chars().next() {
        let body = &rest[marker.len_utf8()..];
        let end = body.find(is_marker).unwrap_or(body.len());
        let piece = &body[..end];
        if !piece.is_empty() {
            if marker == '#' {
                id = Some(piece);
            } else {
                classes.push(piece);
            }
        }
        rest = &body[end..];
    }
    Ok((name, id, classes))
}

/// Tag and attribute names: ASCII letter, then letters, digits, `-`, `_`, `:`.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

// =============================================================================
// Document Rendering
// =============================================================================

/// Render a document to HTML bytes.
pub fn render_document_bytes<T: RenderEmbed>(
    doc: &Document<T>,
    config: &RenderConfig,
) -> AstResult<Vec<u8>> {
    render_document(doc, config).map(String::into_bytes)
}

/// Render a document to HTML string.
pub fn render_document<T: RenderEmbed>(doc: &Document<T>, config: &RenderConfig) -> AstResult<String> {
    render_node(doc, doc.root(), config)
}

/// Render the subtree rooted at `id` to HTML string.
pub fn render_node<T: RenderEmbed>(
    doc: &Document<T>,
    id: NodeId,
    config: &RenderConfig,
) -> AstResult<String> {
    let node = doc.node(id).ok_or(AstError::UnknownNode(id))?;
    let mut output = String::new();
    render_ref(node, config, &mut output)?;
    debug!(%id, bytes = output.len(), policy = ?config.embed, "rendered subtree");
    Ok(output)
}

/// Render many documents in parallel.
#[cfg(feature = "parallel")]
pub fn render_batch<T>(docs: &[Document<T>], config: &RenderConfig) -> Vec<AstResult<String>>
where
    T: RenderEmbed + Sync,
{
    use rayon::prelude::*;

    docs.par_iter()
        .map(|doc| render_document(doc, config))
        .collect()
}

/// Render a node to HTML.
fn render_ref<T: RenderEmbed>(
    node: NodeRef<'_, T>,
    config: &RenderConfig,
    output: &mut String,
) -> AstResult<()> {
    match node.node() {
        Node::Element(elem) => render_element(node, elem, config, output),
        Node::Text(text) => {
            if text.is_raw() {
                output.push_str(&text.content);
            } else {
                push_escaped_html(&text.content, output);
            }
            Ok(())
        }
        Node::Embedded(embedded) => render_embedded(node.id(), embedded, config, output),
    }
}

/// Render an element and, if it has any, its children.
fn render_element<T: RenderEmbed>(
    node: NodeRef<'_, T>,
    elem: &Element,
    config: &RenderConfig,
    output: &mut String,
) -> AstResult<()> {
    output.push('<');
    output.push_str(&elem.tag);
    render_attrs(&elem.attrs, output);

    if config.emit_spans {
        if let Some(span) = node.source_span() {
            output.push(' ');
            output.push_str(config.span_attr());
            output.push_str("=\"");
            output.push_str(&format!("{}-{}", span.start, span.end));
            output.push('"');
        }
    }

    if elem.is_void() {
        output.push_str(" />");
        return Ok(());
    }
    output.push('>');

    if node.has_children() {
        for child in node.child_nodes() {
            render_ref(child, config, output)?;
        }
    }

    output.push_str("</");
    output.push_str(&elem.tag);
    output.push('>');
    if !config.minify && elem.is_block() {
        output.push('\n');
    }
    Ok(())
}

/// Emit an embedded payload according to the configured policy.
fn render_embedded<T: RenderEmbed>(
    id: NodeId,
    embedded: &Embedded<T>,
    config: &RenderConfig,
    output: &mut String,
) -> AstResult<()> {
    match config.embed {
        EmbedPolicy::Verbatim => embedded.payload().render_embed(output)?,
        EmbedPolicy::Escape => {
            let mut markup = String::new();
            embedded.payload().render_embed(&mut markup)?;
            push_escaped_html(&markup, output);
        }
        EmbedPolicy::Drop => {}
    }
    trace!(%id, policy = ?config.embed, "embedded payload");
    Ok(())
}

/// Render attributes to HTML.
fn render_attrs(attrs: &Attrs, output: &mut String) {
    for (name, value) in attrs {
        output.push(' ');
        output.push_str(name);
        output.push_str("=\"");
        push_escaped_attr(value, output);
        output.push('"');
    }
}

/// Escape HTML special characters.
fn push_escaped_html(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape attribute value special characters.
fn push_escaped_attr(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Text;

    fn sample() -> Document {
        let mut doc = Document::new(Element::new("body"));
        let p = doc.append(doc.root(), Element::new("p")).unwrap();
        doc.append(p, Text::new("Intro & more")).unwrap();
        doc.splice(doc.root(), Payload::html("<b>raw</b>")).unwrap();
        doc
    }

    fn render_payload(payload: impl RenderEmbed) -> AstResult<String> {
        let mut out = String::new();
        payload.render_embed(&mut out)?;
        Ok(out)
    }

    #[test]
    fn test_render_embedded_verbatim() {
        let html = render_document(&sample(), &RenderConfig::PROD).unwrap();
        assert_eq!(html, "<body><p>Intro &amp; more</p><b>raw</b></body>");
    }

    #[test]
    fn test_render_newlines_when_not_minified() {
        let html = render_document(&sample(), &RenderConfig::DEV).unwrap();
        assert_eq!(html, "<body><p>Intro &amp; more</p>\n<b>raw</b></body>\n");
    }

    #[test]
    fn test_render_embed_escape_policy() {
        let config = RenderConfig::PROD.with_embed(EmbedPolicy::Escape);
        let html = render_document(&sample(), &config).unwrap();
        assert!(html.contains("&lt;b&gt;raw&lt;/b&gt;"));
    }

    #[test]
    fn test_render_embed_drop_policy() {
        let config = RenderConfig::PROD.with_embed(EmbedPolicy::Drop);
        let html = render_document(&sample(), &config).unwrap();
        assert_eq!(html, "<body><p>Intro &amp; more</p></body>");
    }

    #[test]
    fn test_render_raw_text() {
        let mut doc: Document = Document::default();
        doc.append(doc.root(), Text::raw("<br>")).unwrap();
        let html = render_document(&doc, &RenderConfig::PROD).unwrap();
        assert_eq!(html, "<body><br></body>");
    }

    #[test]
    fn test_render_hiccup_img() {
        let record = Hiccup::new("img").attr("src", "x.png");
        assert_eq!(render_payload(Payload::Hiccup(record)).unwrap(), "<img src=\"x.png\" />");
    }

    #[test]
    fn test_render_hiccup_shorthand() {
        let record = Hiccup::new("div#main.note")
            .attr("class", "wide")
            .attr("title", "a \"quote\"")
            .child(Hiccup::new("span").text("1 < 2"))
            .raw("<hr/>");
        assert_eq!(
            render_payload(&record).unwrap(),
            "<div id=\"main\" class=\"note wide\" title=\"a &quot;quote&quot;\">\
             <span>1 &lt; 2</span><hr/></div>"
        );
    }

    #[test]
    fn test_render_hiccup_invalid_tag() {
        for tag in ["", "#id", "1div", "di v"] {
            let err = render_payload(Hiccup::new(tag)).unwrap_err();
            assert!(matches!(err, AstError::InvalidPayload(_)), "tag {tag:?}");
        }
    }

    #[test]
    fn test_render_hiccup_invalid_attr() {
        let record = Hiccup::new("a").attr("on click", "x");
        assert!(matches!(render_payload(record), Err(AstError::InvalidPayload(_))));
    }

    #[test]
    fn test_render_bytes() {
        assert_eq!(render_payload(Payload::bytes(b"<p>ok</p>".to_vec())).unwrap(), "<p>ok</p>");
        assert!(matches!(
            render_payload(Payload::bytes(vec![b'<', 0xc3])),
            Err(AstError::NonUtf8Payload { valid_up_to: 1 })
        ));
        assert_eq!(render_payload(Payload::bytes(Vec::new())).unwrap(), "");
    }

    #[test]
    fn test_render_error_propagates() {
        let mut doc: Document = Document::default();
        doc.splice(doc.root(), Payload::Hiccup(Hiccup::new(""))).unwrap();
        assert!(render_document(&doc, &RenderConfig::PROD).is_err());

        // Dropped payloads are never interpreted
        let config = RenderConfig::PROD.with_embed(EmbedPolicy::Drop);
        assert_eq!(render_document(&doc, &config).unwrap(), "<body></body>");
    }

    #[test]
    fn test_render_spans() {
        let src = "# Title";
        let mut doc: Document = Document::with_source(Element::new("body"), src);
        let h = doc.append(doc.root(), Element::new("h1").with_segment(0..2)).unwrap();
        doc.append(h, Text::new("Title").with_segment(2..7)).unwrap();

        let html = render_document(&doc, &RenderConfig::default()).unwrap();
        assert_eq!(html, "<body><h1 data-src=\"0-2\">Title</h1>\n</body>\n");

        let config = RenderConfig::new(true, true).with_span_attr("data-pos");
        let html = render_document(&doc, &config).unwrap();
        assert!(html.contains("data-pos=\"0-2\""));
        assert!(!html.contains("data-src"));
    }

    #[test]
    fn test_render_node_subtree() {
        let doc = sample();
        let p = doc.children(doc.root())[0];
        assert_eq!(
            render_node(&doc, p, &RenderConfig::PROD).unwrap(),
            "<p>Intro &amp; more</p>"
        );
        assert!(matches!(
            render_node(&doc, NodeId::from_raw(50), &RenderConfig::PROD),
            Err(AstError::UnknownNode(_))
        ));
    }

    #[test]
    fn test_render_generic_payload() {
        let mut doc: Document<&str> = Document::new(Element::new("div"));
        doc.splice(doc.root(), "<svg></svg>").unwrap();
        let bytes = render_document_bytes(&doc, &RenderConfig::PROD).unwrap();
        assert_eq!(bytes, b"<div><svg></svg></div>".to_vec());
    }

    #[test]
    fn test_config_fingerprint() {
        assert_ne!(RenderConfig::DEV.fingerprint(), RenderConfig::PROD.fingerprint());
        assert_eq!(
            RenderConfig::default().fingerprint(),
            RenderConfig::new(true, false).fingerprint()
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_render_batch() {
        let docs = vec![sample(), Document::default()];
        let results = render_batch(&docs, &RenderConfig::PROD);
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].as_deref().unwrap(), "<body></body>");
    }
}
