//! Document metadata and preface.

use serde::Serialize;

use crate::dom::{ArenaDom, NodeId, serialize_nodes};
use crate::error::{Error, Result};

/// Book metadata read from the document head.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    /// `<meta name="author">`, empty when absent.
    pub author: String,
    /// `<meta name="dcterms.date">`, empty when absent.
    pub date: String,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }
}

/// Read title, author and date from `head`.
pub fn extract_metadata(dom: &ArenaDom, head: NodeId) -> Result<Metadata> {
    if !dom.is_element_named(head, "head") {
        return Err(Error::Structure(
            "passed HTML node is not a 'head' element".to_string(),
        ));
    }

    let title = dom
        .children(head)
        .find(|&child| dom.is_element_named(child, "title"))
        .map(|t| dom.text_content(t))
        .ok_or_else(|| Error::MissingElement("title".to_string()))?;

    Ok(Metadata {
        title,
        author: meta_content(dom, head, "author").unwrap_or_default(),
        date: meta_content(dom, head, "dcterms.date").unwrap_or_default(),
    })
}

/// `content` of the first `<meta name="{name}">` that has one.
fn meta_content(dom: &ArenaDom, head: NodeId, name: &str) -> Option<String> {
    dom.elements_by_tag(head, "meta")
        .into_iter()
        .filter(|&meta| dom.attr(meta, "name") == Some(name))
        .find_map(|meta| dom.attr(meta, "content"))
        .map(str::to_string)
}

/// Markup of the body before the first heading, in document order.
///
/// Every body child counts, the first one included. A wrapper holding the
/// first heading contributes the nodes that precede the heading.
pub fn extract_preface(dom: &ArenaDom, body: NodeId) -> Result<String> {
    if !dom.is_element_named(body, "body") {
        return Err(Error::Structure(
            "passed HTML node is not a 'body' element".to_string(),
        ));
    }

    let mut nodes = Vec::new();
    for child in dom.children(body) {
        if dom.collect_until_heading(child, &mut nodes) {
            break;
        }
    }
    serialize_nodes(dom, &nodes)
}
