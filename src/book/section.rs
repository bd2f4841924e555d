//! Section extraction.
//!
//! Every heading in the body becomes one [`Section`]: the heading itself
//! supplies level and title, and everything after it in document order (up
//! to the next heading) supplies the page content.

use serde::Serialize;

use crate::dom::{ArenaDom, NodeId, serialize_children, serialize_nodes};
use crate::error::{Error, Result};
use crate::options::NumberingStyle;

use super::outline::Navigation;

/// Index of a section in [`Book::sections`](crate::Book::sections).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionId(pub usize);

/// Heading of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    /// Dotted number such as `1.2`; empty for levels 4-6.
    pub prefix: String,
    /// Inner markup of the heading element.
    pub html: String,
    /// Plain text with whitespace runs collapsed to single spaces.
    pub text: String,
}

/// One page of the book, cut at a heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// 1-based position among all headings, in document order.
    pub id: usize,
    /// Heading level, 1-6.
    pub level: u8,
    /// Output file name, derived from `id`.
    pub path: String,
    pub title: Title,
    /// Markup between this heading and the next one.
    pub content: String,
    /// Filled in by [`resolve_hierarchy`](super::resolve_hierarchy).
    pub nav: Navigation,
}

impl Section {
    /// Position of this section in the flat section list.
    pub fn index(&self) -> SectionId {
        SectionId(self.id - 1)
    }
}

/// Output file name for the section with the given sequence id.
pub fn page_path(id: usize) -> String {
    format!("page{id}.html")
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Running counters for levels 1-3.
#[derive(Debug, Clone, Default)]
pub struct Numbering {
    style: NumberingStyle,
    h1: u32,
    h2: u32,
    h3: u32,
}

impl Numbering {
    pub fn new(style: NumberingStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// Advance the counters for a heading of `level` and return its prefix.
    pub fn next(&mut self, level: u8) -> String {
        match level {
            1 => {
                self.h1 += 1;
                self.h2 = 0;
                if self.style == NumberingStyle::Strict {
                    self.h3 = 0;
                }
                format!("{}", self.h1)
            }
            2 => {
                self.h2 += 1;
                self.h3 = 0;
                format!("{}.{}", self.h1, self.h2)
            }
            3 => {
                self.h3 += 1;
                format!("{}.{}.{}", self.h1, self.h2, self.h3)
            }
            _ => String::new(),
        }
    }
}

/// Extract one section per heading below `body`, in document order.
///
/// Headings may sit at any depth (for example inside `<section>` wrappers).
/// A heading's content is every node that follows it in document order,
/// up to the next heading. Wrappers holding the next heading are entered
/// and only their part before that heading is kept.
pub fn extract_sections(
    dom: &ArenaDom,
    body: NodeId,
    numbering: NumberingStyle,
) -> Result<Vec<Section>> {
    if !dom.is_element_named(body, "body") {
        return Err(Error::Structure(
            "passed HTML node is not a 'body' element".to_string(),
        ));
    }

    let headings: Vec<NodeId> = dom
        .descendants(body)
        .filter(|&id| dom.is_heading(id))
        .collect();

    let mut counters = Numbering::new(numbering);
    let mut sections = Vec::with_capacity(headings.len());

    for (index, &heading) in headings.iter().enumerate() {
        let id = index + 1;
        let level = dom.heading_level(heading).ok_or_else(|| {
            let tag = dom
                .element_name(heading)
                .map(|n| n.to_string())
                .unwrap_or_default();
            Error::HeadingLevel(format!("<{tag}> has no heading level"))
        })?;

        let text = normalize_whitespace(&dom.text_content(heading));
        let html = serialize_children(dom, heading)?;

        let content = serialize_nodes(dom, &content_nodes(dom, body, heading))?;

        sections.push(Section {
            id,
            level,
            path: page_path(id),
            title: Title {
                prefix: counters.next(level),
                html,
                text,
            },
            content,
            nav: Navigation::default(),
        });
    }

    log::debug!("extracted {} sections", sections.len());
    Ok(sections)
}

/// Nodes after `heading` in document order, up to the next heading.
///
/// When the heading's own siblings run out, the walk continues with the
/// siblings of each enclosing element until `body` is reached.
fn content_nodes(dom: &ArenaDom, body: NodeId, heading: NodeId) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    let mut cursor = heading;
    while cursor != body {
        for sibling in dom.following_siblings(cursor) {
            if dom.collect_until_heading(sibling, &mut nodes) {
                return nodes;
            }
        }
        match dom.parent(cursor) {
            Some(parent) => cursor = parent,
            None => break,
        }
    }
    nodes
}
