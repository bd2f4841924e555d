//! The book model: one HTML document split into sections.
//!
//! [`Book::from_html`] runs the whole pipeline: parse, read metadata and
//! preface, cut the body into [`Section`]s at each heading, link the
//! sections into a navigable outline, then point section-title hrefs at the
//! generated pages.

mod metadata;
mod outline;
mod section;
mod xref;

pub use metadata::{Metadata, extract_metadata, extract_preface};
pub use outline::{Navigation, TREE_DEPTH, compute_navigation, resolve_hierarchy, roots};
pub use section::{
    Numbering, Section, SectionId, Title, extract_sections, normalize_whitespace, page_path,
};
pub use xref::{Reference, Resolution, decode_reference, resolve_cross_references};

use std::path::Path;

use serde::Serialize;

use crate::dom::parse_document;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::util::{decode_text, extract_meta_charset};

/// A document converted into linked sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Book {
    pub metadata: Metadata,
    /// Body markup before the first heading.
    pub preface: String,
    /// Sections in document order; navigation indices point into this list.
    pub sections: Vec<Section>,
}

impl Book {
    /// Convert an HTML document with default options.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with(html, Options::default())
    }

    /// Convert an HTML document.
    pub fn from_html_with(html: &str, options: Options) -> Result<Self> {
        let dom = parse_document(html);

        let head = dom.head().ok_or_else(|| {
            Error::Structure("document has no 'head' element".to_string())
        })?;
        let body = dom.body().ok_or_else(|| {
            Error::Structure("document has no 'body' element".to_string())
        })?;

        let metadata = extract_metadata(&dom, head)?;
        let preface = extract_preface(&dom, body)?;

        let mut sections = extract_sections(&dom, body, options.numbering)?;
        resolve_hierarchy(&mut sections);
        resolve_cross_references(&mut sections, options.references)?;

        log::info!(
            "'{}': {} sections",
            metadata.title,
            sections.len()
        );

        Ok(Self {
            metadata,
            preface,
            sections,
        })
    }

    /// Convert raw bytes, detecting the text encoding.
    pub fn from_bytes(bytes: &[u8], options: Options) -> Result<Self> {
        let html = decode_text(bytes, extract_meta_charset(bytes));
        Self::from_html_with(&html, options)
    }

    /// Read and convert an HTML file.
    pub fn open(path: impl AsRef<Path>, options: Options) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, options)
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    /// Top-level entries of the table of contents.
    pub fn roots(&self) -> Vec<SectionId> {
        roots(&self.sections)
    }

    /// Find the first section with the given title text.
    pub fn find_by_title(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title.text == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{NumberingStyle, ReferenceMode};

    const DOC: &str = r#"<html><head><title>Guide</title></head><body>
<p>Welcome.</p>
<h1>Getting Started</h1>
<p>Install it.</p>
<h2>Requirements</h2>
<h3>Hardware</h3>
<h1>Usage</h1>
<p>Read <a href="Getting%20Started">the intro</a> first.</p>
<h3>Tips</h3>
</body></html>"#;

    #[test]
    fn test_pipeline() {
        let book = Book::from_html(DOC).unwrap();

        assert_eq!(book.metadata.title, "Guide");
        assert!(book.preface.contains("<p>Welcome.</p>"));

        let prefixes: Vec<_> = book.sections.iter().map(|s| s.title.prefix.as_str()).collect();
        assert_eq!(prefixes, vec!["1", "1.1", "1.1.1", "2", "2.0.2"]);

        let usage = book.find_by_title("Usage").unwrap();
        assert!(usage.content.contains(r#"href="page1.html""#));
        assert_eq!(usage.nav.previous, Some(SectionId(0)));
        assert!(usage.nav.children.is_empty());

        // The h3 under "Usage" has no h2 to hang from, so it is listed at the top.
        assert_eq!(book.roots(), vec![SectionId(0), SectionId(3), SectionId(4)]);
    }

    #[test]
    fn test_options_are_applied() {
        let options = Options::new()
            .with_numbering(NumberingStyle::Strict)
            .with_references(ReferenceMode::Lenient);
        let book = Book::from_html_with(DOC, options).unwrap();

        assert_eq!(book.sections[4].title.prefix, "2.0.1");
    }

    #[test]
    fn test_from_bytes_decodes_legacy_charset() {
        // "Café" in Windows-1252.
        let mut bytes = b"<html><head><meta charset=\"windows-1252\"><title>Caf".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b"</title></head><body><h1>A</h1></body></html>");

        let book = Book::from_bytes(&bytes, Options::default()).unwrap();
        assert_eq!(book.metadata.title, "Café");
    }

    #[test]
    fn test_frameset_document_has_no_body() {
        let err = Book::from_html(
            "<html><head><title>t</title></head><frameset><frame src=a.html></frameset></html>",
        )
        .unwrap_err();
        assert!(matches!(err, Error::Structure(_)));
    }

    #[test]
    fn test_section_lookup() {
        let book = Book::from_html(DOC).unwrap();
        let id = book.sections[2].index();
        assert_eq!(book.section(id).unwrap().title.text, "Hardware");
        assert!(book.section(SectionId(99)).is_none());
    }
}
