//! Page synthesis.
//!
//! Each function builds the template context for one page kind and renders
//! it. Section titles and content are already markup; templates insert them
//! with `|safe`. Metadata and link labels are plain text and get escaped.

use minijinja::context;
use serde::Serialize;

use crate::book::{Book, Section, SectionId};
use crate::error::Result;

use super::templates::Templates;

/// A link to one section page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: String,
    pub path: String,
}

impl Link {
    fn to(section: &Section) -> Self {
        Self {
            label: label(section),
            path: section.path.clone(),
        }
    }
}

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub label: String,
    pub path: String,
    pub children: Vec<TocEntry>,
}

/// The `index.html` page: metadata, preface and entry links.
pub fn render_index(templates: &Templates, book: &Book) -> Result<String> {
    templates.render(
        "index.html",
        context! {
            metadata => &book.metadata,
            preface => &book.preface,
            first => book.sections.first().map(Link::to),
        },
    )
}

/// The `map.html` page: the table of contents, levels 1-3.
pub fn render_map(templates: &Templates, book: &Book) -> Result<String> {
    templates.render(
        "map.html",
        context! {
            metadata => &book.metadata,
            toc => toc(book, &book.roots()),
        },
    )
}

fn toc(book: &Book, ids: &[SectionId]) -> Vec<TocEntry> {
    ids.iter()
        .filter_map(|&id| book.section(id))
        .map(|section| TocEntry {
            label: label(section),
            path: section.path.clone(),
            children: toc(book, &section.nav.children),
        })
        .collect()
}

/// One section page with breadcrumbs, content, sub-sections and pager.
pub fn render_page(templates: &Templates, book: &Book, section: &Section) -> Result<String> {
    let nav = &section.nav;
    let link = |id: Option<SectionId>| id.and_then(|id| book.section(id)).map(Link::to);

    templates.render(
        "page.html",
        context! {
            metadata => &book.metadata,
            section => section,
            label => label(section),
            breadcrumbs => links(book, nav.ancestor_ids()),
            children => links(book, nav.children.iter().copied()),
            previous => link(nav.previous),
            up => link(nav.parent()),
            next => link(nav.next),
        },
    )
}

fn links(book: &Book, ids: impl Iterator<Item = SectionId>) -> Vec<Link> {
    ids.filter_map(|id| book.section(id)).map(Link::to).collect()
}

/// Link text for a section: `1.2 Title`, or just the title when unnumbered.
pub fn label(section: &Section) -> String {
    if section.title.prefix.is_empty() {
        section.title.text.clone()
    } else {
        format!("{} {}", section.title.prefix, section.title.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<html><head><title>Q &amp; A</title>
<meta name="author" content="Sam"></head><body>
<p>Hello.</p>
<h1>One</h1><p>first</p>
<h2>One.A</h2><p>sub</p>
<h2>One.B</h2>
<h1>Two</h1>
</body></html>"#;

    fn book() -> Book {
        Book::from_html(DOC).unwrap()
    }

    #[test]
    fn test_index_has_metadata_and_preface() {
        let html = render_index(&Templates::builtin(), &book()).unwrap();

        assert!(html.contains("<title>Q &amp; A</title>"));
        assert!(html.contains("<p class=\"author\">Sam</p>"));
        assert!(!html.contains("class=\"date\""));
        assert!(html.contains("<p>Hello.</p>"));
        assert!(html.contains("<a rel=\"next\" href=\"page1.html\">1 One</a>"));
    }

    #[test]
    fn test_toc_nests_children() {
        let book = book();
        let entries = toc(&book, &book.roots());

        let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["1 One", "2 Two"]);
        let sub: Vec<_> = entries[0].children.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(sub, vec!["page2.html", "page3.html"]);
        assert!(entries[1].children.is_empty());
    }

    #[test]
    fn test_map_nests_children() {
        let html = render_map(&Templates::builtin(), &book()).unwrap();

        let one = html.find("<a href=\"page1.html\">1 One</a>").unwrap();
        let inner = html[one..].find("<ul>").unwrap() + one;
        let one_a = html.find("<a href=\"page2.html\">1.1 One.A</a>").unwrap();
        let two = html.find("<a href=\"page4.html\">2 Two</a>").unwrap();
        assert!(one < inner && inner < one_a && one_a < two, "{html}");
        assert!(html.contains("<a href=\"page3.html\">1.2 One.B</a>"));
    }

    #[test]
    fn test_page_navigation() {
        let book = book();
        let html = render_page(&Templates::builtin(), &book, &book.sections[1]).unwrap();

        assert!(html.contains("<title>1.1 One.A - Q &amp; A</title>"));
        assert!(html.contains("&rsaquo; <a href=\"page1.html\">1 One</a></nav>"));
        assert!(html.contains("<h2><span class=\"prefix\">1.1</span> One.A</h2>"));
        assert!(html.contains("<p>sub</p>"));
        assert!(html.contains("<a rel=\"up\" href=\"page1.html\">1 One</a>"));
        assert!(html.contains("<a rel=\"next\" href=\"page3.html\">1.2 One.B</a>"));
        assert!(!html.contains("rel=\"prev\""));
    }

    #[test]
    fn test_page_lists_children() {
        let book = book();
        let html = render_page(&Templates::builtin(), &book, &book.sections[0]).unwrap();

        assert!(html.contains("<ul class=\"children\">"));
        assert!(html.contains("<li><a href=\"page2.html\">1.1 One.A</a></li>"));
        assert!(html.contains("<a rel=\"next\" href=\"page4.html\">2 Two</a>"));
    }

    #[test]
    fn test_title_markup_is_not_escaped() {
        let book = Book::from_html("<title>t</title><h1>Say <em>hi</em></h1>").unwrap();
        let html = render_page(&Templates::builtin(), &book, &book.sections[0]).unwrap();

        assert!(html.contains("<h1><span class=\"prefix\">1</span> Say <em>hi</em></h1>"));
        assert!(html.contains("<title>1 Say hi - t</title>"));
    }

    #[test]
    fn test_label_for_unnumbered_section() {
        let book = Book::from_html("<title>t</title><h4>Deep</h4>").unwrap();
        assert_eq!(label(&book.sections[0]), "Deep");
    }
}
