//! Book conversion tests.
//!
//! End-to-end checks through the public API: numbering, navigation and
//! cross-reference rewriting on whole documents.

use bookprint::{
    Book, Error, NumberingStyle, Options, ReferenceMode, Resolution, SectionId,
};

fn doc(body: &str) -> String {
    format!("<!DOCTYPE html><html><head><title>Test</title></head><body>{body}</body></html>")
}

fn prefixes(book: &Book) -> Vec<&str> {
    book.sections.iter().map(|s| s.title.prefix.as_str()).collect()
}

// ============================================================================
// Sections
// ============================================================================

#[test]
fn test_one_section_per_heading() {
    let book = Book::from_html(&doc(
        "<h1>A</h1><p>a</p><h2>B</h2><h4>C</h4><h6>D</h6><h1>E</h1>",
    ))
    .unwrap();

    assert_eq!(book.sections.len(), 5);
    for (i, section) in book.sections.iter().enumerate() {
        assert_eq!(section.id, i + 1);
        assert_eq!(section.path, format!("page{}.html", i + 1));
        assert_eq!(section.index(), SectionId(i));
    }

    let levels: Vec<u8> = book.sections.iter().map(|s| s.level).collect();
    assert_eq!(levels, vec![1, 2, 4, 6, 1]);
}

#[test]
fn test_numbering_siblings() {
    let book = Book::from_html(&doc(
        "<h1>a</h1><h2>b</h2><h2>c</h2><h1>d</h1><h2>e</h2>",
    ))
    .unwrap();
    assert_eq!(prefixes(&book), vec!["1", "1.1", "1.2", "2", "2.1"]);
}

#[test]
fn test_numbering_level_three_carries_over() {
    let html = doc("<h1>a</h1><h2>b</h2><h3>c</h3><h1>d</h1><h3>e</h3>");

    let legacy = Book::from_html(&html).unwrap();
    assert_eq!(prefixes(&legacy), vec!["1", "1.1", "1.1.1", "2", "2.0.2"]);

    let strict = Book::from_html_with(
        &html,
        Options::new().with_numbering(NumberingStyle::Strict),
    )
    .unwrap();
    assert_eq!(prefixes(&strict), vec!["1", "1.1", "1.1.1", "2", "2.0.1"]);
}

#[test]
fn test_deep_headings_are_unnumbered() {
    let book = Book::from_html(&doc("<h1>a</h1><h4>b</h4><h5>c</h5>")).unwrap();
    assert_eq!(prefixes(&book), vec!["1", "", ""]);
}

#[test]
fn test_title_text_and_markup() {
    let book = Book::from_html(&doc(
        "<h1>  Getting\n   <em>Started</em> </h1><p>body</p>",
    ))
    .unwrap();

    let title = &book.sections[0].title;
    assert_eq!(title.text, "Getting Started");
    assert!(title.html.contains("<em>Started</em>"));
    assert_eq!(book.sections[0].content, "<p>body</p>");
}

#[test]
fn test_no_content_lost_around_wrapped_headings() {
    let book = Book::from_html(&doc(
        r#"<main><p>intro text</p><div class="hdr"><h1>A</h1></div><p>alpha text</p>
           <section><p>more alpha</p><h2>B</h2><p>beta</p></section></main><p>tail</p>"#,
    ))
    .unwrap();

    assert_eq!(book.preface, "<p>intro text</p>");

    let a = &book.sections[0].content;
    assert!(a.contains("<p>alpha text</p>"));
    assert!(a.contains("<p>more alpha</p>"));
    assert!(!a.contains("beta"));

    let b = &book.sections[1].content;
    assert!(b.contains("<p>beta</p>"));
    assert!(b.ends_with("<p>tail</p>"));
}

#[test]
fn test_document_without_headings() {
    let book = Book::from_html(&doc("<p>Just text.</p>")).unwrap();

    assert!(book.sections.is_empty());
    assert!(book.roots().is_empty());
    assert_eq!(book.preface, "<p>Just text.</p>");
}

#[test]
fn test_missing_title_is_an_error() {
    let err = Book::from_html("<html><head></head><body><h1>A</h1></body></html>").unwrap_err();
    assert!(matches!(err, Error::MissingElement(_)));
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_links() {
    let book = Book::from_html(&doc(
        "<h1>A</h1><h2>A1</h2><h2>A2</h2><h3>A2x</h3><h1>B</h1><h2>B1</h2>",
    ))
    .unwrap();
    let nav = |i: usize| &book.sections[i].nav;

    assert_eq!(nav(0).next, Some(SectionId(4)));
    assert_eq!(nav(0).previous, None);
    assert_eq!(nav(0).children, vec![SectionId(1), SectionId(2)]);

    assert_eq!(nav(1).next, Some(SectionId(2)));
    assert_eq!(nav(2).previous, Some(SectionId(1)));
    assert_eq!(nav(2).next, None);
    assert_eq!(nav(2).children, vec![SectionId(3)]);

    assert_eq!(nav(3).ancestors, vec![Some(SectionId(0)), Some(SectionId(2))]);
    assert!(nav(3).children.is_empty());

    assert_eq!(nav(4).previous, Some(SectionId(0)));
    assert_eq!(nav(5).parent(), Some(SectionId(4)));
    assert_eq!(nav(5).previous, None);
}

#[test]
fn test_skipped_level_leaves_empty_slot() {
    let book = Book::from_html(&doc("<h1>A</h1><h3>C</h3><h4>D</h4><h2>B</h2>")).unwrap();

    let c = &book.sections[1].nav;
    assert_eq!(c.ancestors, vec![Some(SectionId(0))]);
    assert_eq!(c.parent(), Some(SectionId(0)));

    let d = &book.sections[2].nav;
    assert_eq!(
        d.ancestors,
        vec![Some(SectionId(0)), None, Some(SectionId(1))]
    );
    assert_eq!(d.ancestor_ids().collect::<Vec<_>>(), vec![SectionId(0), SectionId(1)]);

    // Only h2 sections are children of an h1.
    assert_eq!(book.sections[0].nav.children, vec![SectionId(3)]);
}

#[test]
fn test_ancestor_slots_take_latest_section_of_each_level() {
    let book = Book::from_html(&doc("<h1>A</h1><h2>B</h2><h1>C</h1><h3>D</h3>")).unwrap();

    // The level-2 slot still points into the previous chapter.
    assert_eq!(
        book.sections[3].nav.ancestors,
        vec![Some(SectionId(2)), Some(SectionId(1))]
    );
}

#[test]
fn test_resolving_hierarchy_again_is_stable() {
    let mut book = Book::from_html(&doc(
        "<h2>x</h2><h1>A</h1><h3>y</h3><h2>B</h2><h3>z</h3><h1>C</h1>",
    ))
    .unwrap();
    let before: Vec<_> = book.sections.iter().map(|s| s.nav.clone()).collect();

    bookprint::book::resolve_hierarchy(&mut book.sections);

    let after: Vec<_> = book.sections.iter().map(|s| s.nav.clone()).collect();
    assert_eq!(before, after);
}

// ============================================================================
// Cross-references
// ============================================================================

#[test]
fn test_cross_reference_rewritten_to_page() {
    let book = Book::from_html(&doc(
        r#"<h1>Getting Started</h1><p>Hello.</p>
           <h1>Usage</h1><p>See <a href="Getting%20Started">the start</a>
           or <a href="Nowhere">nothing</a>.</p>"#,
    ))
    .unwrap();

    let usage = &book.sections[1].content;
    assert!(usage.contains(r#"<a href="page1.html">the start</a>"#));
    assert!(usage.contains(r#"<a href="Nowhere">nothing</a>"#));
}

#[test]
fn test_malformed_reference_does_not_abort() {
    let book = Book::from_html(&doc(
        r#"<h1>A</h1><p><a href="50%">half</a> <a href="A">self</a></p>"#,
    ))
    .unwrap();

    let content = &book.sections[0].content;
    assert!(content.contains(r#"<a href="50%">half</a>"#));
    assert!(content.contains(r#"<a href="page1.html">self</a>"#));
}

#[test]
fn test_strict_references_report_malformed_href() {
    let err = Book::from_html_with(
        &doc(r#"<h1>A</h1><p><a href="50%">half</a></p>"#),
        Options::new().with_references(ReferenceMode::Strict),
    )
    .unwrap_err();

    assert!(matches!(err, Error::ReferenceDecode { ref href } if href == "50%"));
}

#[test]
fn test_reference_outcomes_are_reported() {
    let mut book = Book::from_html(&doc(
        r#"<h1>A</h1><p><a href="B">b</a> <a href="%zz">bad</a> <a href="Z">z</a></p><h1>B</h1>"#,
    ))
    .unwrap();

    // Content was already rewritten; a second pass sees the page path.
    let refs =
        bookprint::book::resolve_cross_references(&mut book.sections, ReferenceMode::Lenient)
            .unwrap();
    let outcomes: Vec<_> = refs.iter().map(|r| r.resolution.clone()).collect();

    assert_eq!(
        outcomes,
        vec![
            Resolution::Unmatched,
            Resolution::Undecodable,
            Resolution::Unmatched
        ]
    );
    assert_eq!(refs[0].href, "page2.html");
}

// ============================================================================
// Input decoding
// ============================================================================

#[test]
fn test_open_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("doc.html");
    std::fs::write(&path, doc("<h1>Only</h1>")).unwrap();

    let book = Book::open(&path, Options::default()).unwrap();
    assert_eq!(book.metadata.title, "Test");
    assert_eq!(book.sections[0].title.text, "Only");
}

#[test]
fn test_open_missing_file() {
    let err = Book::open("does/not/exist.html", Options::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
