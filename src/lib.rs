//! # bookprint
//!
//! Turn one long HTML document into a small website: one page per section,
//! a table of contents and a title page.
//!
//! ## Features
//!
//! - Splits the body at every `h1`-`h6` heading
//! - Numbers sections (`1`, `1.2`, `1.2.3`) down to level 3
//! - Links each section to its next and previous siblings, its ancestors
//!   and its children
//! - Rewrites anchors whose `href` is a section title (`<a href="Getting%20Started">`)
//!   to point at that section's page
//! - Renders pages through minijinja templates, overridable per name from
//!   a template directory
//!
//! ## Quick Start
//!
//! ```no_run
//! use bookprint::{Book, ExportOptions, Options};
//!
//! let book = Book::open("manual.html", Options::default()).unwrap();
//! bookprint::write_book(&book, &ExportOptions::new("out")).unwrap();
//! ```
//!
//! ## Working with Books
//!
//! ```
//! use bookprint::{Book, SectionId};
//!
//! let html = r#"<html><head><title>Guide</title></head><body>
//!   <h1>Install</h1><p>Run the installer.</p>
//!   <h2>Linux</h2><p>Use the package.</p>
//!   <h1>Usage</h1><p>See <a href="Install">installing</a>.</p>
//! </body></html>"#;
//!
//! let book = Book::from_html(html).unwrap();
//! assert_eq!(book.sections[1].title.prefix, "1.1");
//! assert_eq!(book.sections[1].nav.parent(), Some(SectionId(0)));
//! assert!(book.sections[2].content.contains(r#"href="page1.html""#));
//! ```

pub mod book;
pub mod dom;
pub mod error;
pub mod export;
pub mod options;
pub(crate) mod util;

pub use book::{Book, Metadata, Navigation, Reference, Resolution, Section, SectionId, Title};
pub use error::{Error, Result};
pub use export::{Templates, write_book};
pub use options::{ExportOptions, NumberingStyle, Options, ReferenceMode};
