//! Cross-reference resolution.
//!
//! Authors link between sections by putting the target heading's text in an
//! anchor's `href` (`<a href="Getting Started">`). Converters such as Pandoc
//! escape that text (`Getting%20Started`), so hrefs are query-unescaped
//! before they are compared with section titles. Matching anchors are
//! pointed at the target section's page.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use crate::dom::{parse_document, serialize_children};
use crate::error::{Error, Result};
use crate::options::ReferenceMode;

use super::section::{Section, SectionId};

/// What happened to one anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The href named a section title and now points at its page.
    Resolved(SectionId),
    /// No section has this title; the anchor is unchanged.
    Unmatched,
    /// The href has a malformed `%` escape; the anchor is unchanged.
    Undecodable,
}

/// One anchor visited during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Section whose content holds the anchor.
    pub section: SectionId,
    /// The href as written in the source.
    pub href: String,
    pub resolution: Resolution,
}

/// Query-unescape an href: `+` becomes a space and `%XX` becomes a byte.
///
/// Returns `None` for a `%` not followed by two hex digits. The result is
/// raw bytes: escapes such as `%FF` are valid even though no UTF-8 title
/// can match them.
pub fn decode_reference(href: &str) -> Option<Vec<u8>> {
    let bytes = href.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = href.replace('+', " ");
    Some(percent_decode_str(&spaced).collect())
}

/// Rewrite section-title hrefs in every section's content to page paths.
///
/// Titles are matched exactly against [`Title::text`](super::Title::text);
/// when several sections share a title the first one wins. Sections are
/// only updated once every section has been processed, so an error leaves
/// all content as it was. Content without a rewritten anchor is kept
/// byte-for-byte.
pub fn resolve_cross_references(
    sections: &mut [Section],
    mode: ReferenceMode,
) -> Result<Vec<Reference>> {
    let mut by_title: HashMap<&[u8], usize> = HashMap::new();
    for (i, section) in sections.iter().enumerate() {
        by_title.entry(section.title.text.as_bytes()).or_insert(i);
    }

    let mut references = Vec::new();
    let mut rewrites: Vec<(usize, String)> = Vec::new();

    for (i, section) in sections.iter().enumerate() {
        let mut dom = parse_document(&section.content);
        let body = dom.body().ok_or_else(|| {
            Error::Structure(format!("content of {} has no body", section.path))
        })?;

        let mut changed = false;
        for anchor in dom.elements_by_tag(body, "a") {
            let Some(href) = dom.attr(anchor, "href").map(str::to_string) else {
                continue;
            };

            let resolution = match decode_reference(&href) {
                None => {
                    if mode == ReferenceMode::Strict {
                        return Err(Error::ReferenceDecode { href });
                    }
                    log::warn!("{}: cannot decode cross-reference '{href}'", section.path);
                    Resolution::Undecodable
                }
                Some(title) => match by_title.get(title.as_slice()) {
                    Some(&target) => {
                        dom.set_attr(anchor, "href", &sections[target].path);
                        changed = true;
                        Resolution::Resolved(SectionId(target))
                    }
                    None => Resolution::Unmatched,
                },
            };

            references.push(Reference {
                section: SectionId(i),
                href,
                resolution,
            });
        }

        if changed {
            rewrites.push((i, serialize_children(&dom, body)?));
        }
    }

    for (i, content) in rewrites {
        sections[i].content = content;
    }

    let resolved = references
        .iter()
        .filter(|r| matches!(r.resolution, Resolution::Resolved(_)))
        .count();
    log::debug!(
        "resolved {resolved} of {} cross-references",
        references.len()
    );

    Ok(references)
}
