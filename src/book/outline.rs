//! Navigation between sections.
//!
//! A document only records a flat run of headings tagged with a level. The
//! book needs the tree those levels imply: siblings to page back and forth
//! through, the chain of enclosing chapters, and the sub-sections listed on
//! each page. All relations are indices into the flat section list.
//!
//! Relations for a section `S`:
//!
//! - `previous` / `next`: the nearest section with the same level, unless a
//!   shallower heading comes first (that heading closes `S`'s chapter).
//! - `ancestors`: one slot per level above `S` (slot = level - 1). Each slot
//!   holds the latest earlier section of that level; slots for levels the
//!   document skipped stay empty.
//! - `children`: sections exactly one level deeper inside `S`'s span. Only
//!   levels 1-3 form the navigable tree, so sections at level 3 and below
//!   never have children.

use serde::Serialize;

use super::section::{Section, SectionId};

/// Number of heading levels.
const LEVELS: usize = 6;

/// Deepest level that can appear as a child in the navigation tree.
pub const TREE_DEPTH: u8 = 3;

/// Navigation links of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub next: Option<SectionId>,
    pub previous: Option<SectionId>,
    /// Indexed by `level - 1`; trailing empty slots are trimmed.
    pub ancestors: Vec<Option<SectionId>>,
    pub children: Vec<SectionId>,
}

impl Navigation {
    /// The closest enclosing section, if any.
    pub fn parent(&self) -> Option<SectionId> {
        self.ancestors.iter().rev().flatten().next().copied()
    }

    /// Present ancestors, outermost first.
    pub fn ancestor_ids(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.ancestors.iter().flatten().copied()
    }
}

fn slot(level: u8) -> usize {
    debug_assert!((1..=6).contains(&level), "heading level out of range: {level}");
    usize::from(level).clamp(1, LEVELS) - 1
}

/// Compute navigation for a run of heading levels given in document order.
///
/// Two linear passes with per-level tables: a forward pass for `previous`,
/// `ancestors` and `children`, a backward pass for `next`.
pub fn compute_navigation(levels: &[u8]) -> Vec<Navigation> {
    let mut navs = vec![Navigation::default(); levels.len()];

    // Latest section seen at each level, over the whole prefix.
    let mut latest: [Option<usize>; LEVELS] = [None; LEVELS];
    // Candidate `previous` per level; cleared when a shallower heading appears.
    let mut previous: [Option<usize>; LEVELS] = [None; LEVELS];
    // Sections whose span is still open, per level.
    let mut open: [Option<usize>; LEVELS] = [None; LEVELS];

    for (i, &level) in levels.iter().enumerate() {
        let s = slot(level);

        let mut ancestors: Vec<Option<SectionId>> =
            latest[..s].iter().map(|o| o.map(SectionId)).collect();
        while ancestors.last().is_some_and(Option::is_none) {
            ancestors.pop();
        }
        navs[i].ancestors = ancestors;

        navs[i].previous = previous[s].map(SectionId);
        previous[s + 1..].fill(None);
        previous[s] = Some(i);

        // A heading at this level ends every span at this level or deeper.
        open[s..].fill(None);
        if level <= TREE_DEPTH
            && s > 0
            && let Some(parent) = open[s - 1]
        {
            navs[parent].children.push(SectionId(i));
        }
        open[s] = Some(i);

        latest[s] = Some(i);
    }

    let mut next: [Option<usize>; LEVELS] = [None; LEVELS];
    for (i, &level) in levels.iter().enumerate().rev() {
        let s = slot(level);
        navs[i].next = next[s].map(SectionId);
        next[s + 1..].fill(None);
        next[s] = Some(i);
    }

    navs
}

/// Fill in [`Section::nav`] for every section.
///
/// Depends only on levels and order, so running it again changes nothing.
pub fn resolve_hierarchy(sections: &mut [Section]) {
    let levels: Vec<u8> = sections.iter().map(|s| s.level).collect();
    for (section, nav) in sections.iter_mut().zip(compute_navigation(&levels)) {
        section.nav = nav;
    }
    log::debug!("resolved navigation for {} sections", sections.len());
}

/// Top entries of the table of contents: sections of levels 1-3 that are
/// nobody's child (normally the `h1`s, plus any orphaned `h2`/`h3` that
/// appear before the first enclosing heading).
pub fn roots(sections: &[Section]) -> Vec<SectionId> {
    let mut is_child = vec![false; sections.len()];
    for section in sections {
        for child in &section.nav.children {
            if let Some(flag) = is_child.get_mut(child.0) {
                *flag = true;
            }
        }
    }

    sections
        .iter()
        .enumerate()
        .filter(|(i, s)| s.level <= TREE_DEPTH && !is_child[*i])
        .map(|(i, _)| SectionId(i))
        .collect()
}
