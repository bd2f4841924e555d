//! Conversion options.
//!
//! Defaults reproduce the long-standing output of the tool, quirks included,
//! so existing books keep their numbering and links.

use std::path::PathBuf;

/// How section numbering counters are reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberingStyle {
    /// A new `h1` resets only the level-2 counter. The level-3 counter
    /// carries over when the next chapter has no `h2` before its first `h3`
    /// (`h1 h2 h3 h1 h3` numbers as `1 1.1 1.1.1 2 2.0.2`).
    #[default]
    Legacy,
    /// A new `h1` resets both deeper counters (`... 2 2.0.1`).
    Strict,
}

/// What to do with a cross-reference `href` that cannot be percent-decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceMode {
    /// Leave the anchor untouched and keep going.
    #[default]
    Lenient,
    /// Fail the conversion with [`Error::ReferenceDecode`](crate::Error::ReferenceDecode).
    Strict,
}

/// Options for turning a document into a [`Book`](crate::Book).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub numbering: NumberingStyle,
    pub references: ReferenceMode,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_numbering(mut self, numbering: NumberingStyle) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn with_references(mut self, references: ReferenceMode) -> Self {
        self.references = references;
        self
    }
}

/// Where and how [`write_book`](crate::export::write_book) writes pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Removed and recreated on every run.
    pub output_dir: PathBuf,
    /// Copied into `output_dir` before pages are written.
    pub static_dir: Option<PathBuf>,
    /// Overrides for the built-in page templates.
    pub template_dir: Option<PathBuf>,
}

impl ExportOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            static_dir: None,
            template_dir: None,
        }
    }

    pub fn with_static_dir(mut self, static_dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(static_dir.into());
        self
    }

    pub fn with_template_dir(mut self, template_dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(template_dir.into());
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new("out")
    }
}
