//! Error types for bookprint operations.

use thiserror::Error;

/// Errors that can occur while segmenting a document or writing a book.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A node was not the root kind an operation expected (`head`, `body`).
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// An element handled as a heading has no level 1-6.
    #[error("Invalid heading: {0}")]
    HeadingLevel(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[source] std::io::Error),

    /// Only produced with [`ReferenceMode::Strict`](crate::ReferenceMode::Strict).
    #[error("Cannot decode cross-reference '{href}'")]
    ReferenceDecode { href: String },

    #[error("Missing required element: {0}")]
    MissingElement(String),

    /// A page template failed to load or render.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
