//! Write a [`Book`] out as a directory of linked HTML pages.
//!
//! The output directory holds `index.html`, `map.html` and one
//! `page<N>.html` per section, plus a copy of the optional static
//! directory (stylesheets, images). Pages come from [`Templates`], either
//! the built-in ones or a user template directory.

mod pages;
mod templates;

pub use pages::{Link, TocEntry, label, render_index, render_map, render_page};
pub use templates::{Templates, builtin_template};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::book::Book;
use crate::error::{Error, Result};
use crate::options::ExportOptions;

/// Write the book's pages into `options.output_dir`.
///
/// Any existing output directory is removed first. The static and
/// template directories must not overlap the output directory; this is
/// checked, and every page rendered, before anything is removed.
pub fn write_book(book: &Book, options: &ExportOptions) -> Result<()> {
    let out = options.output_dir.as_path();
    check_directories(options)?;

    let templates = match &options.template_dir {
        Some(dir) => Templates::from_dir(dir)?,
        None => Templates::builtin(),
    };

    let mut pages = Vec::with_capacity(book.sections.len() + 2);
    pages.push(("index.html".to_string(), render_index(&templates, book)?));
    pages.push(("map.html".to_string(), render_map(&templates, book)?));
    for section in &book.sections {
        pages.push((section.path.clone(), render_page(&templates, book, section)?));
    }

    prepare_output_dir(out)?;

    if let Some(static_dir) = &options.static_dir {
        copy_dir_all(static_dir, out)?;
        log::debug!("copied static files from {}", static_dir.display());
    }

    for (name, html) in &pages {
        fs::write(out.join(name), html)?;
    }

    log::info!("wrote {} pages to {}", pages.len(), out.display());
    Ok(())
}

/// Reject static or template directories that are the output directory,
/// lie inside it or contain it. Both must exist.
fn check_directories(options: &ExportOptions) -> Result<()> {
    let out = resolve(&options.output_dir)?;
    let inputs = [
        ("static", options.static_dir.as_deref()),
        ("template", options.template_dir.as_deref()),
    ];

    for (kind, dir) in inputs {
        let Some(dir) = dir else { continue };
        let resolved = fs::canonicalize(dir).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("{kind} directory '{}': {e}", dir.display()),
            )
        })?;
        if out.starts_with(&resolved) || resolved.starts_with(&out) {
            return Err(Error::Structure(format!(
                "{kind} directory '{}' overlaps the output directory '{}'",
                dir.display(),
                options.output_dir.display()
            )));
        }
    }
    Ok(())
}

/// Absolute form of `path` with symlinks resolved, for a path that may not
/// exist yet: the longest existing prefix is canonicalized and the rest
/// appended.
fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    let mut existing = absolute.as_path();
    let mut missing = Vec::new();

    loop {
        match fs::canonicalize(existing) {
            Ok(base) => {
                return Ok(missing.iter().rev().fold(base, |acc, part| acc.join(part)));
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Ok(absolute);
                };
                missing.push(name.to_os_string());
                existing = parent;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Remove `dir` if present and create it empty.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        log::debug!("removing existing {}", dir.display());
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Recursively copy the contents of `src` into `dst`.
fn copy_dir_all(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
