//! Page templates.
//!
//! Pages are rendered with minijinja from `index.html`, `map.html` and
//! `page.html`, all extending `layout.html`. A template directory may
//! override any of them or add partials of its own; names it does not
//! provide fall back to the built-in set.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use minijinja::{Environment, ErrorKind};
use serde::Serialize;

use crate::error::{Error, Result};

/// Templates compiled into the binary.
const BUILTIN: &[(&str, &str)] = &[
    ("layout.html", include_str!("templates/layout.html")),
    ("index.html", include_str!("templates/index.html")),
    ("map.html", include_str!("templates/map.html")),
    ("page.html", include_str!("templates/page.html")),
];

/// Source of a built-in template, if `name` is one.
pub fn builtin_template(name: &str) -> Option<&'static str> {
    BUILTIN
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, source)| *source)
}

/// A template environment for the three page kinds.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Only the built-in templates.
    pub fn builtin() -> Self {
        Self::with_dir(None)
    }

    /// Templates from `dir`, backed by the built-in ones.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("template directory '{}' not found", dir.display()),
            )));
        }
        log::debug!("loading templates from {}", dir.display());
        Ok(Self::with_dir(Some(dir)))
    }

    fn with_dir(dir: Option<PathBuf>) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_loader(move |name| load(dir.as_deref(), name));
        Self { env }
    }

    /// Render the template `name` with `ctx`.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for Templates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Templates").finish_non_exhaustive()
    }
}

fn load(dir: Option<&Path>, name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
    // Names stay inside the template directory.
    let relative = Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !relative {
        return Ok(None);
    }

    if let Some(dir) = dir {
        match fs::read_to_string(dir.join(name)) {
            Ok(source) => return Ok(Some(source)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("cannot read template '{name}'"),
                )
                .with_source(e));
            }
        }
    }

    Ok(builtin_template(name).map(str::to_string))
}
