use std::io;
use std::path::{Path, PathBuf};

use crate::config::RenderOptions;
use crate::context::Context;
use crate::docx::package::Package;
use crate::docx::xml;
use crate::engine::TemplateEngine;
use crate::error::{PackageError, RenderError};

/// The part every WordprocessingML package must have.
pub const MAIN_PART: &str = "word/document.xml";

/// Whether `name` is a package part that may contain template tags.
pub fn is_template_part(name: &str) -> bool {
    match name {
        MAIN_PART | "word/footnotes.xml" | "word/endnotes.xml" | "docProps/core.xml" => true,
        _ => name
            .strip_prefix("word/")
            .and_then(|n| n.strip_suffix(".xml"))
            .and_then(|stem| {
                stem.strip_prefix("header")
                    .or_else(|| stem.strip_prefix("footer"))
            })
            .is_some_and(|n| n.chars().all(|c| c.is_ascii_digit())),
    }
}

/// A `.docx` file loaded as a template.
pub struct DocxTemplate {
    path: PathBuf,
    package: Package,
    engine: TemplateEngine,
}

impl DocxTemplate {
    /// Loads and validates the template at `path`.
    pub fn open(path: &Path) -> Result<Self, PackageError> {
        let package = Package::open(path)?;
        Self::from_package(path, package)
    }

    pub fn from_package(path: &Path, package: Package) -> Result<Self, PackageError> {
        if !package.contains(MAIN_PART) {
            return Err(PackageError::MissingPart(MAIN_PART));
        }
        for entry in package.entries() {
            if is_template_part(entry.name()) && std::str::from_utf8(entry.data()).is_err() {
                return Err(PackageError::NotUtf8(entry.name().to_string()));
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            package,
            engine: TemplateEngine::new(),
        })
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.engine = TemplateEngine::with_options(options);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of the parts that are rendered, in package order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.package.names().filter(|n| is_template_part(n))
    }

    /// Current text of a template part.
    pub fn part(&self, name: &str) -> Option<&str> {
        if !is_template_part(name) {
            return None;
        }
        self.package
            .get(name)
            .and_then(|data| std::str::from_utf8(data).ok())
    }

    /// Renders every template part with `context`.
    ///
    /// Either all parts are replaced or, on error, none are.
    pub fn render(&mut self, context: &Context) -> Result<(), RenderError> {
        let mut rendered = Vec::new();
        for name in self.part_names() {
            let Some(source) = self.part(name) else {
                continue;
            };
            // Parts without any braces cannot hold tags; leave their bytes alone.
            if !source.contains('{') {
                continue;
            }
            let prepared = xml::prepare(source);
            let output = self
                .engine
                .render_string(&prepared, context)
                .map_err(|source| RenderError {
                    part: name.to_string(),
                    source,
                })?;
            rendered.push((name.to_string(), xml::finish(&output)));
        }
        for (name, content) in rendered {
            self.package.set(&name, content.into_bytes());
        }
        Ok(())
    }

    /// Writes the document to `path`, overwriting any existing file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        self.package.save(path)
    }
}
