use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::filetype::{ArgRole, FileType};

/// Errors raised while turning a data file and a template into a rendered document.
#[derive(Error, Debug)]
pub enum ParserError {
    #[error(
        "Unsupported file '{file}' provided as input. Supported file formats are [{}]",
        SupportedList(.role.supported_extensions())
    )]
    UnsupportedFileType { file: String, role: ArgRole },

    /// The parser diagnostic (if any) is only reachable through `source()`.
    #[error("Error while reading {what} '{}'", .file.display())]
    FileRead {
        file: PathBuf,
        what: ReadTarget,
        #[source]
        source: ReadFailure,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Error while saving rendered file '{}'", .file.display())]
    Save {
        file: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ParserError {
    pub(crate) fn read(file: impl Into<PathBuf>, source: impl Into<ReadFailure>) -> Self {
        ParserError::FileRead {
            file: file.into(),
            what: ReadTarget::Data,
            source: source.into(),
        }
    }

    pub(crate) fn read_template(
        file: impl Into<PathBuf>,
        source: impl Into<ReadFailure>,
    ) -> Self {
        ParserError::FileRead {
            file: file.into(),
            what: ReadTarget::Template,
            source: source.into(),
        }
    }
}

/// Which kind of input a [`ParserError::FileRead`] was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadTarget {
    Data,
    Template,
}

impl fmt::Display for ReadTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadTarget::Data => f.write_str("file"),
            ReadTarget::Template => f.write_str("template file"),
        }
    }
}

/// Underlying cause of a [`ParserError::FileRead`].
#[derive(Error, Debug)]
pub enum ReadFailure {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Parse(#[from] DataParseError),
    #[error(transparent)]
    Package(#[from] PackageError),
    #[error("expected {expected} input but the file was classified as {found}")]
    Mismatch {
        expected: &'static str,
        found: FileType,
    },
}

/// Diagnostic produced by the JSON or YAML parser.
#[derive(Error, Debug)]
pub enum DataParseError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("top-level value must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Problems with the template document container itself.
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("not a valid document package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("document package has no '{0}' part")]
    MissingPart(&'static str),
    #[error("part '{0}' is not valid UTF-8")]
    NotUtf8(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A failure inside the template engine while rendering one document part.
#[derive(Error, Debug)]
#[error("failed to render '{part}': {source}")]
pub struct RenderError {
    pub part: String,
    #[source]
    pub source: minijinja::Error,
}

struct SupportedList(&'static [&'static str]);

impl fmt::Display for SupportedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ext) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}'", ext)?;
        }
        Ok(())
    }
}
