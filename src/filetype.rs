use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::ParserError;

pub const EXT_YAML: &[&str] = &["yaml", "yml"];
pub const EXT_JSON: &[&str] = &["json"];
pub const EXT_DOC: &[&str] = &["docx"];

const DATA_EXTENSIONS: &[&str] = &[".yaml", ".yml", ".json"];
const DOC_EXTENSIONS: &[&str] = &[".docx"];

/// Category of an input or output file, decided by its extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Yaml,
    Json,
    Document,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Yaml => f.write_str("YAML"),
            FileType::Json => f.write_str("JSON"),
            FileType::Document => f.write_str("DOC"),
        }
    }
}

/// The command-line argument a path was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgRole {
    Data,
    Template,
    Output,
}

impl ArgRole {
    /// Extensions listed in the error message when a path for this role is rejected.
    pub fn supported_extensions(self) -> &'static [&'static str] {
        match self {
            ArgRole::Data => DATA_EXTENSIONS,
            ArgRole::Template | ArgRole::Output => DOC_EXTENSIONS,
        }
    }
}

/// Classifies `file` by extension.
///
/// The path is expanded (`~`) and made absolute first, but never opened.
/// Matching is case-sensitive: `report.DOCX` is rejected.
pub fn determine_file_type(file: &Path, role: ArgRole) -> Result<FileType, ParserError> {
    let resolved = resolve_path(file);
    let ext = resolved.extension().and_then(|e| e.to_str()).unwrap_or("");

    if EXT_YAML.contains(&ext) {
        return Ok(FileType::Yaml);
    }
    if EXT_JSON.contains(&ext) {
        return Ok(FileType::Json);
    }
    if EXT_DOC.contains(&ext) {
        return Ok(FileType::Document);
    }

    let name = resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string());
    Err(ParserError::UnsupportedFileType { file: name, role })
}

/// Expands a leading `~` and makes the path absolute without touching the file system.
pub fn resolve_path(path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    std::path::absolute(&expanded).unwrap_or(expanded)
}

fn expand_home(path: &Path) -> PathBuf {
    let Some(s) = path.to_str() else {
        return path.to_path_buf();
    };
    let rest = if s == "~" {
        ""
    } else if let Some(rest) = s.strip_prefix("~/") {
        rest
    } else {
        return path.to_path_buf();
    };
    match home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(path: &str, role: ArgRole) -> Result<FileType, ParserError> {
        determine_file_type(Path::new(path), role)
    }

    #[test]
    fn test_data_extensions() {
        assert_eq!(classify("sample.yaml", ArgRole::Data).unwrap(), FileType::Yaml);
        assert_eq!(classify("sample.yml", ArgRole::Data).unwrap(), FileType::Yaml);
        assert_eq!(classify("dir/sample.json", ArgRole::Data).unwrap(), FileType::Json);
    }

    #[test]
    fn test_document_extension() {
        assert_eq!(
            classify("template.docx", ArgRole::Template).unwrap(),
            FileType::Document
        );
        assert_eq!(
            classify("~/out/report.docx", ArgRole::Output).unwrap(),
            FileType::Document
        );
    }

    #[test]
    fn test_unsupported_extension() {
        match classify("notes/input.txt", ArgRole::Data) {
            Err(ParserError::UnsupportedFileType { file, role }) => {
                assert_eq!(file, "input.txt");
                assert_eq!(role, ArgRole::Data);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_extension_is_case_sensitive() {
        assert!(classify("REPORT.DOCX", ArgRole::Output).is_err());
        assert!(classify("data.Json", ArgRole::Data).is_err());
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        assert!(classify(".yaml", ArgRole::Data).is_err());
        assert!(classify("noext", ArgRole::Template).is_err());
    }

    #[test]
    fn test_old_word_format_rejected_for_output() {
        let err = classify("report.doc", ArgRole::Output).unwrap_err();
        assert!(err.to_string().contains("'report.doc'"));
        assert!(err.to_string().contains("['.docx']"));
    }

    #[test]
    fn test_resolve_path_is_absolute() {
        assert!(resolve_path(Path::new("relative/file.json")).is_absolute());
    }

    #[test]
    fn test_expand_home() {
        let expanded = expand_home(Path::new("~/docs/template.docx"));
        if home_dir().is_some() {
            assert!(!expanded.to_str().unwrap().starts_with('~'));
            assert!(expanded.ends_with("docs/template.docx"));
        }
        assert_eq!(
            expand_home(Path::new("/abs/template.docx")),
            PathBuf::from("/abs/template.docx")
        );
    }
}
