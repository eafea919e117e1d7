use std::path::Path;

use crate::context::Context;
use crate::docx::DocxTemplate;
use crate::error::{DataParseError, ParserError, ReadFailure};
use crate::filetype::FileType;
use crate::logging::Logger;

/// Reads and parses a data file already classified as YAML or JSON.
///
/// A parser diagnostic is logged at error level; the returned error only
/// names the file (the diagnostic stays reachable as its source).
pub fn read_data(file_type: FileType, file: &Path, logger: &Logger) -> Result<Context, ParserError> {
    let parse: fn(&str) -> Result<Context, DataParseError> = match file_type {
        FileType::Json => Context::from_json_str,
        FileType::Yaml => Context::from_yaml_str,
        FileType::Document => {
            return Err(ParserError::read(
                file,
                ReadFailure::Mismatch {
                    expected: "YAML or JSON",
                    found: file_type,
                },
            ))
        }
    };

    let content = std::fs::read_to_string(file).map_err(|e| {
        logger.error(format_args!("{}", e));
        ParserError::read(file, e)
    })?;

    parse(&content).map_err(|e| {
        logger.error(format_args!("{}", e));
        ParserError::read(file, e)
    })
}

/// Loads a template document. Anything not classified as a document is refused.
pub fn read_template(file_type: FileType, file: &Path) -> Result<DocxTemplate, ParserError> {
    if file_type != FileType::Document {
        return Err(ParserError::read_template(
            file,
            ReadFailure::Mismatch {
                expected: "DOC",
                found: file_type,
            },
        ));
    }
    DocxTemplate::open(file).map_err(|e| ParserError::read_template(file, e))
}
