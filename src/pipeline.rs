use std::path::Path;

use crate::config::RenderOptions;
use crate::error::ParserError;
use crate::filetype::{determine_file_type, ArgRole, FileType};
use crate::logging::Logger;
use crate::reader::{read_data, read_template};

/// Fills a document template with the contents of a data file.
#[derive(Debug, Clone, Default)]
pub struct TemplateParser {
    logger: Logger,
    options: RenderOptions,
}

impl TemplateParser {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Classifies all three paths, then reads, renders and saves.
    ///
    /// Nothing is read or written unless every path has a supported extension,
    /// and the output file is only touched by the final save.
    pub fn parse(&self, data_file: &Path, template_file: &Path, output_file: &Path) -> Result<(), ParserError> {
        let data_type = determine_file_type(data_file, ArgRole::Data)?;
        let template_type = determine_file_type(template_file, ArgRole::Template)?;
        if determine_file_type(output_file, ArgRole::Output)? != FileType::Document {
            return Err(ParserError::UnsupportedFileType {
                file: file_name(output_file),
                role: ArgRole::Output,
            });
        }

        self.logger.debug(format_args!(
            "Reading Input Data File '{}'",
            data_file.display()
        ));
        let context = read_data(data_type, data_file, &self.logger)?;

        self.logger.debug(format_args!(
            "Reading Input Template File '{}'",
            template_file.display()
        ));
        let mut template = read_template(template_type, template_file)?.with_options(self.options);

        self.logger.debug(format_args!(
            "Rendering Input Template File '{}' with '{}'",
            template_file.display(),
            data_file.display()
        ));
        template.render(&context)?;

        self.logger.debug(format_args!(
            "Saving Rendered File '{}'",
            output_file.display()
        ));
        template.save(output_file).map_err(|source| ParserError::Save {
            file: output_file.to_path_buf(),
            source,
        })?;

        self.logger.info(format_args!(
            "Rendered '{}' into '{}'",
            template_file.display(),
            output_file.display()
        ));
        Ok(())
    }
}

/// Runs the pipeline with default render options.
pub fn parse_template_with_data(
    data_file: &Path,
    template_file: &Path,
    output_file: &Path,
    logger: &Logger,
) -> Result<(), ParserError> {
    TemplateParser::new(logger.clone()).parse(data_file, template_file, output_file)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
