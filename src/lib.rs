//! Populate Word (`.docx`) templates with data read from YAML or JSON files.
//!
//! Templates use Jinja2 syntax (`{{ name }}`, `{% for %}`); see [`docx`] for
//! the row/paragraph scoped tags understood inside documents.

pub mod config;
pub mod context;
pub mod docx;
pub mod engine;
pub mod error;
pub mod filetype;
pub mod filters;
pub mod logging;
pub mod pipeline;
pub mod reader;

pub use config::{LogConfig, LogLevel, RenderOptions};
pub use context::{Context, Value};
pub use docx::DocxTemplate;
pub use engine::TemplateEngine;
pub use error::{DataParseError, ParserError, RenderError};
pub use filetype::{determine_file_type, ArgRole, FileType};
pub use logging::{init_logger, Logger};
pub use pipeline::{parse_template_with_data, TemplateParser};
