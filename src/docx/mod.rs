//! Word (`.docx`) templates: the ZIP package, tag repair, and rendering.

pub mod package;
pub mod template;
pub mod xml;

pub use package::Package;
pub use template::{is_template_part, DocxTemplate, MAIN_PART};

#[cfg(test)]
pub(crate) mod testing {
    use std::io::{Cursor, Write};
    use std::path::Path;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

    const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

    pub fn paragraph(text: &str) -> String {
        format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            text
        )
    }

    pub fn document_xml(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
            body
        )
    }

    pub fn docx_bytes_with_parts(body: &str, extra: &[(&str, &str)]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        let document = document_xml(body);
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", RELS),
            ("word/document.xml", document.as_str()),
        ];
        for (name, content) in parts.iter().chain(extra.iter()) {
            zip.start_file(*name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    pub fn docx_bytes(body: &str) -> Vec<u8> {
        docx_bytes_with_parts(body, &[])
    }

    pub fn write_docx(path: &Path, body: &str) {
        std::fs::write(path, docx_bytes(body)).unwrap();
    }

    pub fn write_docx_parts(path: &Path, body: &str, extra: &[(&str, &str)]) {
        std::fs::write(path, docx_bytes_with_parts(body, extra)).unwrap();
    }
}
