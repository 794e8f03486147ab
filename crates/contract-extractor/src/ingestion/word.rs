//! Word-processor text extraction

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::document::{FileType, ParsedDocument};

use super::parser::{base_name, extension_of};
use super::DocumentParser;

/// Parser for `.docx` packages.
///
/// Extracts the visible text of the main document stream
/// (`word/document.xml`): a newline at every paragraph boundary, a space
/// between adjacent text runs. Legacy `.doc` binaries are recognized so they
/// route here, but only the OOXML container is decodable.
pub struct WordParser;

impl DocumentParser for WordParser {
    fn supports(&self, path: &Path) -> bool {
        matches!(extension_of(path).as_str(), ".docx" | ".doc")
    }

    fn parse(&self, path: &Path, data: &[u8]) -> Result<ParsedDocument> {
        let file_name = base_name(path);

        if extension_of(path) == ".doc" {
            return Err(Error::file_parse(
                file_name,
                "legacy .doc binaries are not supported, re-save the document as .docx",
            ));
        }

        let cursor = std::io::Cursor::new(data);
        let mut archive = zip::ZipArchive::new(cursor)
            .map_err(|e| Error::file_parse(&file_name, e.to_string()))?;

        let mut document_xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|_| Error::file_parse(&file_name, "word/document.xml not found in package"))?
            .read_to_string(&mut document_xml)
            .map_err(|e| Error::file_parse(&file_name, e.to_string()))?;

        Ok(ParsedDocument {
            file_name,
            file_type: FileType::Word,
            content: extract_document_text(&document_xml),
            page_count: 1,
            needs_ocr: false,
            image_refs: Vec::new(),
        })
    }
}

/// Walk the document XML and collect run text: `<w:t>` holds the visible
/// characters, `</w:t>` separates adjacent runs, `</w:p>` ends a paragraph.
fn extract_document_text(xml: &str) -> String {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut content = String::new();
    let mut in_text_element = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text_element = true;
                }
            }
            Ok(Event::Text(e)) => {
                if in_text_element {
                    if let Ok(text) = e.unescape() {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            content.push_str(trimmed);
                        }
                    }
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => {
                    in_text_element = false;
                    content.push(' ');
                }
                b"p" => content.push('\n'),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
    }

    content
}
