//! PDF handling

use std::path::Path;

use crate::error::Result;
use crate::types::document::{FileType, ParsedDocument};

use super::parser::{base_name, extension_of};
use super::DocumentParser;

/// Parser for `.pdf` files.
///
/// Never extracts text locally: every PDF is flagged for OCR escalation and
/// the raw bytes go to the remote OCR endpoint instead.
pub struct PdfParser;

impl DocumentParser for PdfParser {
    fn supports(&self, path: &Path) -> bool {
        extension_of(path) == ".pdf"
    }

    fn parse(&self, path: &Path, _data: &[u8]) -> Result<ParsedDocument> {
        Ok(ParsedDocument {
            file_name: base_name(path),
            file_type: FileType::Pdf,
            content: String::new(),
            page_count: 1,
            needs_ocr: true,
            image_refs: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_always_defers_to_ocr() {
        let doc = PdfParser
            .parse(Path::new("scan.pdf"), b"%PDF-1.4 whatever")
            .unwrap();
        assert_eq!(doc.file_type, FileType::Pdf);
        assert!(doc.needs_ocr);
        assert!(doc.content.is_empty());
        assert_eq!(doc.page_count, 1);
    }
}
