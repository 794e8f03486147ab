//! Parser registry: capability-based dispatch over the format parsers

use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::types::document::ParsedDocument;

use super::{ExcelParser, PdfParser, WordParser};

/// One format-specific extractor.
///
/// `supports` looks only at the file extension; no content sniffing.
pub trait DocumentParser: Send + Sync {
    fn supports(&self, path: &Path) -> bool;
    fn parse(&self, path: &Path, data: &[u8]) -> Result<ParsedDocument>;
}

/// Registry of format parsers with first-match dispatch.
///
/// Registration order is fixed (spreadsheet, word, PDF) and selection takes
/// the first parser whose `supports` matches, so a later parser claiming an
/// already-claimed extension is unreachable.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DocumentParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::with_parsers(vec![
            Box::new(ExcelParser),
            Box::new(WordParser),
            Box::new(PdfParser),
        ])
    }

    /// Build a registry from an explicit parser list, in dispatch order.
    pub fn with_parsers(parsers: Vec<Box<dyn DocumentParser>>) -> Self {
        Self { parsers }
    }

    /// Extensions the default registry recognizes.
    pub fn supported_extensions() -> &'static [&'static str] {
        &[".xlsx", ".xls", ".docx", ".doc", ".pdf"]
    }

    /// Whether any registered parser recognizes the path.
    pub fn is_supported(&self, path: &Path) -> bool {
        self.parsers.iter().any(|p| p.supports(path))
    }

    /// Parse one file with the first matching parser.
    pub fn parse(&self, path: &Path, data: &[u8]) -> Result<ParsedDocument> {
        for parser in &self.parsers {
            if parser.supports(path) {
                return parser.parse(path, data);
            }
        }
        Err(Error::UnsupportedFormat(path.display().to_string()))
    }

    /// Parse a batch of files concurrently with per-file isolation.
    ///
    /// One entry failing never blocks the others; the caller receives the
    /// successfully parsed documents and the failure count and decides what
    /// partial failure means.
    pub async fn parse_batch(
        self: &Arc<Self>,
        files: Vec<(String, Vec<u8>)>,
    ) -> (Vec<ParsedDocument>, usize) {
        let handles: Vec<_> = files
            .into_iter()
            .map(|(filename, data)| {
                let registry = Arc::clone(self);
                tokio::task::spawn_blocking(move || {
                    registry
                        .parse(Path::new(&filename), &data)
                        .map_err(|e| (filename, e))
                })
            })
            .collect();

        let mut documents = Vec::new();
        let mut failures = 0;
        for outcome in futures::future::join_all(handles).await {
            match outcome {
                Ok(Ok(doc)) => documents.push(doc),
                Ok(Err((filename, e))) => {
                    tracing::warn!(file = %filename, error = %e, "Batch parse entry failed");
                    failures += 1;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Batch parse worker panicked");
                    failures += 1;
                }
            }
        }
        (documents, failures)
    }
}

/// Lower-cased extension with leading dot, or an empty string.
pub(super) fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// File name without directory components.
pub(super) fn base_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::fixtures;
    use crate::types::document::FileType;

    struct TaggedParser {
        ext: &'static str,
        tag: &'static str,
    }

    impl DocumentParser for TaggedParser {
        fn supports(&self, path: &Path) -> bool {
            extension_of(path) == self.ext
        }

        fn parse(&self, path: &Path, _data: &[u8]) -> Result<ParsedDocument> {
            Ok(ParsedDocument {
                file_name: base_name(path),
                file_type: FileType::Word,
                content: self.tag.to_string(),
                page_count: 1,
                needs_ocr: false,
                image_refs: Vec::new(),
            })
        }
    }

    #[test]
    fn unknown_extension_is_unsupported() {
        let registry = ParserRegistry::new();
        let err = registry.parse(Path::new("notes.txt"), b"hello").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
        assert!(!registry.is_supported(Path::new("notes.txt")));
    }

    #[test]
    fn first_matching_parser_wins() {
        let registry = ParserRegistry::with_parsers(vec![
            Box::new(TaggedParser { ext: ".zzz", tag: "first" }),
            Box::new(TaggedParser { ext: ".zzz", tag: "second" }),
        ]);

        let doc = registry.parse(Path::new("a.zzz"), &[]).unwrap();
        assert_eq!(doc.content, "first");
    }

    #[test]
    fn default_registry_routes_by_extension() {
        let registry = ParserRegistry::new();
        assert!(registry.is_supported(Path::new("Contract.XLSX")));
        assert!(registry.is_supported(Path::new("contract.docx")));
        assert!(registry.is_supported(Path::new("contract.pdf")));
    }

    #[tokio::test]
    async fn batch_parse_isolates_failures() {
        let registry = Arc::new(ParserRegistry::new());
        let docx = fixtures::build_docx(&[&["hello"]]);

        let files = vec![
            ("good.docx".to_string(), docx),
            ("bad.docx".to_string(), b"not a zip archive".to_vec()),
            ("unknown.txt".to_string(), b"plain".to_vec()),
        ];

        let (documents, failures) = registry.parse_batch(files).await;
        assert_eq!(documents.len(), 1);
        assert_eq!(failures, 2);
        assert_eq!(documents[0].file_name, "good.docx");
    }
}
