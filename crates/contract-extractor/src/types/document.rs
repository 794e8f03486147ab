//! Parsed document representation

use serde::{Deserialize, Serialize};

/// Document format tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileType {
    Spreadsheet,
    Word,
    Pdf,
    Image,
}

/// Normalized textual representation of one uploaded file.
///
/// Immutable once produced by a parser; the orchestrator owns it for the
/// duration of one file's processing (OCR escalation may replace `content`
/// on its own working copy).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Original file name (no directory components)
    pub file_name: String,
    /// Format tag
    pub file_type: FileType,
    /// Extracted text content
    pub content: String,
    /// Page count (sheet count for spreadsheets)
    pub page_count: usize,
    /// Text could not be extracted locally; OCR escalation needed
    pub needs_ocr: bool,
    /// References to embedded images, if the parser surfaced any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_refs: Vec<String>,
}
