//! Spreadsheet text extraction

use calamine::Reader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::document::{FileType, ParsedDocument};

use super::parser::{base_name, extension_of};
use super::DocumentParser;

/// Parser for `.xlsx` / `.xls` workbooks.
///
/// Concatenates every sheet's rows as tab-separated lines with a sheet
/// delimiter line before each sheet. Page count is the sheet count.
pub struct ExcelParser;

impl DocumentParser for ExcelParser {
    fn supports(&self, path: &Path) -> bool {
        matches!(extension_of(path).as_str(), ".xlsx" | ".xls")
    }

    fn parse(&self, path: &Path, data: &[u8]) -> Result<ParsedDocument> {
        let file_name = base_name(path);
        let cursor = std::io::Cursor::new(data.to_vec());
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| Error::file_parse(&file_name, e.to_string()))?;

        let sheets = workbook.sheet_names().to_vec();
        let page_count = sheets.len();
        let mut content = String::new();

        for (sheet_idx, sheet_name) in sheets.iter().enumerate() {
            let range = match workbook.worksheet_range(sheet_name) {
                Ok(range) => range,
                Err(_) => continue,
            };

            content.push_str(&format!("=== Sheet: {} ===\n", sheet_name));

            for row in range.rows() {
                let cells: Vec<String> = row.iter().map(cell_text).collect();
                content.push_str(&cells.join("\t"));
                content.push('\n');
            }

            if sheet_idx < page_count - 1 {
                content.push_str("\n\n");
            }
        }

        Ok(ParsedDocument {
            file_name,
            file_type: FileType::Spreadsheet,
            content,
            page_count,
            needs_ocr: false,
            image_refs: Vec::new(),
        })
    }
}

fn cell_text(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        calamine::Data::DateTime(dt) => dt.to_string(),
        other => other.to_string(),
    }
}
