//! Spreadsheet report rendering

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::contract::ExtractionResult;

const SHEET_NAME: &str = "Extraction Results";

const HEADERS: [&str; 44] = [
    "No.",
    "File name",
    "Contract type",
    "Contract number",
    "Signing date",
    "Effective date",
    "Expiry date",
    "Party A name",
    "Party A type",
    "Party A legal representative",
    "Party A address",
    "Party A contact",
    "Party B name",
    "Party B type",
    "Party B legal representative",
    "Party B address",
    "Party B contact",
    "Transaction amount",
    "Currency",
    "Payment method",
    "Payment schedule",
    "Effective condition",
    "Termination condition",
    "Contract status",
    "Party A obligations",
    "Party B obligations",
    "Party A rights",
    "Party B rights",
    "Breach scenarios",
    "Liquidated damages",
    "Exemption clauses",
    "Resolution method",
    "Jurisdiction court",
    "Arbitration organization",
    "Governing law",
    "Confidentiality clause",
    "IP ownership",
    "Modification clause",
    "Assignment clause",
    "Contract copies",
    "Party A seal",
    "Party B seal",
    "Confidence",
    "Processing time",
];

/// Renders the aggregated results of one task into a spreadsheet artifact.
///
/// One row per result, a fixed ordered column set, artifact named after the
/// task identifier. A batch with zero results still yields a valid workbook
/// with just the header row.
pub struct ReportExporter {
    output_dir: PathBuf,
}

impl ReportExporter {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write the report and return the artifact path.
    pub fn render(&self, results: &[ExtractionResult], task_id: Uuid) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("extraction_result_{}.xlsx", task_id));

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| Error::Export(e.to_string()))?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(11)
            .set_background_color(Color::RGB(0x4472C4))
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap();
        let cell_format = Format::new()
            .set_align(FormatAlign::Top)
            .set_text_wrap();

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &header_format)
                .map_err(|e| Error::Export(e.to_string()))?;
        }

        for (idx, result) in results.iter().enumerate() {
            let row = (idx + 1) as u32;
            let cells = row_cells(idx, result);
            for (col, value) in cells.iter().enumerate() {
                worksheet
                    .write_string_with_format(row, col as u16, value, &cell_format)
                    .map_err(|e| Error::Export(e.to_string()))?;
            }
        }

        apply_layout(worksheet, results.len())?;

        workbook
            .save(&path)
            .map_err(|e| Error::Export(e.to_string()))?;

        Ok(path)
    }
}

/// Human label for a contract category tag; unmapped tags pass through.
fn contract_type_label(tag: &str) -> String {
    match tag {
        "purchase" => "Purchase contract".to_string(),
        "lease" => "Lease contract".to_string(),
        "loan" => "Loan contract".to_string(),
        "employment" => "Employment contract".to_string(),
        "service" => "Service contract".to_string(),
        "other" => "Other contract".to_string(),
        raw => raw.to_string(),
    }
}

fn row_cells(idx: usize, result: &ExtractionResult) -> [String; 44] {
    [
        (idx + 1).to_string(),
        result.file_name.clone(),
        contract_type_label(&result.contract_info.contract_type),
        result.contract_info.contract_number.clone(),
        result.contract_info.signing_date.clone(),
        result.contract_info.effective_date.clone(),
        result.contract_info.expiry_date.clone(),
        result.party_a.name.clone(),
        result.party_a.party_type.clone(),
        result.party_a.legal_representative.clone(),
        result.party_a.address.clone(),
        result.party_a.contact.clone(),
        result.party_b.name.clone(),
        result.party_b.party_type.clone(),
        result.party_b.legal_representative.clone(),
        result.party_b.address.clone(),
        result.party_b.contact.clone(),
        result.financial.transaction_amount.clone(),
        result.financial.currency.clone(),
        result.financial.payment_method.clone(),
        result.financial.payment_schedule.clone(),
        result.validity.effective_condition.clone(),
        result.validity.termination_condition.clone(),
        result.validity.contract_status.clone(),
        result.rights_obligations.party_a_obligations.join("\n"),
        result.rights_obligations.party_b_obligations.join("\n"),
        result.rights_obligations.party_a_rights.join("\n"),
        result.rights_obligations.party_b_rights.join("\n"),
        result.breach_liability.breach_scenarios.join("\n"),
        result.breach_liability.liquidated_damages.clone(),
        result.breach_liability.exemption_clauses.join("\n"),
        result.dispute_resolution.resolution_method.clone(),
        result.dispute_resolution.jurisdiction_court.clone(),
        result.dispute_resolution.arbitration_org.clone(),
        result.dispute_resolution.governing_law.clone(),
        result.confidentiality_ip.confidentiality_clause.clone(),
        result.confidentiality_ip.ip_ownership.clone(),
        result.other_terms.modification_clause.clone(),
        result.other_terms.assignment_clause.clone(),
        result.other_terms.contract_copies.clone(),
        result.signature.party_a_seal.to_string(),
        result.signature.party_b_seal.to_string(),
        format!("{:.1}%", result.metadata.overall_confidence * 100.0),
        format!("{:.2}s", result.metadata.duration_secs),
    ]
}

/// Column widths and row heights. Cosmetic only.
fn apply_layout(
    worksheet: &mut rust_xlsxwriter::Worksheet,
    result_rows: usize,
) -> Result<()> {
    let widths: [(u16, u16, f64); 9] = [
        (0, 0, 6.0),
        (1, 1, 30.0),
        (2, 6, 15.0),
        (7, 16, 20.0),
        (17, 20, 15.0),
        (21, 23, 20.0),
        (24, 30, 30.0),
        (31, 39, 15.0),
        (40, 43, 10.0),
    ];
    for (first, last, width) in widths {
        for col in first..=last {
            worksheet
                .set_column_width(col, width)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
    }

    if result_rows > 0 {
        worksheet
            .set_row_height(0, 30)
            .map_err(|e| Error::Export(e.to_string()))?;
        for row in 1..=result_rows {
            worksheet
                .set_row_height(row as u32, 60)
                .map_err(|e| Error::Export(e.to_string()))?;
        }
    }

    Ok(())
}
