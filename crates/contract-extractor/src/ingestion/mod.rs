//! Document parsing: format-specific extractors and the parser registry

mod excel;
mod parser;
mod pdf;
mod word;

pub use excel::ExcelParser;
pub use parser::{DocumentParser, ParserRegistry};
pub use pdf::PdfParser;
pub use word::WordParser;
