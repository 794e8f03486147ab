//! contract-extractor: contract key-term extraction service
//!
//! Ingests heterogeneous document files (spreadsheets, word-processor
//! documents, PDFs), extracts their text, sends it to an external AI
//! extraction service for structured contract metadata, aggregates results
//! per batch, and renders a downloadable spreadsheet report. Batches are
//! tracked as in-memory tasks that can be polled while a background unit
//! works through the files one at a time.

pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod ingestion;
pub mod processing;
pub mod server;
pub mod types;

pub use config::ExtractorConfig;
pub use error::{Error, Result};
pub use types::{
    contract::{AiExtraction, ExtractionResult},
    document::{FileType, ParsedDocument},
    task::{Task, TaskStatus},
};
