//! Extraction provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::contract::AiExtraction;
use crate::types::document::ParsedDocument;

/// Remote extraction and OCR capability.
///
/// Implementations:
/// - `AiServiceClient`: HTTP client against the AI extraction service
/// - test stubs with scripted responses
///
/// Calls block the caller until response or timeout. Callers decide how to
/// handle failures; there is no automatic retry at this seam.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    /// Extract the structured contract record from a parsed document.
    async fn extract(&self, document: &ParsedDocument) -> Result<AiExtraction>;

    /// OCR arbitrary image/scan bytes to text.
    async fn ocr_image(&self, data: &[u8]) -> Result<String>;

    /// OCR a PDF to text.
    async fn ocr_pdf(&self, data: &[u8]) -> Result<String>;

    /// Whether the remote service answers its liveness probe.
    async fn health_check(&self) -> Result<bool>;
}
