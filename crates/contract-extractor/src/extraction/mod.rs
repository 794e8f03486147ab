//! Remote AI extraction and OCR

mod client;
mod provider;

pub use client::AiServiceClient;
pub use provider::ExtractionProvider;
