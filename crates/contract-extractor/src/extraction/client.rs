//! HTTP client for the AI extraction service

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::AiServiceConfig;
use crate::error::{Error, Result};
use crate::types::contract::AiExtraction;
use crate::types::document::ParsedDocument;

use super::ExtractionProvider;

/// Client for the extraction/OCR service.
///
/// Every call is attempted exactly once; the configured timeout bounds
/// worst-case latency per call.
pub struct AiServiceClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct ExtractRequest<'a> {
    document_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    contract_type: Option<&'a str>,
}

#[derive(Deserialize)]
struct OcrResponse {
    text: String,
}

impl AiServiceClient {
    pub fn new(config: &AiServiceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Turn a non-success response into `Error::Remote` with the body text.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::remote(status.as_u16(), body))
    }
}

#[async_trait]
impl ExtractionProvider for AiServiceClient {
    async fn extract(&self, document: &ParsedDocument) -> Result<AiExtraction> {
        let url = format!("{}/api/v1/extract", self.base_url);
        let request = ExtractRequest {
            document_text: &document.content,
            contract_type: None,
        };

        tracing::debug!(
            file = %document.file_name,
            content_len = document.content.len(),
            "Requesting structured extraction"
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<AiExtraction>().await?)
    }

    async fn ocr_image(&self, data: &[u8]) -> Result<String> {
        let url = format!("{}/api/v1/ocr/raw", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(data.to_vec())
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<OcrResponse>().await?.text)
    }

    async fn ocr_pdf(&self, data: &[u8]) -> Result<String> {
        let url = format!("{}/api/v1/ocr/pdf", self.base_url);

        let part = reqwest::multipart::Part::bytes(data.to_vec())
            .file_name("document.pdf")
            .mime_str("application/pdf")
            .map_err(|e| Error::internal(format!("multipart part: {}", e)))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json::<OcrResponse>().await?.text)
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str) -> AiServiceConfig {
        AiServiceConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = AiServiceClient::new(&config("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[tokio::test]
    async fn health_check_reports_unreachable_service_as_down() {
        // nothing listens on a reserved port; the probe maps the transport
        // failure to "not healthy" instead of an error
        let client = AiServiceClient::new(&config("http://127.0.0.1:1")).unwrap();
        assert!(!client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn extract_against_unreachable_service_is_a_transport_error() {
        let client = AiServiceClient::new(&config("http://127.0.0.1:1")).unwrap();
        let doc = ParsedDocument {
            file_name: "a.docx".to_string(),
            file_type: crate::types::document::FileType::Word,
            content: "text".to_string(),
            page_count: 1,
            needs_ocr: false,
            image_refs: Vec::new(),
        };

        let err = client.extract(&doc).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
