//! Batch orchestrator: turns a submission into a tracked background task

use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::error::Result;
use crate::export::ReportExporter;
use crate::extraction::ExtractionProvider;
use crate::ingestion::ParserRegistry;
use crate::types::contract::{AiExtraction, ExtractionResult, ResultMetadata};
use crate::types::document::FileType;

use super::TaskStore;

/// Replacement content when the remote PDF OCR call fails. The file still
/// proceeds to extraction with this degraded content.
pub const PDF_OCR_FAILURE_NOTICE: &str =
    "[PDF OCR failed, please try uploading Word or Excel format]";

/// One uploaded file: original name plus raw bytes.
#[derive(Debug, Clone)]
pub struct FileData {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Drives the per-task state machine.
///
/// Each submission gets its own spawned unit of execution; within a task the
/// files are processed strictly one at a time so counters and progress have
/// a single writer. Per-file failures are counters, never task failure.
pub struct Orchestrator {
    store: Arc<TaskStore>,
    parsers: Arc<ParserRegistry>,
    provider: Arc<dyn ExtractionProvider>,
    exporter: ReportExporter,
}

impl Orchestrator {
    pub fn new(
        store: Arc<TaskStore>,
        parsers: Arc<ParserRegistry>,
        provider: Arc<dyn ExtractionProvider>,
        exporter: ReportExporter,
    ) -> Self {
        Self {
            store,
            parsers,
            provider,
            exporter,
        }
    }

    /// Create a pending task for the files and start processing in the
    /// background. Returns the initial task snapshot immediately.
    pub fn submit(self: &Arc<Self>, files: Vec<FileData>) -> crate::types::task::Task {
        let task = crate::types::task::Task::new(files.len());
        let task_id = task.id;
        self.store.insert(task.clone());

        tracing::info!(
            task_id = %task_id,
            total_files = files.len(),
            "Task submitted, starting background processing"
        );

        let orchestrator = Arc::clone(self);
        tokio::spawn(async move {
            orchestrator.run_task(task_id, files).await;
        });

        task
    }

    /// Process every file of a task, then export and finalize.
    ///
    /// Public so tests can await a task deterministically instead of polling
    /// the spawned unit.
    pub async fn run_task(&self, task_id: Uuid, files: Vec<FileData>) {
        self.store.mark_processing(task_id);

        for file in &files {
            match self.process_file(file).await {
                Ok(result) => {
                    tracing::info!(
                        task_id = %task_id,
                        file = %file.filename,
                        confidence = result.metadata.overall_confidence,
                        "File processed"
                    );
                    self.store.record_success(task_id, result);
                }
                Err(e) => {
                    tracing::warn!(
                        task_id = %task_id,
                        file = %file.filename,
                        error = %e,
                        "File failed, continuing with batch"
                    );
                    self.store.record_failure(task_id);
                }
            }
        }

        let results = self.store.results(task_id).unwrap_or_default();
        let export_outcome = self
            .exporter
            .render(&results, task_id)
            .map_err(|e| format!("failed to export results: {}", e));

        match &export_outcome {
            Ok(path) => tracing::info!(
                task_id = %task_id,
                results = results.len(),
                path = %path.display(),
                "Task completed, report written"
            ),
            Err(message) => tracing::error!(task_id = %task_id, error = %message, "Task completed, report export failed"),
        }

        self.store.complete(task_id, export_outcome);
    }

    /// Parse one file, apply the OCR escalation policy, and extract.
    async fn process_file(&self, file: &FileData) -> Result<ExtractionResult> {
        let started = Instant::now();

        let mut doc = self.parsers.parse(Path::new(&file.filename), &file.data)?;

        tracing::debug!(
            file = %file.filename,
            file_type = ?doc.file_type,
            needs_ocr = doc.needs_ocr,
            content_len = doc.content.len(),
            "Document parsed"
        );

        let mut ocr_used = false;

        if doc.file_type == FileType::Pdf {
            ocr_used = true;
            match self.provider.ocr_pdf(&file.data).await {
                Ok(text) => {
                    doc.content = text;
                    doc.needs_ocr = false;
                }
                Err(e) => {
                    // degraded, not fatal: extraction still runs on the notice
                    tracing::warn!(file = %file.filename, error = %e, "PDF OCR failed");
                    doc.content = PDF_OCR_FAILURE_NOTICE.to_string();
                }
            }
        } else if doc.needs_ocr {
            ocr_used = true;
            match self.provider.ocr_image(&file.data).await {
                Ok(text) => doc.content = text,
                Err(e) => {
                    tracing::warn!(file = %file.filename, error = %e, "OCR failed, keeping original content");
                }
            }
        }

        let extraction = self.provider.extract(&doc).await?;
        let overall_confidence = overall_confidence(&extraction);

        Ok(ExtractionResult {
            id: Uuid::new_v4(),
            file_name: doc.file_name,
            contract_info: extraction.contract_info,
            party_a: extraction.party_a,
            party_b: extraction.party_b,
            financial: extraction.financial,
            validity: extraction.validity,
            rights_obligations: extraction.rights_obligations,
            breach_liability: extraction.breach_liability,
            dispute_resolution: extraction.dispute_resolution,
            confidentiality_ip: extraction.confidentiality_ip,
            other_terms: extraction.other_terms,
            signature: extraction.signature,
            type_specific: extraction.type_specific,
            metadata: ResultMetadata {
                source_file: file.filename.clone(),
                page_count: doc.page_count,
                extracted_at: Utc::now(),
                duration_secs: started.elapsed().as_secs_f64(),
                overall_confidence,
                ocr_used,
            },
        })
    }
}

/// Mean of the strictly-positive section confidences; 0.8 when no section
/// reports a positive score ("unknown but plausibly acceptable").
pub fn overall_confidence(extraction: &AiExtraction) -> f64 {
    let scores = extraction.section_confidences();
    let positives: Vec<f64> = scores.iter().copied().filter(|c| *c > 0.0).collect();

    if positives.is_empty() {
        return 0.8;
    }
    positives.iter().sum::<f64>() / positives.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::extraction::ExtractionProvider;
    use crate::ingestion::fixtures;
    use crate::types::document::ParsedDocument;
    use crate::types::task::TaskStatus;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Scripted provider: records the document contents handed to `extract`.
    struct StubProvider {
        fail_pdf_ocr: bool,
        fail_extract: bool,
        extraction: AiExtraction,
        extracted_contents: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new() -> Self {
            let mut extraction = AiExtraction::default();
            extraction.contract_info.confidence = 0.9;
            Self {
                fail_pdf_ocr: false,
                fail_extract: false,
                extraction,
                extracted_contents: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ExtractionProvider for StubProvider {
        async fn extract(&self, document: &ParsedDocument) -> Result<AiExtraction> {
            if self.fail_extract {
                return Err(Error::remote(500, "extraction backend down"));
            }
            self.extracted_contents
                .lock()
                .push(document.content.clone());
            Ok(self.extraction.clone())
        }

        async fn ocr_image(&self, _data: &[u8]) -> Result<String> {
            Ok("ocr text".to_string())
        }

        async fn ocr_pdf(&self, _data: &[u8]) -> Result<String> {
            if self.fail_pdf_ocr {
                return Err(Error::remote(500, "ocr backend down"));
            }
            Ok("recognized pdf text".to_string())
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }
    }

    fn orchestrator_with(
        provider: StubProvider,
    ) -> (
        Arc<Orchestrator>,
        Arc<TaskStore>,
        Arc<StubProvider>,
        tempfile::TempDir,
    ) {
        let store = Arc::new(TaskStore::new(16));
        let provider = Arc::new(provider);
        let output = tempfile::tempdir().unwrap();
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::clone(&store),
            Arc::new(ParserRegistry::new()),
            Arc::clone(&provider) as Arc<dyn ExtractionProvider>,
            ReportExporter::new(output.path().to_path_buf()),
        ));
        (orchestrator, store, provider, output)
    }

    fn docx_file(name: &str) -> FileData {
        FileData {
            filename: name.to_string(),
            data: fixtures::build_docx(&[&["some contract text"]]),
        }
    }

    #[tokio::test]
    async fn batch_completes_with_every_file_attempted() {
        let (orchestrator, store, _provider, _output) = orchestrator_with(StubProvider::new());
        let task = crate::types::task::Task::new(2);
        let id = task.id;
        store.insert(task);

        orchestrator
            .run_task(id, vec![docx_file("a.docx"), docx_file("b.docx")])
            .await;

        let snap = store.get(id).unwrap();
        assert_eq!(snap.status, TaskStatus::Completed);
        assert_eq!(snap.processed, snap.total_files);
        assert_eq!(snap.failed, 0);
        assert_eq!(snap.progress, 100.0);
        assert_eq!(snap.results.len(), 2);
        assert!(snap.result_path.is_some());
        assert!(snap.completed_at.is_some());
    }

    #[tokio::test]
    async fn unsupported_file_counts_failed_and_yields_no_result() {
        let (orchestrator, store, _provider, _output) = orchestrator_with(StubProvider::new());
        let task = crate::types::task::Task::new(2);
        let id = task.id;
        store.insert(task);

        let unknown = FileData {
            filename: "notes.txt".to_string(),
            data: b"plain text".to_vec(),
        };
        orchestrator
            .run_task(id, vec![unknown, docx_file("ok.docx")])
            .await;

        let snap = store.get(id).unwrap();
        assert_eq!(snap.status, TaskStatus::Completed);
        assert_eq!(snap.processed, 2);
        assert_eq!(snap.failed, 1);
        assert_eq!(snap.results.len(), 1);
        assert_eq!(snap.results[0].file_name, "ok.docx");
    }

    #[tokio::test]
    async fn failed_pdf_ocr_degrades_to_notice_but_still_processes() {
        let stub = StubProvider {
            fail_pdf_ocr: true,
            ..StubProvider::new()
        };
        let (orchestrator, store, provider, _output) = orchestrator_with(stub);
        let task = crate::types::task::Task::new(1);
        let id = task.id;
        store.insert(task);

        let pdf = FileData {
            filename: "scan.pdf".to_string(),
            data: b"%PDF-1.4".to_vec(),
        };
        orchestrator.run_task(id, vec![pdf]).await;

        let snap = store.get(id).unwrap();
        assert_eq!(snap.processed, 1);
        assert_eq!(snap.failed, 0);
        assert_eq!(snap.results.len(), 1);
        assert!(snap.results[0].metadata.ocr_used);

        // extraction ran on the fixed degradation notice, not on empty text
        let contents = provider.extracted_contents.lock();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0], PDF_OCR_FAILURE_NOTICE);
    }

    #[tokio::test]
    async fn successful_pdf_ocr_feeds_recognized_text_to_extraction() {
        let (orchestrator, store, provider, _output) = orchestrator_with(StubProvider::new());
        let task = crate::types::task::Task::new(1);
        let id = task.id;
        store.insert(task);

        let pdf = FileData {
            filename: "scan.pdf".to_string(),
            data: b"%PDF-1.4".to_vec(),
        };
        orchestrator.run_task(id, vec![pdf]).await;

        let snap = store.get(id).unwrap();
        assert_eq!(snap.results.len(), 1);
        assert_eq!(snap.results[0].file_name, "scan.pdf");

        let contents = provider.extracted_contents.lock();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0], "recognized pdf text");
    }

    #[tokio::test]
    async fn extraction_failure_counts_the_file_as_failed() {
        let stub = StubProvider {
            fail_extract: true,
            ..StubProvider::new()
        };
        let (orchestrator, store, _provider, _output) = orchestrator_with(stub);
        let task = crate::types::task::Task::new(1);
        let id = task.id;
        store.insert(task);

        orchestrator.run_task(id, vec![docx_file("a.docx")]).await;

        let snap = store.get(id).unwrap();
        assert_eq!(snap.status, TaskStatus::Completed);
        assert_eq!((snap.processed, snap.failed), (1, 1));
        assert!(snap.results.is_empty());
    }

    #[tokio::test]
    async fn submit_spawns_and_eventually_completes() {
        let (orchestrator, store, _provider, _output) = orchestrator_with(StubProvider::new());

        let task = orchestrator.submit(vec![docx_file("a.docx")]);
        assert_eq!(task.status, TaskStatus::Pending);

        let deadline = Instant::now() + std::time::Duration::from_secs(5);
        loop {
            let snap = store.get(task.id).unwrap();
            if snap.status == TaskStatus::Completed {
                assert_eq!(snap.processed, 1);
                break;
            }
            assert!(Instant::now() < deadline, "task did not complete in time");
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }

    #[test]
    fn confidence_averages_only_positive_sections() {
        let mut extraction = AiExtraction::default();
        extraction.contract_info.confidence = 0.9;
        extraction.party_a.confidence = 0.0;
        extraction.party_b.confidence = 0.7;

        let confidence = overall_confidence(&extraction);
        assert!((confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn confidence_defaults_to_neutral_when_all_zero() {
        let extraction = AiExtraction::default();
        assert_eq!(overall_confidence(&extraction), 0.8);
    }
}
