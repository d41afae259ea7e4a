use crate::aggregate::Aggregator;
use crate::dispatch::Dispatcher;
use crate::ExtractorSettings;
use chrono::Utc;
use futures::future::join_all;
use shared_types::{EmailSet, ExtractionError, ExtractionReport, LeafFailure, NamedBlob};
use std::path::Path;
use tracing::{info, info_span, Instrument};

/// Entry point: one blob in, every address found anywhere inside it out.
pub struct EmailExtractor {
    dispatcher: Dispatcher,
}

impl EmailExtractor {
    pub fn new(settings: ExtractorSettings) -> Self {
        Self {
            dispatcher: Dispatcher::new(&settings),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExtractorSettings::default())
    }

    /// Use a hand-built dispatch table.
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Extract from one named blob, recursing through nested archives.
    ///
    /// Never fails as a whole: leaves that could not be read are listed in
    /// the report next to whatever was recovered from the others.
    pub async fn extract(&self, blob: NamedBlob) -> ExtractionReport {
        let span = info_span!("extract", source = %blob.name, bytes = blob.len());

        async move {
            let started_at = Utc::now().timestamp();
            let source = blob.name.clone();

            let mut aggregator = Aggregator::new();
            aggregator.push(self.dispatcher.dispatch(blob, String::new()).await);
            let report = aggregator.finish(source, started_at);

            info!(
                "Extracted {} addresses from {} leaves ({} failed)",
                report.emails.len(),
                report.leaves_processed,
                report.failures.len()
            );
            report
        }
        .instrument(span)
        .await
    }

    /// Read a file and extract from it under its file name.
    pub async fn extract_path(&self, path: &Path) -> ExtractionReport {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        match tokio::fs::read(path).await {
            Ok(bytes) => self.extract(NamedBlob::new(name, bytes)).await,
            Err(e) => {
                let now = Utc::now().timestamp();
                ExtractionReport {
                    source: name.clone(),
                    emails: EmailSet::new(),
                    failures: vec![LeafFailure::new(name, ExtractionError::from(e))],
                    leaves_processed: 0,
                    started_at: now,
                    finished_at: now,
                }
            }
        }
    }

    /// Match raw text directly, skipping format detection.
    pub fn extract_text(&self, text: &str) -> EmailSet {
        self.dispatcher.matcher().match_text(text)
    }

    /// Extract from several independent inputs concurrently. Reports come back
    /// in input order.
    pub async fn extract_many(&self, blobs: Vec<NamedBlob>) -> Vec<ExtractionReport> {
        join_all(blobs.into_iter().map(|blob| self.extract(blob))).await
    }
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::with_defaults()
    }
}
