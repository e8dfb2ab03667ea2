//! Batch export of diagram entries to image files.
//!
//! Each entry is encoded, fetched and written independently. A failure is
//! recorded in the entry's [`RenderResult`] and the batch moves on; only
//! problems that make every write impossible (bad entry names, an output
//! directory that cannot be created) are returned as errors.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use diagram_export_config::{DiagramEntry, validate_entries};
use parking_lot::Mutex;

use crate::error::{ExportError, RenderFailure};
use crate::http::Fetcher;
use crate::request::{Endpoint, RenderRequest};

/// First eight bytes of every PNG file.
pub const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// How a single entry ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Written { bytes: usize },
    Failed(RenderFailure),
}

/// Per-entry result of an export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub name: String,
    /// Where the image was (or would have been) written.
    pub path: PathBuf,
    pub outcome: RenderOutcome,
}

impl RenderResult {
    pub fn success(&self) -> bool {
        matches!(self.outcome, RenderOutcome::Written { .. })
    }

    pub fn bytes_written(&self) -> Option<usize> {
        match self.outcome {
            RenderOutcome::Written { bytes } => Some(bytes),
            RenderOutcome::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&RenderFailure> {
        match &self.outcome {
            RenderOutcome::Failed(failure) => Some(failure),
            RenderOutcome::Written { .. } => None,
        }
    }
}

/// Results of a run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub results: Vec<RenderResult>,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success()).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RenderFailure> {
        self.results.iter().filter_map(RenderResult::failure)
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded() == self.total()
    }
}

/// Receives progress callbacks during an export run.
///
/// With more than one job, callbacks for different entries may interleave.
pub trait ExportObserver: Sync {
    /// Called before the entry is fetched.
    fn on_start(&self, _entry: &DiagramEntry, _path: &Path) {}

    /// Called once the entry has been written or has failed.
    fn on_finish(&self, _result: &RenderResult) {}
}

/// Silent observer.
impl ExportObserver for () {}

/// Renders a list of diagram entries into an output directory.
pub struct DiagramExporter<F: Fetcher> {
    fetcher: F,
    endpoint: Endpoint,
    jobs: usize,
}

impl<F: Fetcher> DiagramExporter<F> {
    pub fn new(fetcher: F, endpoint: Endpoint) -> Self {
        Self {
            fetcher,
            endpoint,
            jobs: 1,
        }
    }

    /// Number of concurrent workers; values below 1 are treated as 1.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Output path for an entry.
    pub fn output_path(&self, output_dir: &Path, entry: &DiagramEntry) -> PathBuf {
        output_dir.join(entry.file_name(self.endpoint.image_type()))
    }

    /// Build every request without touching the network or the disk.
    pub fn plan(&self, entries: &[DiagramEntry]) -> Vec<RenderRequest> {
        entries
            .iter()
            .map(|entry| self.endpoint.request_for(entry))
            .collect()
    }

    /// Render every entry into `output_dir`.
    ///
    /// The directory is created (with parents) before the first write.
    /// Individual failures are recorded in the summary, never returned.
    pub fn export_all(
        &self,
        entries: &[DiagramEntry],
        output_dir: &Path,
        observer: &dyn ExportObserver,
    ) -> Result<RunSummary, ExportError> {
        validate_entries(entries)?;

        fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateOutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        log::info!(
            "Exporting {} diagrams to {:?} with {} job(s)",
            entries.len(),
            output_dir,
            self.jobs.min(entries.len()).max(1)
        );

        let results = if self.jobs <= 1 || entries.len() <= 1 {
            entries
                .iter()
                .map(|entry| self.render_entry(entry, output_dir, observer))
                .collect()
        } else {
            self.render_pool(entries, output_dir, observer)
        };

        let summary = RunSummary { results };
        log::info!(
            "Export finished: {}/{} succeeded",
            summary.succeeded(),
            summary.total()
        );
        Ok(summary)
    }

    /// Workers pull indices from a shared cursor; results land in their
    /// input slot so the summary order matches a sequential run.
    fn render_pool(
        &self,
        entries: &[DiagramEntry],
        output_dir: &Path,
        observer: &dyn ExportObserver,
    ) -> Vec<RenderResult> {
        let cursor = AtomicUsize::new(0);
        let slots: Mutex<Vec<Option<RenderResult>>> =
            Mutex::new((0..entries.len()).map(|_| None).collect());
        let workers = self.jobs.min(entries.len());

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    loop {
                        let index = cursor.fetch_add(1, Ordering::Relaxed);
                        let Some(entry) = entries.get(index) else {
                            break;
                        };
                        let result = self.render_entry(entry, output_dir, observer);
                        slots.lock()[index] = Some(result);
                    }
                });
            }
        });

        slots.into_inner().into_iter().flatten().collect()
    }

    fn render_entry(
        &self,
        entry: &DiagramEntry,
        output_dir: &Path,
        observer: &dyn ExportObserver,
    ) -> RenderResult {
        let path = self.output_path(output_dir, entry);
        observer.on_start(entry, &path);

        let request = self.endpoint.request_for(entry);
        log::debug!(
            "Rendering {} ({} payload bytes)",
            entry.name,
            request.encoded_payload.len()
        );

        let outcome = match self.fetch_and_write(&request, &path) {
            Ok(bytes) => {
                log::info!("Rendered {} -> {:?} ({} bytes)", entry.name, path, bytes);
                RenderOutcome::Written { bytes }
            }
            Err(message) => {
                log::warn!("Render failed for {}: {}", entry.name, message);
                RenderOutcome::Failed(RenderFailure::new(entry.name.as_str(), message))
            }
        };

        let result = RenderResult {
            name: entry.name.clone(),
            path,
            outcome,
        };
        observer.on_finish(&result);
        result
    }

    fn fetch_and_write(&self, request: &RenderRequest, path: &Path) -> Result<usize, String> {
        let body = self.fetcher.fetch(&request.url).map_err(|e| e.to_string())?;
        if body.is_empty() {
            return Err("empty response body".to_string());
        }

        if self.endpoint.image_type() == "png" && !body.starts_with(PNG_SIGNATURE) {
            log::warn!(
                "Response for {} does not start with a PNG signature; writing it anyway",
                request.name
            );
        }

        fs::write(path, &body)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        Ok(body.len())
    }
}
