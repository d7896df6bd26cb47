use std::path::PathBuf;

use putusan_core::{DocumentBackend, Provenance};
use putusan_parsing::CaseExtractor;

use crate::corpus::Corpus;
use crate::ledger::Ledger;
use crate::reader::SourceReader;
use crate::source::{SourceLayout, discover_sources};
use crate::IngestError;

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory holding the per-court subdirectories.
    pub root: PathBuf,
    pub ledger_path: PathBuf,
    pub output_path: PathBuf,
    pub layout: SourceLayout,
    /// Documents attempted per run; `0` means no limit.
    pub max_documents: usize,
    /// Attempts between [`ProgressEvent::Checkpoint`]s; `0` disables them.
    pub progress_interval: usize,
    pub lossy_decode: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            ledger_path: PathBuf::from("list.txt"),
            output_path: PathBuf::from("extract.json"),
            layout: SourceLayout::default(),
            max_documents: 1000,
            progress_interval: 100,
            lossy_decode: false,
        }
    }
}

/// Progress notifications emitted during [`run_batch`].
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started {
        discovered: usize,
        already_processed: usize,
        /// Documents this run will attempt, after the cap.
        planned: usize,
    },
    Processing {
        index: usize,
        total: usize,
        name: String,
    },
    Failed {
        name: String,
        error: String,
    },
    Checkpoint {
        attempted: usize,
        added: usize,
        failed: usize,
    },
    CapReached {
        attempted: usize,
        remaining: usize,
    },
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    /// Discovered sources skipped because the ledger already lists them.
    pub already_processed: usize,
    pub attempted: usize,
    pub added: usize,
    pub failed: usize,
    /// Corpus entries after the rewrite.
    pub corpus_total: usize,
}

/// Load the corpus and ledger named by `config` and run a batch over them.
///
/// The corpus is loaded first: a missing or malformed corpus aborts the run
/// before the ledger or any other file is touched.
pub fn run(
    config: &BatchConfig,
    extractor: &CaseExtractor,
    progress: impl Fn(ProgressEvent),
) -> Result<RunSummary, IngestError> {
    let mut corpus = Corpus::load(&config.output_path)?;
    let mut ledger = Ledger::load(&config.ledger_path)?;
    tracing::info!(
        corpus = corpus.len(),
        ledger = ledger.len(),
        "loaded persisted state"
    );
    let reader = SourceReader::new(config.lossy_decode);
    run_batch(extractor, &reader, &mut ledger, &mut corpus, config, progress)
}

/// Process every discovered source the ledger does not list yet, up to the
/// per-run cap, then rewrite the corpus.
///
/// Each successfully extracted document is pushed to the corpus and then
/// recorded in the ledger before the next document starts. A document whose
/// text cannot be read is logged, counted and left out of the ledger so the
/// next run retries it. If the ledger cannot be written, processing stops:
/// the in-flight record is dropped, the records already produced are still
/// saved, and the ledger error is returned.
pub fn run_batch(
    extractor: &CaseExtractor,
    backend: &dyn DocumentBackend,
    ledger: &mut Ledger,
    corpus: &mut Corpus,
    config: &BatchConfig,
    progress: impl Fn(ProgressEvent),
) -> Result<RunSummary, IngestError> {
    let sources = discover_sources(&config.root, &config.layout)?;
    let discovered = sources.len();
    let pending: Vec<_> = sources
        .into_iter()
        .filter(|doc| !ledger.contains(&doc.name))
        .collect();

    let planned = match config.max_documents {
        0 => pending.len(),
        cap => pending.len().min(cap),
    };

    let mut summary = RunSummary {
        discovered,
        already_processed: discovered - pending.len(),
        ..Default::default()
    };

    tracing::info!(
        discovered,
        already_processed = summary.already_processed,
        pending = pending.len(),
        planned,
        "starting batch"
    );
    progress(ProgressEvent::Started {
        discovered,
        already_processed: summary.already_processed,
        planned,
    });

    let mut outcome = Ok(());
    for (index, doc) in pending.iter().enumerate() {
        if index >= planned {
            tracing::info!(
                attempted = summary.attempted,
                remaining = pending.len() - index,
                "per-run limit reached, stopping"
            );
            progress(ProgressEvent::CapReached {
                attempted: summary.attempted,
                remaining: pending.len() - index,
            });
            break;
        }

        tracing::debug!(source = %doc.name, court = %doc.court, "processing");
        progress(ProgressEvent::Processing {
            index,
            total: planned,
            name: doc.name.clone(),
        });
        summary.attempted += 1;

        let provenance = Provenance::new(&doc.name);
        match extractor.extract_from_path(&doc.path, backend, &provenance) {
            Ok(record) => {
                corpus.push(record);
                if let Err(e) = ledger.record(&doc.name) {
                    corpus.pop_added();
                    tracing::error!(source = %doc.name, error = %e, "ledger write failed, stopping");
                    outcome = Err(e);
                    break;
                }
                summary.added += 1;
            }
            Err(e) => {
                tracing::warn!(source = %doc.name, error = %e, "skipping unreadable document");
                summary.failed += 1;
                progress(ProgressEvent::Failed {
                    name: doc.name.clone(),
                    error: e.to_string(),
                });
            }
        }

        if config.progress_interval > 0 && summary.attempted % config.progress_interval == 0 {
            tracing::info!(
                attempted = summary.attempted,
                added = summary.added,
                failed = summary.failed,
                "progress"
            );
            progress(ProgressEvent::Checkpoint {
                attempted: summary.attempted,
                added: summary.added,
                failed: summary.failed,
            });
        }
    }

    if let Err(save_err) = corpus.save() {
        if outcome.is_err() {
            tracing::error!(error = %save_err, "corpus rewrite failed after ledger failure");
        } else {
            return Err(save_err);
        }
    }
    summary.corpus_total = corpus.len();
    outcome?;

    tracing::info!(
        added = summary.added,
        failed = summary.failed,
        corpus_total = summary.corpus_total,
        "batch complete"
    );
    Ok(summary)
}

/// Read-only snapshot of the persisted state and pending work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// `None` when the corpus file does not exist yet.
    pub corpus_entries: Option<usize>,
    pub ledger_entries: usize,
    pub discovered: usize,
    pub pending: usize,
}

/// Count corpus entries, ledger entries and pending sources without
/// processing or writing anything.
pub fn status(config: &BatchConfig) -> Result<StatusReport, IngestError> {
    let corpus_entries = match Corpus::load(&config.output_path) {
        Ok(corpus) => Some(corpus.len()),
        Err(IngestError::MissingCorpus(_)) => None,
        Err(e) => return Err(e),
    };
    let ledger = Ledger::load(&config.ledger_path)?;
    let sources = discover_sources(&config.root, &config.layout)?;
    let pending = sources.iter().filter(|doc| !ledger.contains(&doc.name)).count();

    Ok(StatusReport {
        corpus_entries,
        ledger_entries: ledger.len(),
        discovered: sources.len(),
        pending,
    })
}
