//! Incremental batch ingestion of court decisions.
//!
//! A run discovers source documents under a corpus root, skips everything
//! the [`Ledger`] already lists, extracts a record from each remaining
//! document and appends it to the persisted [`Corpus`]. The ledger is
//! written one line per document as it is processed; the corpus is
//! rewritten once at the end of the run.

use std::path::PathBuf;

use thiserror::Error;

pub mod batch;
pub mod corpus;
pub mod ledger;
pub mod reader;
pub mod source;

pub use batch::{BatchConfig, ProgressEvent, RunSummary, StatusReport, run, run_batch, status};
pub use corpus::Corpus;
pub use ledger::Ledger;
pub use reader::{PlainTextBackend, SourceReader, read_document};
pub use source::{SourceDocument, SourceLayout, discover_sources, normalize_source_name};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("corpus file {0} does not exist (create it with `putusan init`)")]
    MissingCorpus(PathBuf),
    #[error("corpus file {path} is not a JSON array: {reason}")]
    MalformedCorpus { path: PathBuf, reason: String },
    #[error("corpus root {0} does not exist")]
    MissingRoot(PathBuf),
    #[error("failed to update ledger {path}: {source}")]
    Ledger {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write corpus {path}: {source}")]
    CorpusWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
