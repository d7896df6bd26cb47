use std::path::Path;

use crate::BackendError;

/// Trait for document text extraction backends.
///
/// Implementors provide the raw text of one source document; field
/// extraction lives in `putusan_parsing::CaseExtractor`. A failure here is a
/// document-level failure: the batch layer skips the document and retries
/// it on the next run.
pub trait DocumentBackend: Send + Sync {
    /// Extract the full text content of a document.
    fn extract_text(&self, path: &Path) -> Result<String, BackendError>;
}
