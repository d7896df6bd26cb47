use std::path::Path;

use putusan_core::{BackendError, DocumentBackend};

/// Reads UTF-8 text files.
///
/// Strict by default: a file that is not valid UTF-8 fails with
/// [`BackendError::InvalidEncoding`]. In lossy mode invalid sequences are
/// replaced with U+FFFD instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextBackend {
    lossy: bool,
}

impl PlainTextBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lossy(lossy: bool) -> Self {
        Self { lossy }
    }
}

impl DocumentBackend for PlainTextBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let bytes = std::fs::read(path)?;
        if self.lossy {
            return Ok(String::from_utf8_lossy(&bytes).into_owned());
        }
        String::from_utf8(bytes)
            .map_err(|e| BackendError::InvalidEncoding(format!("{}: {}", path.display(), e)))
    }
}

/// Dispatches on file extension: `.pdf` goes through MuPDF (when the `pdf`
/// feature is enabled), everything else is read as plain text.
#[derive(Default)]
pub struct SourceReader {
    text: PlainTextBackend,
    #[cfg(feature = "pdf")]
    pdf: putusan_pdf_mupdf::MupdfBackend,
}

impl SourceReader {
    pub fn new(lossy: bool) -> Self {
        Self {
            text: PlainTextBackend::lossy(lossy),
            #[cfg(feature = "pdf")]
            pdf: putusan_pdf_mupdf::MupdfBackend::default(),
        }
    }
}

impl DocumentBackend for SourceReader {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        if is_pdf(path) {
            return self.extract_pdf(path);
        }
        self.text.extract_text(path)
    }
}

impl SourceReader {
    #[cfg(feature = "pdf")]
    fn extract_pdf(&self, path: &Path) -> Result<String, BackendError> {
        self.pdf.extract_text(path)
    }

    #[cfg(not(feature = "pdf"))]
    fn extract_pdf(&self, path: &Path) -> Result<String, BackendError> {
        Err(BackendError::Unsupported(format!(
            "{}: PDF support not compiled in (enable the `pdf` feature of putusan-ingest)",
            path.display()
        )))
    }
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Read one source document with the extension-based dispatch of [`SourceReader`].
pub fn read_document(path: &Path, lossy: bool) -> Result<String, BackendError> {
    SourceReader::new(lossy).extract_text(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "Terdakwa: Budi Santoso — warga négara").unwrap();
        let text = read_document(&path, false).unwrap();
        assert!(text.contains("négara"));
    }

    #[test]
    fn test_invalid_utf8_strict_and_lossy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, b"Nomor 1/Pid.B/2020 \xff\xfe akhir").unwrap();

        let err = PlainTextBackend::new().extract_text(&path).unwrap_err();
        assert!(matches!(err, BackendError::InvalidEncoding(_)));

        let text = PlainTextBackend::lossy(true).extract_text(&path).unwrap();
        assert!(text.starts_with("Nomor 1/Pid.B/2020 "));
        assert!(text.ends_with(" akhir"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_document(Path::new("/nonexistent/a.txt"), false).unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[cfg(not(feature = "pdf"))]
    #[test]
    fn test_pdf_unsupported_without_feature() {
        let err = read_document(Path::new("putusan.PDF"), false).unwrap_err();
        assert!(matches!(err, BackendError::Unsupported(_)));
    }
}
