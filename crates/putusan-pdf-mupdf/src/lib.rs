use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};
use once_cell::sync::Lazy;
use regex::Regex;

use putusan_core::{BackendError, DocumentBackend};

/// Lines the Supreme Court decision directory stamps onto every page.
static PAGE_BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^\s*(?:Halaman\s+\d+(?:\s+dari\s+\d+)?(?:\s+Putusan\b.*)?|Direktori\s+Putusan\s+Mahkamah\s+Agung\b.*|putusan\.mahkamahagung\.go\.id|Disclaimer)\s*$",
    )
    .unwrap()
});

/// MuPDF-based implementation of [`DocumentBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency so
/// that plain-text runs do not transitively depend on it.
///
/// Published decisions carry a running header and a page footer
/// ("Halaman 3 dari 20 Putusan Nomor ..."). By default blocks in the top 4%
/// and bottom 6% of each page are dropped, as are lines that match the
/// directory's page boilerplate, so a defendant block or judge list that
/// spans a page break reads as continuous text.
pub struct MupdfBackend {
    /// Fraction of page height from bottom to exclude as footer.
    /// `None` disables footer exclusion.
    footer_exclusion_ratio: Option<f32>,
    /// Fraction of page height from top to exclude as header.
    /// `None` disables header exclusion.
    header_exclusion_ratio: Option<f32>,
    strip_boilerplate: bool,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self {
            footer_exclusion_ratio: Some(0.06),
            header_exclusion_ratio: Some(0.04),
            strip_boilerplate: true,
        }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer exclusion ratio. Pass `0.0` to disable.
    pub fn with_footer_exclusion(mut self, ratio: f32) -> Self {
        self.footer_exclusion_ratio = (ratio > 0.0).then_some(ratio);
        self
    }

    /// Set the header exclusion ratio. Pass `0.0` to disable.
    pub fn with_header_exclusion(mut self, ratio: f32) -> Self {
        self.header_exclusion_ratio = (ratio > 0.0).then_some(ratio);
        self
    }

    /// Keep page boilerplate lines in the output.
    pub fn keep_boilerplate(mut self) -> Self {
        self.strip_boilerplate = false;
        self
    }

    fn page_text(&self, page: &Page) -> Result<String, BackendError> {
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        let bounds = page
            .bounds()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
        let height = bounds.y1 - bounds.y0;
        let header_limit = self.header_exclusion_ratio.map(|r| bounds.y0 + height * r);
        let footer_limit = self.footer_exclusion_ratio.map(|r| bounds.y1 - height * r);

        let mut text = String::new();
        for block in text_page.blocks() {
            let block_bounds = block.bounds();

            // Entirely inside the header band
            if header_limit.is_some_and(|limit| block_bounds.y1 <= limit) {
                continue;
            }
            // Top edge inside the footer band
            if footer_limit.is_some_and(|limit| block_bounds.y0 >= limit) {
                continue;
            }

            for line in block.lines() {
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                if self.strip_boilerplate && is_page_boilerplate(&line_text) {
                    continue;
                }
                text.push_str(&line_text);
                text.push('\n');
            }
        }
        Ok(text)
    }
}

impl DocumentBackend for MupdfBackend {
    fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages = Vec::new();
        for page in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            pages.push(self.page_text(&page)?);
        }

        Ok(pages.join("\n"))
    }
}

/// Whether a single extracted line is page furniture rather than content.
pub fn is_page_boilerplate(line: &str) -> bool {
    PAGE_BOILERPLATE.is_match(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_footer_lines() {
        assert!(is_page_boilerplate("Halaman 3 dari 20"));
        assert!(is_page_boilerplate(
            "Halaman 3 dari 20 Putusan Nomor 123/Pid.Sus/2023/PN Jkt.Pst"
        ));
        assert!(is_page_boilerplate("  Halaman 12  "));
    }

    #[test]
    fn test_directory_watermark_lines() {
        assert!(is_page_boilerplate("Direktori Putusan Mahkamah Agung Republik Indonesia"));
        assert!(is_page_boilerplate("putusan.mahkamahagung.go.id"));
        assert!(is_page_boilerplate("Disclaimer"));
    }

    #[test]
    fn test_content_lines_kept() {
        assert!(!is_page_boilerplate("Nama lengkap : Budi Santoso"));
        assert!(!is_page_boilerplate("sebagaimana tersebut dalam halaman 3 berkas perkara"));
        assert!(!is_page_boilerplate(""));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let backend = MupdfBackend::new();
        let err = backend
            .extract_text(Path::new("/nonexistent/putusan.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)));
    }
}
