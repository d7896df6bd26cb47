use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use putusan_ingest::{RunSummary, StatusReport};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the end-of-run summary.
pub fn print_summary(w: &mut dyn Write, summary: &RunSummary, color: ColorMode) -> std::io::Result<()> {
    writeln!(w)?;
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{}", "SUMMARY".bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "SUMMARY")?;
        writeln!(w, "{}", sep)?;
    }

    writeln!(w, "  Sources discovered: {}", summary.discovered)?;
    let skipped = format!("Already processed: {}", summary.already_processed);
    if color.enabled() {
        writeln!(w, "  {}", skipped.dimmed())?;
    } else {
        writeln!(w, "  {}", skipped)?;
    }
    writeln!(w, "  Attempted this run: {}", summary.attempted)?;
    writeln!(w)?;

    if color.enabled() {
        writeln!(w, "  {} {}", "Newly added:".green(), summary.added)?;
    } else {
        writeln!(w, "  Newly added: {}", summary.added)?;
    }
    if summary.failed > 0 {
        if color.enabled() {
            writeln!(w, "  {} {}", "Unreadable (will retry):".red(), summary.failed)?;
        } else {
            writeln!(w, "  Unreadable (will retry): {}", summary.failed)?;
        }
    }
    writeln!(w, "  Total entries in corpus: {}", summary.corpus_total)?;
    writeln!(w)?;
    Ok(())
}

/// Print the read-only state report of `putusan status`.
pub fn print_status(w: &mut dyn Write, report: &StatusReport, color: ColorMode) -> std::io::Result<()> {
    match report.corpus_entries {
        Some(n) => writeln!(w, "Corpus entries:   {}", n)?,
        None => {
            let msg = "Corpus entries:   (missing, run `putusan init`)";
            if color.enabled() {
                writeln!(w, "{}", msg.yellow())?;
            } else {
                writeln!(w, "{}", msg)?;
            }
        }
    }
    writeln!(w, "Ledger entries:   {}", report.ledger_entries)?;
    writeln!(w, "Sources found:    {}", report.discovered)?;
    if color.enabled() && report.pending > 0 {
        writeln!(w, "Pending sources:  {}", report.pending.cyan())?;
    } else {
        writeln!(w, "Pending sources:  {}", report.pending)?;
    }
    Ok(())
}

/// Report whether `putusan init` created a state file.
pub fn print_init_result(
    w: &mut dyn Write,
    what: &str,
    path: &Path,
    created: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    let status = match (created, color.enabled()) {
        (true, true) => "created".green().to_string(),
        (false, true) => "exists".dimmed().to_string(),
        (true, false) => "created".to_string(),
        (false, false) => "exists".to_string(),
    };
    writeln!(w, "{:<7} {} {}", what, status, path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_plain() {
        let summary = RunSummary {
            discovered: 10,
            already_processed: 4,
            attempted: 6,
            added: 5,
            failed: 1,
            corpus_total: 9,
        };
        let out = render(|w| print_summary(w, &summary, ColorMode(false)));
        assert!(out.contains("Sources discovered: 10"));
        assert!(out.contains("Already processed: 4"));
        assert!(out.contains("Newly added: 5"));
        assert!(out.contains("Unreadable (will retry): 1"));
        assert!(out.contains("Total entries in corpus: 9"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn test_summary_hides_zero_failures() {
        let out = render(|w| print_summary(w, &RunSummary::default(), ColorMode(false)));
        assert!(!out.contains("Unreadable"));
    }

    #[test]
    fn test_status_missing_corpus() {
        let report = StatusReport {
            corpus_entries: None,
            ledger_entries: 0,
            discovered: 3,
            pending: 3,
        };
        let out = render(|w| print_status(w, &report, ColorMode(false)));
        assert!(out.contains("putusan init"));
        assert!(out.contains("Pending sources:  3"));
    }

    #[test]
    fn test_init_result() {
        let out = render(|w| {
            print_init_result(w, "corpus", Path::new("extract.json"), true, ColorMode(false))
        });
        assert_eq!(out, "corpus  created extract.json\n");
    }
}
