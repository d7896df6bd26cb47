use crate::config::ParsingConfig;
use crate::patterns::{CASE_NUMBER_PATTERNS, PatternList};

/// Extract the case number (nomor perkara), e.g. `123/Pid.Sus/2023/PN Jkt.Pst`.
///
/// Looks for a `Nomor` / `NOMOR` / `Perkara Nomor` label followed by digits
/// and a slash-delimited identifier on the same line. Returns `""` when no
/// label is found.
pub fn extract_case_number(text: &str) -> String {
    extract_case_number_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_case_number`].
pub(crate) fn extract_case_number_with_config(text: &str, config: &ParsingConfig) -> String {
    let patterns = PatternList::new(config.case_number_patterns.resolve(&CASE_NUMBER_PATTERNS));
    patterns.first_capture(text)
}
