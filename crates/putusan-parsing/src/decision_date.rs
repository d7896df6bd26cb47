use crate::config::ParsingConfig;
use crate::patterns::{DECISION_DATE_PATTERNS, PatternList, prefix_window};

/// Extract the decision date (tanggal putusan), e.g. `5 Januari 2023`.
///
/// Only the first 2000 characters are searched: dates further down are
/// usually cited precedents or event chronology, not the decision date.
/// A `tanggal <d> <month> <yyyy>` label is preferred over a bare
/// `<d> <Indonesian month> <yyyy>` anywhere in the window.
pub fn extract_decision_date(text: &str) -> String {
    extract_decision_date_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_decision_date`].
pub(crate) fn extract_decision_date_with_config(text: &str, config: &ParsingConfig) -> String {
    let window = prefix_window(text, config.date_window);
    let patterns =
        PatternList::new(config.decision_date_patterns.resolve(&DECISION_DATE_PATTERNS));
    patterns.first_capture(window)
}
