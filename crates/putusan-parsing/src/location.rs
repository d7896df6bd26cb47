use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;
use crate::patterns::{LOCATION_PATTERNS, PatternList, prefix_window};

/// Extract the deciding court, normalized to `PN <name>`.
///
/// Searches the first 500 characters for `Pengadilan Negeri <name>` (cut at
/// a trailing `yang ...` clause) and falls back to an abbreviated
/// `PN <Name>`. Returns `""` when neither is present.
pub fn extract_court_location(text: &str) -> String {
    extract_court_location_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_court_location`].
pub(crate) fn extract_court_location_with_config(text: &str, config: &ParsingConfig) -> String {
    let window = prefix_window(text, config.location_window);
    let patterns = PatternList::new(config.location_patterns.resolve(&LOCATION_PATTERNS));

    match patterns.find_capture(window) {
        Some(raw) => {
            let name = clean_location(raw);
            if name.is_empty() {
                String::new()
            } else {
                format!("PN {name}")
            }
        }
        None => String::new(),
    }
}

/// Drop a trailing relative clause and dangling punctuation from a court name.
fn clean_location(raw: &str) -> String {
    static YANG_CLAUSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+yang\b.*").unwrap());

    YANG_CLAUSE
        .replace(raw, "")
        .trim()
        .trim_end_matches([',', ';', ':'])
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_court_name_with_yang_clause() {
        let text = "Pengadilan Negeri Medan yang mengadili perkara pidana";
        assert_eq!(extract_court_location(text), "PN Medan");
    }

    #[test]
    fn test_full_court_name_to_end_of_line() {
        let text = "PUTUSAN\nPENGADILAN NEGERI JAKARTA PUSAT\nNomor 1/Pid.B/2020";
        assert_eq!(extract_court_location(text), "PN JAKARTA PUSAT");
    }

    #[test]
    fn test_trailing_comma_before_clause() {
        let text = "Pengadilan Negeri Surabaya, yang memeriksa";
        assert_eq!(extract_court_location(text), "PN Surabaya");
    }

    #[test]
    fn test_abbreviated_form() {
        let text = "Putusan PN Bandung tentang perkara";
        assert_eq!(extract_court_location(text), "PN Bandung");
    }

    #[test]
    fn test_abbreviation_requires_capitalized_name() {
        assert_eq!(extract_court_location("PN bandung"), "");
    }

    #[test]
    fn test_outside_window_ignored() {
        let mut text = "x".repeat(600);
        text.push_str("\nPengadilan Negeri Medan yang");
        assert_eq!(extract_court_location(&text), "");
    }

    #[test]
    fn test_no_court() {
        assert_eq!(extract_court_location("tidak ada pengadilan"), "");
    }
}
