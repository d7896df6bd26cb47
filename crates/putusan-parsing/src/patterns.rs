//! Ordered pattern lists shared by the field extractors.
//!
//! Every field is matched by a [`PatternList`]: patterns are tried strictly
//! in declaration order and the first one that matches wins, even when a
//! later pattern would produce a longer or "better" capture. Earlier entries
//! are the more specific layouts, so reordering a list changes behavior.

use once_cell::sync::Lazy;
use regex::Regex;

/// An ordered, first-match-wins list of regexes for one field.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Regex>,
}

impl PatternList {
    pub fn new(patterns: Vec<Regex>) -> Self {
        Self { patterns }
    }

    /// Compile string patterns in order.
    pub fn compile(patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns: Result<Vec<_>, _> = patterns.iter().map(|p| Regex::new(p)).collect();
        Ok(Self::new(patterns?))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Return the first pattern's capture group 1 (whole match if the pattern
    /// has no group), trimmed. Returns `None` when nothing matches.
    pub fn find_capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.patterns.iter().find_map(|re| {
            re.captures(text).map(|caps| {
                caps.get(1)
                    .or_else(|| caps.get(0))
                    .map_or("", |m| m.as_str())
                    .trim()
            })
        })
    }

    /// Like [`find_capture`](Self::find_capture) but maps a miss to `""`.
    pub fn first_capture(&self, text: &str) -> String {
        self.find_capture(text).unwrap_or_default().to_string()
    }
}

/// The leading `max_chars` characters of `text`, cut on a char boundary.
pub fn prefix_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `max_chars` characters of `text` starting at byte offset `start`.
///
/// `start` must lie on a char boundary (regex match offsets always do).
pub fn window_from(text: &str, start: usize, max_chars: usize) -> &str {
    prefix_window(&text[start..], max_chars)
}

fn compile_all(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
}

/// Indonesian month names, including the older "Nopember" spelling.
pub const MONTHS: &str =
    "Januari|Februari|Maret|April|Mei|Juni|Juli|Agustus|September|Oktober|November|Nopember|Desember";

pub(crate) static CASE_NUMBER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)Nomor\s+(\d+/[^\n]+)",
        r"(?i)NOMOR\s+(\d+/[^\n]+)",
        r"(?i)Perkara\s+Nomor\s+(\d+/[^\n]+)",
        r"(?i)Nomor\s*:\s*(\d+/[^\n]+)",
    ])
});

pub(crate) static DECISION_DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    let by_month_name = format!(r"(?i)\b(\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}})");
    compile_all(&[
        r"(?i)tanggal\s+(\d{1,2}\s+\w+\s+\d{4})",
        by_month_name.as_str(),
    ])
});

pub(crate) static LOCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?im)Pengadilan\s+Negeri\s+([^\n]+?)(?:\s+yang\b|$)",
        r"\bPN\s+([A-Z][a-z]+)",
    ])
});

pub(crate) static CLERK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)Panitera\s*:\s*([^\n]+)",
        r"(?i)Panitera\s+Pengganti\s*:\s*([^\n]+)",
    ])
});

pub(crate) static PROSECUTOR_PATTERNS: Lazy<Vec<Regex>> =
    Lazy::new(|| compile_all(&[r"(?i)Penuntut\s+Umum\s*:\s*([^\n]+)"]));

pub(crate) static DEFENSE_COUNSEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile_all(&[
        r"(?i)Penasehat\s+Hukum\s*:\s*([^\n]+)",
        r"(?i)Penasihat\s+Hukum\s*:\s*([^\n]+)",
    ])
});

pub(crate) static DEFENDANT_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Terdakwa\s*:\s*([^\n]+)").unwrap());

pub(crate) static JUDGE_SECTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Majelis\s+Hakim").unwrap());

pub(crate) static JUDGE_SECTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Panitera|Penuntut").unwrap());

/// Capitalized name tokens on one line, optionally followed by `S.H.` / `M.H.`.
pub(crate) static JUDGE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*(?:,\s*S\.H\.(?:,\s*M\.H\.)?)?").unwrap()
});
