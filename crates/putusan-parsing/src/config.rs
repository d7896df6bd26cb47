use regex::Regex;

use putusan_core::DEFAULT_NATIONALITY;
use putusan_core::config_file::ParsingWindowsConfig;

/// Controls how a list of patterns is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults (tried after every default).
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Configuration for the field extractors.
///
/// Pattern fields are `ListOverride<Regex>` / `Option<Regex>`: the default
/// variant means "use the built-in patterns". Use [`ParsingConfigBuilder`]
/// to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── case_number.rs ──
    pub(crate) case_number_patterns: ListOverride<Regex>,

    // ── decision_date.rs ──
    pub(crate) decision_date_patterns: ListOverride<Regex>,
    /// Leading characters searched for the decision date.
    pub(crate) date_window: usize,

    // ── location.rs ──
    pub(crate) location_patterns: ListOverride<Regex>,
    /// Leading characters searched for the court name.
    pub(crate) location_window: usize,

    // ── defendant.rs ──
    pub(crate) defendant_marker_re: Option<Regex>,
    /// Leading characters searched for defendant markers.
    pub(crate) defendant_window: usize,
    /// Characters after each marker searched for labelled sub-fields.
    pub(crate) defendant_section_len: usize,
    pub(crate) default_nationality: String,

    // ── judges.rs ──
    pub(crate) judge_section_re: Option<Regex>,
    pub(crate) judge_section_end_re: Option<Regex>,
    pub(crate) judge_name_re: Option<Regex>,
    /// Panel members kept after the presiding judge.
    pub(crate) max_panel_members: usize,

    // ── officials.rs ──
    pub(crate) clerk_patterns: ListOverride<Regex>,
    pub(crate) prosecutor_patterns: ListOverride<Regex>,
    pub(crate) defense_counsel_patterns: ListOverride<Regex>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            case_number_patterns: ListOverride::Default,
            decision_date_patterns: ListOverride::Default,
            date_window: 2000,
            location_patterns: ListOverride::Default,
            location_window: 500,
            defendant_marker_re: None,
            defendant_window: 3000,
            defendant_section_len: 2000,
            default_nationality: DEFAULT_NATIONALITY.to_string(),
            judge_section_re: None,
            judge_section_end_re: None,
            judge_name_re: None,
            max_panel_members: 2,
            clerk_patterns: ListOverride::Default,
            prosecutor_patterns: ListOverride::Default,
            defense_counsel_patterns: ListOverride::Default,
        }
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    case_number_patterns: ListOverrideBuilder,
    decision_date_patterns: ListOverrideBuilder,
    date_window: Option<usize>,
    location_patterns: ListOverrideBuilder,
    location_window: Option<usize>,
    defendant_marker_re: Option<String>,
    defendant_window: Option<usize>,
    defendant_section_len: Option<usize>,
    default_nationality: Option<String>,
    judge_section_re: Option<String>,
    judge_section_end_re: Option<String>,
    judge_name_re: Option<String>,
    max_panel_members: Option<usize>,
    clerk_patterns: ListOverrideBuilder,
    prosecutor_patterns: ListOverrideBuilder,
    defense_counsel_patterns: ListOverrideBuilder,
}

/// Helper for building `ListOverride<Regex>` from string patterns.
#[derive(Debug, Clone, Default)]
enum ListOverrideBuilder {
    #[default]
    Default,
    Replace(Vec<String>),
    Extend(Vec<String>),
}

impl ListOverrideBuilder {
    fn push(&mut self, pattern: String) {
        match self {
            ListOverrideBuilder::Extend(v) => v.push(pattern),
            _ => *self = ListOverrideBuilder::Extend(vec![pattern]),
        }
    }
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the window sizes and nationality from an on-disk config section.
    pub fn from_file_config(file: &ParsingWindowsConfig) -> Self {
        Self {
            date_window: file.date_window,
            location_window: file.location_window,
            defendant_window: file.defendant_window,
            defendant_section_len: file.defendant_section_len,
            default_nationality: file.default_nationality.clone(),
            ..Self::default()
        }
    }

    // ── Case number ──

    pub fn set_case_number_patterns(mut self, patterns: Vec<String>) -> Self {
        self.case_number_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_case_number_pattern(mut self, pattern: String) -> Self {
        self.case_number_patterns.push(pattern);
        self
    }

    // ── Decision date ──

    pub fn set_decision_date_patterns(mut self, patterns: Vec<String>) -> Self {
        self.decision_date_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_decision_date_pattern(mut self, pattern: String) -> Self {
        self.decision_date_patterns.push(pattern);
        self
    }

    pub fn date_window(mut self, chars: usize) -> Self {
        self.date_window = Some(chars);
        self
    }

    // ── Court location ──

    pub fn set_location_patterns(mut self, patterns: Vec<String>) -> Self {
        self.location_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_location_pattern(mut self, pattern: String) -> Self {
        self.location_patterns.push(pattern);
        self
    }

    pub fn location_window(mut self, chars: usize) -> Self {
        self.location_window = Some(chars);
        self
    }

    // ── Defendants ──

    pub fn defendant_marker_regex(mut self, pattern: &str) -> Self {
        self.defendant_marker_re = Some(pattern.to_string());
        self
    }

    pub fn defendant_window(mut self, chars: usize) -> Self {
        self.defendant_window = Some(chars);
        self
    }

    pub fn defendant_section_len(mut self, chars: usize) -> Self {
        self.defendant_section_len = Some(chars);
        self
    }

    pub fn default_nationality(mut self, nationality: &str) -> Self {
        self.default_nationality = Some(nationality.to_string());
        self
    }

    // ── Judges ──

    pub fn judge_section_regex(mut self, pattern: &str) -> Self {
        self.judge_section_re = Some(pattern.to_string());
        self
    }

    pub fn judge_section_end_regex(mut self, pattern: &str) -> Self {
        self.judge_section_end_re = Some(pattern.to_string());
        self
    }

    pub fn judge_name_regex(mut self, pattern: &str) -> Self {
        self.judge_name_re = Some(pattern.to_string());
        self
    }

    pub fn max_panel_members(mut self, n: usize) -> Self {
        self.max_panel_members = Some(n);
        self
    }

    // ── Officials ──

    pub fn set_clerk_patterns(mut self, patterns: Vec<String>) -> Self {
        self.clerk_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_clerk_pattern(mut self, pattern: String) -> Self {
        self.clerk_patterns.push(pattern);
        self
    }

    pub fn set_prosecutor_patterns(mut self, patterns: Vec<String>) -> Self {
        self.prosecutor_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_prosecutor_pattern(mut self, pattern: String) -> Self {
        self.prosecutor_patterns.push(pattern);
        self
    }

    pub fn set_defense_counsel_patterns(mut self, patterns: Vec<String>) -> Self {
        self.defense_counsel_patterns = ListOverrideBuilder::Replace(patterns);
        self
    }

    pub fn add_defense_counsel_pattern(mut self, pattern: String) -> Self {
        self.defense_counsel_patterns.push(pattern);
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };

        let compile_list =
            |builder: ListOverrideBuilder| -> Result<ListOverride<Regex>, regex::Error> {
                match builder {
                    ListOverrideBuilder::Default => Ok(ListOverride::Default),
                    ListOverrideBuilder::Replace(patterns) => {
                        let regexes: Result<Vec<_>, _> =
                            patterns.iter().map(|p| Regex::new(p)).collect();
                        Ok(ListOverride::Replace(regexes?))
                    }
                    ListOverrideBuilder::Extend(patterns) => {
                        let regexes: Result<Vec<_>, _> =
                            patterns.iter().map(|p| Regex::new(p)).collect();
                        Ok(ListOverride::Extend(regexes?))
                    }
                }
            };

        let defaults = ParsingConfig::default();

        Ok(ParsingConfig {
            case_number_patterns: compile_list(self.case_number_patterns)?,
            decision_date_patterns: compile_list(self.decision_date_patterns)?,
            date_window: self.date_window.unwrap_or(defaults.date_window),
            location_patterns: compile_list(self.location_patterns)?,
            location_window: self.location_window.unwrap_or(defaults.location_window),
            defendant_marker_re: compile(self.defendant_marker_re)?,
            defendant_window: self.defendant_window.unwrap_or(defaults.defendant_window),
            defendant_section_len: self
                .defendant_section_len
                .unwrap_or(defaults.defendant_section_len),
            default_nationality: self
                .default_nationality
                .unwrap_or(defaults.default_nationality),
            judge_section_re: compile(self.judge_section_re)?,
            judge_section_end_re: compile(self.judge_section_end_re)?,
            judge_name_re: compile(self.judge_name_re)?,
            max_panel_members: self.max_panel_members.unwrap_or(defaults.max_panel_members),
            clerk_patterns: compile_list(self.clerk_patterns)?,
            prosecutor_patterns: compile_list(self.prosecutor_patterns)?,
            defense_counsel_patterns: compile_list(self.defense_counsel_patterns)?,
        })
    }
}
