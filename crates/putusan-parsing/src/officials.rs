use putusan_core::Officials;
use regex::Regex;

use crate::config::{ListOverride, ParsingConfig};
use crate::patterns::{CLERK_PATTERNS, DEFENSE_COUNSEL_PATTERNS, PROSECUTOR_PATTERNS, PatternList};

/// Extract the clerk, prosecutor and defense counsel. Each lookup runs over
/// the whole text independently; a miss leaves that field empty.
pub fn extract_officials(text: &str) -> Officials {
    extract_officials_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_officials`].
pub(crate) fn extract_officials_with_config(text: &str, config: &ParsingConfig) -> Officials {
    let lookup = |list: &ListOverride<Regex>, defaults: &[Regex]| {
        PatternList::new(list.resolve(defaults)).first_capture(text)
    };
    Officials {
        clerk: lookup(&config.clerk_patterns, &CLERK_PATTERNS),
        prosecutor: lookup(&config.prosecutor_patterns, &PROSECUTOR_PATTERNS),
        defense_counsel: lookup(&config.defense_counsel_patterns, &DEFENSE_COUNSEL_PATTERNS),
    }
}
