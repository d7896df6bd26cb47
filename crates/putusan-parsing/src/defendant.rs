use once_cell::sync::Lazy;
use regex::Regex;

use putusan_core::Defendant;

use crate::address::parse_address;
use crate::config::ParsingConfig;
use crate::patterns::{DEFENDANT_MARKER, prefix_window, window_from};

/// Labelled sub-fields looked up after each `Terdakwa:` marker.
struct SubFieldPatterns {
    name: Regex,
    age_birthdate: Regex,
    birthplace: Regex,
    gender: Regex,
    religion: Regex,
    occupation: Regex,
    residence: Regex,
}

static SUB_FIELDS: Lazy<SubFieldPatterns> = Lazy::new(|| {
    let labelled = |label: &str| Regex::new(&format!(r"(?i){label}\s*:\s*([^\n]+)")).unwrap();
    SubFieldPatterns {
        name: labelled(r"Nama\s+lengkap"),
        age_birthdate: labelled(r"Umur\s*/\s*Tanggal\s+lahir"),
        birthplace: labelled(r"Tempat\s+lahir"),
        gender: labelled(r"Jenis\s+kelamin"),
        religion: labelled(r"Agama"),
        occupation: labelled(r"Pekerjaan"),
        residence: labelled(r"Tempat\s+tinggal"),
    }
});

/// A `<d> <month> <yyyy>` run inside the combined age/birthdate field.
static BIRTHDATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{1,2}\s+\w+\s+\d{4})").unwrap());

/// Extract every defendant block from the document.
///
/// Each `Terdakwa:` marker within the first 3000 characters starts a block;
/// the labelled sub-fields are looked up in the 2000 characters that follow
/// it. The result is never empty: a document without markers yields one
/// default defendant.
pub fn extract_defendants(text: &str) -> Vec<Defendant> {
    extract_defendants_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`extract_defendants`].
pub(crate) fn extract_defendants_with_config(text: &str, config: &ParsingConfig) -> Vec<Defendant> {
    let marker_re = config.defendant_marker_re.as_ref().unwrap_or(&DEFENDANT_MARKER);
    let window = prefix_window(text, config.defendant_window);

    let defendants: Vec<Defendant> = marker_re
        .find_iter(window)
        .map(|m| {
            let section = window_from(text, m.start(), config.defendant_section_len);
            parse_defendant_section(section, &config.default_nationality)
        })
        .collect();

    if defendants.is_empty() {
        vec![Defendant::with_nationality(&config.default_nationality)]
    } else {
        defendants
    }
}

/// Parse the labelled sub-fields of one defendant block.
pub fn parse_defendant_section(section: &str, default_nationality: &str) -> Defendant {
    let fields = &*SUB_FIELDS;
    let mut defendant = Defendant::with_nationality(default_nationality);

    defendant.name = capture(&fields.name, section);

    let age = capture(&fields.age_birthdate, section);
    if let Some(caps) = BIRTHDATE.captures(&age) {
        defendant.birthdate = caps[1].to_string();
    }
    defendant.age = age;

    defendant.birthplace = capture(&fields.birthplace, section);
    defendant.gender = capture(&fields.gender, section);
    defendant.religion = capture(&fields.religion, section);
    defendant.occupation = capture(&fields.occupation, section);

    let residence = capture(&fields.residence, section);
    if !residence.is_empty() {
        defendant.address = parse_address(&residence);
    }

    defendant
}

fn capture(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
