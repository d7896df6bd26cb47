//! Best-effort decomposition of an Indonesian residence line.
//!
//! Only labelled parts are recognized (`Kel.`/`Kelurahan`/`Desa`,
//! `Kec.`/`Kecamatan`, `Kab.`/`Kabupaten`, `Kota`). Unlabelled parts stay
//! empty; `alamat_lengkap` always carries the raw line.

use once_cell::sync::Lazy;
use regex::Regex;

use putusan_core::Address;

use crate::patterns::PatternList;

static SUB_DISTRICT: Lazy<PatternList> = Lazy::new(|| {
    PatternList::compile(&[r"(?i)\b(?:Kelurahan|Kel\.)\s*([^,\n]+)", r"(?i)\bDesa\s+([^,\n]+)"])
        .unwrap()
});

static DISTRICT: Lazy<PatternList> =
    Lazy::new(|| PatternList::compile(&[r"(?i)\b(?:Kecamatan|Kec\.)\s*([^,\n]+)"]).unwrap());

static REGENCY: Lazy<PatternList> =
    Lazy::new(|| PatternList::compile(&[r"(?i)\b(?:Kabupaten|Kab\.)\s*([^,\n]+)"]).unwrap());

static CITY: Lazy<PatternList> =
    Lazy::new(|| PatternList::compile(&[r"(?i)\bKota\s+([^,\n]+)"]).unwrap());

/// Start of the next labelled part when parts are not comma-separated.
static NEXT_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s+(?:Kelurahan|Kecamatan|Kabupaten|Provinsi|Kota|Desa|Kel\.|Kec\.|Kab\.|Prov\.)")
        .unwrap()
});

/// Split a residence line into its administrative parts.
pub fn parse_address(line: &str) -> Address {
    let line = line.trim();
    Address {
        sub_district: labelled_part(&SUB_DISTRICT, line),
        district: labelled_part(&DISTRICT, line),
        regency: labelled_part(&REGENCY, line),
        city: labelled_part(&CITY, line),
        full: line.to_string(),
    }
}

fn labelled_part(patterns: &PatternList, line: &str) -> String {
    let Some(raw) = patterns.find_capture(line) else {
        return String::new();
    };
    let raw = match NEXT_LABEL.find(raw) {
        Some(m) => &raw[..m.start()],
        None => raw,
    };
    raw.trim().trim_end_matches(['.', ';']).trim().to_string()
}
