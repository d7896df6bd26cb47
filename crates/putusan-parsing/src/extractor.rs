use std::path::Path;

use putusan_core::{BackendError, CaseRecord, Defendant, DocumentBackend, JudgePanel, Officials, Provenance};

use crate::config::ParsingConfig;
use crate::{case_number, decision_date, defendant, judges, location, officials};

/// A configurable court-decision extraction pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each field extractor as a method.
/// The default constructor uses built-in defaults; use
/// [`CaseExtractor::with_config`] to supply custom patterns and windows.
pub struct CaseExtractor {
    config: ParsingConfig,
}

impl Default for CaseExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CaseExtractor {
    /// Create an extractor with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
        }
    }

    /// Create an extractor with a custom configuration.
    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the current config.
    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    pub fn case_number(&self, text: &str) -> String {
        case_number::extract_case_number_with_config(text, &self.config)
    }

    pub fn decision_date(&self, text: &str) -> String {
        decision_date::extract_decision_date_with_config(text, &self.config)
    }

    pub fn court_location(&self, text: &str) -> String {
        location::extract_court_location_with_config(text, &self.config)
    }

    pub fn defendants(&self, text: &str) -> Vec<Defendant> {
        defendant::extract_defendants_with_config(text, &self.config)
    }

    pub fn judges(&self, text: &str) -> Vec<JudgePanel> {
        judges::extract_judges_with_config(text, &self.config)
    }

    pub fn officials(&self, text: &str) -> Officials {
        officials::extract_officials_with_config(text, &self.config)
    }

    /// Assemble a full [`CaseRecord`] from already-extracted text.
    ///
    /// Never fails: every field that no pattern recognizes keeps its default.
    pub fn extract(&self, text: &str, provenance: &Provenance) -> CaseRecord {
        let record = CaseRecord {
            case_number: self.case_number(text),
            decision_date: self.decision_date(text),
            court_location: self.court_location(text),
            defendants: self.defendants(text),
            judges: self.judges(text),
            officials: self.officials(text),
            source_name: provenance.name.clone(),
            source_url: provenance.url.clone().unwrap_or_default(),
        };

        let missing = missing_fields(&record);
        if !missing.is_empty() {
            tracing::debug!(source = %provenance.name, missing = ?missing, "fields not recognized");
        }

        record
    }

    /// Read a document through `backend` and assemble its record.
    pub fn extract_from_path(
        &self,
        path: &Path,
        backend: &dyn DocumentBackend,
        provenance: &Provenance,
    ) -> Result<CaseRecord, BackendError> {
        let text = backend.extract_text(path)?;
        Ok(self.extract(&text, provenance))
    }
}

/// Top-level fields left at their default, by JSON key.
fn missing_fields(record: &CaseRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if record.case_number.is_empty() {
        missing.push("nomor_perkara");
    }
    if record.decision_date.is_empty() {
        missing.push("tanggal_putusan");
    }
    if record.court_location.is_empty() {
        missing.push("lokasi");
    }
    if record.defendants.iter().all(|d| d.name.is_empty()) {
        missing.push("terdakwa");
    }
    if record.judges.iter().all(|p| p.presiding.is_empty()) {
        missing.push("hakim");
    }
    if record.officials.clerk.is_empty() {
        missing.push("panitera");
    }
    if record.officials.prosecutor.is_empty() {
        missing.push("penuntut_umum");
    }
    if record.officials.defense_counsel.is_empty() {
        missing.push("penasehat_hukum");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParsingConfigBuilder;

    const DECISION: &str = "\
PUTUSAN
Nomor 123/Pid.Sus/2023/PN Jkt.Pst
DEMI KEADILAN BERDASARKAN KETUHANAN YANG MAHA ESA
Pengadilan Negeri Jakarta Pusat yang mengadili perkara pidana
Terdakwa:
Nama lengkap : Budi Santoso
Tempat lahir : Jakarta
Umur/Tanggal lahir : 30 tahun / 1 Januari 1993
Jenis kelamin : Laki-laki
Tempat tinggal : Jl. Mawar No. 1, Kel. Gambir, Kec. Gambir, Kota Jakarta Pusat
Agama : Islam
Pekerjaan : Karyawan swasta
Penuntut Umum : Sri Wahyuni, S.H.
Penasehat Hukum : Agus Salim, S.H.
Demikian diputuskan pada tanggal 5 Januari 2023 oleh Majelis Hakim
Ahmad Yani, S.H., M.H.
Dewi Lestari, S.H.
Bambang Sutrisno, S.H.
Panitera : Rudi Hartono
";

    #[test]
    fn test_full_record() {
        let ext = CaseExtractor::new();
        let provenance = Provenance::new("pn-jakarta-pusat/txt/putusan_1.txt");
        let record = ext.extract(DECISION, &provenance);

        assert_eq!(record.case_number, "123/Pid.Sus/2023/PN Jkt.Pst");
        assert_eq!(record.decision_date, "5 Januari 2023");
        assert_eq!(record.court_location, "PN Jakarta Pusat");

        assert_eq!(record.defendants.len(), 1);
        let d = &record.defendants[0];
        assert_eq!(d.name, "Budi Santoso");
        assert_eq!(d.birthplace, "Jakarta");
        assert_eq!(d.birthdate, "1 Januari 1993");
        assert_eq!(d.address.city, "Jakarta Pusat");

        assert_eq!(record.judges[0].presiding, "Ahmad Yani, S.H., M.H.");
        assert_eq!(record.judges[0].members.len(), 2);

        assert_eq!(record.officials.clerk, "Rudi Hartono");
        assert_eq!(record.officials.prosecutor, "Sri Wahyuni, S.H.");
        assert_eq!(record.officials.defense_counsel, "Agus Salim, S.H.");
        assert_eq!(record.source_name, "pn-jakarta-pusat/txt/putusan_1.txt");
        assert_eq!(record.source_url, "");
    }

    #[test]
    fn test_unrecognized_text_gives_default_record() {
        let ext = CaseExtractor::new();
        let record = ext.extract("lorem ipsum dolor sit amet", &Provenance::new("a.txt"));
        let expected = CaseRecord {
            source_name: "a.txt".into(),
            ..CaseRecord::default()
        };
        assert_eq!(record, expected);
        assert_eq!(missing_fields(&record).len(), 8);
    }

    #[test]
    fn test_provenance_url_attached() {
        let ext = CaseExtractor::new();
        let provenance = Provenance::new("a.txt").with_url("https://putusan.example/a");
        let record = ext.extract("", &provenance);
        assert_eq!(record.source_url, "https://putusan.example/a");
    }

    #[test]
    fn test_custom_config_applies() {
        let config = ParsingConfigBuilder::new()
            .set_case_number_patterns(vec![r"(?i)Register\s+(\S+)".into()])
            .build()
            .unwrap();
        let ext = CaseExtractor::with_config(config);
        assert_eq!(ext.case_number("Register 77/Pid.B/2020\nNomor 1/X"), "77/Pid.B/2020");
        assert_eq!(ext.case_number(DECISION), "");
    }

    #[test]
    fn test_custom_officials_config_applies() {
        let config = ParsingConfigBuilder::new()
            .set_prosecutor_patterns(vec![r"(?i)Jaksa\s+Penuntut\s*:\s*([^\n]+)".into()])
            .build()
            .unwrap();
        let ext = CaseExtractor::with_config(config);
        let record = ext.extract(DECISION, &Provenance::new("a.txt"));
        assert_eq!(record.officials.prosecutor, "");
        assert_eq!(record.officials.clerk, "Rudi Hartono");
        assert_eq!(
            ext.officials("Jaksa Penuntut : Sri Wahyuni\n").prosecutor,
            "Sri Wahyuni"
        );
    }

    struct FixedText(&'static str);

    impl DocumentBackend for FixedText {
        fn extract_text(&self, _path: &Path) -> Result<String, BackendError> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl DocumentBackend for Failing {
        fn extract_text(&self, path: &Path) -> Result<String, BackendError> {
            Err(BackendError::OpenError(path.display().to_string()))
        }
    }

    #[test]
    fn test_extract_from_path_uses_backend() {
        let ext = CaseExtractor::new();
        let provenance = Provenance::new("x.txt");
        let record = ext
            .extract_from_path(Path::new("x.txt"), &FixedText(DECISION), &provenance)
            .unwrap();
        assert_eq!(record.case_number, "123/Pid.Sus/2023/PN Jkt.Pst");

        let err = ext.extract_from_path(Path::new("x.txt"), &Failing, &provenance);
        assert!(matches!(err, Err(BackendError::OpenError(_))));
    }
}
