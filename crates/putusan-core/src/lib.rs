use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod backend;
pub mod config_file;

pub use backend::DocumentBackend;

/// Nationality assumed for a defendant when the document does not say otherwise.
pub const DEFAULT_NATIONALITY: &str = "Indonesia";

/// One fully-assembled extraction result for a single court decision.
///
/// The serialized shape is fixed: every key is always present, unresolved
/// strings are `""`, and `terdakwa`/`hakim` always hold at least one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseRecord {
    #[serde(rename = "nomor_perkara")]
    pub case_number: String,
    #[serde(rename = "tanggal_putusan")]
    pub decision_date: String,
    #[serde(rename = "lokasi")]
    pub court_location: String,
    #[serde(rename = "terdakwa")]
    pub defendants: Vec<Defendant>,
    #[serde(rename = "hakim")]
    pub judges: Vec<JudgePanel>,
    #[serde(flatten)]
    pub officials: Officials,
    #[serde(rename = "nama_file")]
    pub source_name: String,
    #[serde(rename = "url")]
    pub source_url: String,
}

impl Default for CaseRecord {
    fn default() -> Self {
        Self {
            case_number: String::new(),
            decision_date: String::new(),
            court_location: String::new(),
            defendants: vec![Defendant::default()],
            judges: vec![JudgePanel::default()],
            officials: Officials::default(),
            source_name: String::new(),
            source_url: String::new(),
        }
    }
}

/// A defendant named in the decision.
///
/// The four verdict fields (`tuntutan_pidana`, `tuntutan_hukuman`,
/// `putusan_pidana`, `putusan_hukuman`) are part of the schema but no
/// extractor fills them yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defendant {
    #[serde(rename = "nama")]
    pub name: String,
    /// Raw "Umur/Tanggal lahir" text, which often carries both age and birthdate.
    #[serde(rename = "umur")]
    pub age: String,
    #[serde(rename = "tempat_lahir")]
    pub birthplace: String,
    #[serde(rename = "tanggal_lahir")]
    pub birthdate: String,
    #[serde(rename = "jenis_kelamin")]
    pub gender: String,
    #[serde(rename = "kebangsaan")]
    pub nationality: String,
    #[serde(rename = "agama")]
    pub religion: String,
    #[serde(rename = "pekerjaan")]
    pub occupation: String,
    #[serde(rename = "alamat")]
    pub address: Address,
    #[serde(rename = "tuntutan_pidana")]
    pub charged_offenses: Vec<String>,
    #[serde(rename = "tuntutan_hukuman")]
    pub charged_sentence: Sentence,
    #[serde(rename = "putusan_pidana")]
    pub convicted_offense: String,
    #[serde(rename = "putusan_hukuman")]
    pub imposed_sentence: Sentence,
}

impl Default for Defendant {
    fn default() -> Self {
        Self::with_nationality(DEFAULT_NATIONALITY)
    }
}

impl Defendant {
    /// An otherwise empty defendant with the given default nationality.
    pub fn with_nationality(nationality: &str) -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            birthplace: String::new(),
            birthdate: String::new(),
            gender: String::new(),
            nationality: nationality.to_string(),
            religion: String::new(),
            occupation: String::new(),
            address: Address::default(),
            charged_offenses: Vec::new(),
            charged_sentence: Sentence::default(),
            convicted_offense: String::new(),
            imposed_sentence: Sentence::default(),
        }
    }
}

/// Structured residence of a defendant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(rename = "kelurahan")]
    pub sub_district: String,
    #[serde(rename = "kecamatan")]
    pub district: String,
    #[serde(rename = "kabupaten")]
    pub regency: String,
    #[serde(rename = "kota")]
    pub city: String,
    #[serde(rename = "alamat_lengkap")]
    pub full: String,
}

/// A sentence as demanded by the prosecutor or imposed by the court.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sentence {
    #[serde(rename = "jenis")]
    pub kind: String,
    #[serde(rename = "lama")]
    pub duration: String,
}

/// The panel of judges that decided the case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgePanel {
    #[serde(rename = "ketua")]
    pub presiding: String,
    #[serde(rename = "anggota")]
    pub members: Vec<Judge>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Judge {
    #[serde(rename = "nama")]
    pub name: String,
}

impl Judge {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Court officials, serialized flat into the case record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Officials {
    #[serde(rename = "panitera")]
    pub clerk: String,
    #[serde(rename = "penuntut_umum")]
    pub prosecutor: String,
    #[serde(rename = "penasehat_hukum")]
    pub defense_counsel: String,
}

/// Where a record came from. Filled in by the batch layer, never by extractors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    /// Source identifier, relative to the corpus root.
    pub name: String,
    pub url: Option<String>,
}

impl Provenance {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("document is not valid UTF-8: {0}")]
    InvalidEncoding(String),
    #[error("unsupported document type: {0}")]
    Unsupported(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_serializes_every_key() {
        let value = serde_json::to_value(CaseRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        for key in [
            "nomor_perkara",
            "tanggal_putusan",
            "lokasi",
            "terdakwa",
            "hakim",
            "panitera",
            "penuntut_umum",
            "penasehat_hukum",
            "nama_file",
            "url",
        ] {
            assert!(keys.contains(&key), "missing key {key}");
        }
        assert_eq!(obj.len(), 10);

        let defendant = &value["terdakwa"][0];
        assert_eq!(defendant["kebangsaan"], "Indonesia");
        assert_eq!(defendant["alamat"]["alamat_lengkap"], "");
        assert_eq!(defendant["tuntutan_pidana"], serde_json::json!([]));
        assert_eq!(defendant["putusan_hukuman"]["lama"], "");

        let panel = &value["hakim"][0];
        assert_eq!(panel["ketua"], "");
        assert_eq!(panel["anggota"], serde_json::json!([]));
    }

    #[test]
    fn empty_defendant_object_deserializes_with_defaults() {
        let json = r#"{"nomor_perkara": "1/Pid.B/2020/PN Mdn", "terdakwa": [{}]}"#;
        let record: CaseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.case_number, "1/Pid.B/2020/PN Mdn");
        assert_eq!(record.defendants.len(), 1);
        assert_eq!(record.defendants[0].nationality, DEFAULT_NATIONALITY);
        assert_eq!(record.judges, vec![JudgePanel::default()]);
    }

    #[test]
    fn officials_are_flattened() {
        let record = CaseRecord {
            officials: Officials {
                clerk: "Siti Aminah".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["panitera"], "Siti Aminah");
        assert!(value.get("officials").is_none());
    }
}
