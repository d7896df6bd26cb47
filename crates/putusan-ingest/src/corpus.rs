use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer as _};
use serde_json::Value;
use tempfile::NamedTempFile;

use putusan_core::CaseRecord;

use crate::IngestError;

/// The persisted JSON array of case records plus the records added this run.
///
/// Existing entries are kept as raw JSON values and written back unchanged,
/// including key order and any keys this version does not know about. New
/// records always follow them.
#[derive(Debug)]
pub struct Corpus {
    path: PathBuf,
    existing: Vec<Value>,
    added: Vec<CaseRecord>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Entry<'a> {
    Existing(&'a Value),
    Added(&'a CaseRecord),
}

impl Corpus {
    /// Load the corpus at `path`. The file must exist and hold a JSON array.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(IngestError::MissingCorpus(path));
            }
            Err(source) => return Err(IngestError::Io { path, source }),
        };

        let existing = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(entries)) => entries,
            Ok(other) => {
                return Err(IngestError::MalformedCorpus {
                    path,
                    reason: format!("top-level value is {}", json_kind(&other)),
                });
            }
            Err(e) => {
                return Err(IngestError::MalformedCorpus {
                    path,
                    reason: e.to_string(),
                });
            }
        };

        Ok(Self {
            path,
            existing,
            added: Vec::new(),
        })
    }

    /// Create an empty corpus file (`[]`) unless one already exists.
    /// Returns whether a file was created.
    pub fn init(path: &Path) -> Result<bool, IngestError> {
        if path.exists() {
            return Ok(false);
        }
        let corpus = Self {
            path: path.to_path_buf(),
            existing: Vec::new(),
            added: Vec::new(),
        };
        corpus.save()?;
        Ok(true)
    }

    /// Total entries, existing and added.
    pub fn len(&self) -> usize {
        self.existing.len() + self.added.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn existing_len(&self) -> usize {
        self.existing.len()
    }

    pub fn added(&self) -> &[CaseRecord] {
        &self.added
    }

    pub fn push(&mut self, record: CaseRecord) {
        self.added.push(record);
    }

    /// Drop the most recently added record.
    pub fn pop_added(&mut self) -> Option<CaseRecord> {
        self.added.pop()
    }

    /// Rewrite the whole file atomically: the array is written to a
    /// temporary file in the same directory, which then replaces the target.
    pub fn save(&self) -> Result<(), IngestError> {
        let write_err = |source| IngestError::CorpusWrite {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            let entries = self
                .existing
                .iter()
                .map(Entry::Existing)
                .chain(self.added.iter().map(Entry::Added));
            let mut serializer = serde_json::Serializer::pretty(&mut writer);
            serializer.collect_seq(entries)?;
            writer.flush().map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;

        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
