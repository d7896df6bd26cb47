use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{Error, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::IngestError;

/// Append-only record of processed source identifiers, one per line.
///
/// Every [`record`](Ledger::record) opens the file in append mode, writes
/// one line and flushes before it returns, so the file on disk never lags
/// the in-memory set. Entries are never removed.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    entries: HashSet<String>,
    /// The existing file does not end with a newline.
    needs_newline: bool,
}

impl Ledger {
    /// Load the ledger at `path`. A missing file is an empty ledger; the
    /// file is created on the first [`record`](Ledger::record).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, IngestError> {
        let path = path.into();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(source) => return Err(IngestError::Ledger { path, source }),
        };

        let entries = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            needs_newline: !content.is_empty() && !content.ends_with('\n'),
            path,
            entries,
        })
    }

    /// Create an empty ledger file unless one already exists.
    /// Returns whether a file was created.
    pub fn init(path: &Path) -> Result<bool, IngestError> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
            Err(source) => Err(IngestError::Ledger {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `name` and flush. Recording an identifier already present is
    /// a no-op. Identifiers containing a line break are rejected, since they
    /// could not be read back as a single entry.
    pub fn record(&mut self, name: &str) -> Result<(), IngestError> {
        if self.contains(name) {
            return Ok(());
        }
        let written = if name.contains(['\n', '\r']) {
            Err(Error::new(
                ErrorKind::InvalidInput,
                format!("identifier {name:?} contains a line break"),
            ))
        } else {
            self.append_line(name)
        };
        written.map_err(|source| IngestError::Ledger {
            path: self.path.clone(),
            source,
        })?;
        self.entries.insert(name.to_string());
        Ok(())
    }

    fn append_line(&mut self, name: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if self.needs_newline {
            file.write_all(b"\n")?;
            self.needs_newline = false;
        }
        writeln!(file, "{name}")?;
        file.flush()
    }
}
