use std::path::{Path, PathBuf};

use crate::IngestError;

/// Where source documents live under the corpus root:
/// `<root>/<court_dir_prefix>*/<text_dir>/*.<ext>`.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    pub court_dir_prefix: String,
    pub text_dir: String,
    /// Accepted extensions, compared case-insensitively, without the dot.
    pub extensions: Vec<String>,
    /// Absolute prefix removed from identifiers that fall outside the root.
    pub strip_prefix: Option<String>,
}

impl Default for SourceLayout {
    fn default() -> Self {
        Self {
            court_dir_prefix: "pn-".to_string(),
            text_dir: "txt".to_string(),
            extensions: vec!["txt".to_string()],
            strip_prefix: Some("/home/runner/work/data/".to_string()),
        }
    }
}

impl SourceLayout {
    fn accepts(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// One discovered source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Normalized identifier, as written to the ledger and `nama_file`.
    pub name: String,
    /// Name of the court directory the document was found in.
    pub court: String,
}

/// Walk `root` for source documents, sorted by identifier.
///
/// Court directories without a text subdirectory are skipped; anything
/// under `.ipynb_checkpoints` is ignored. Files whose identifier contains a
/// line break are skipped with a warning, as the ledger cannot hold them.
pub fn discover_sources(root: &Path, layout: &SourceLayout) -> Result<Vec<SourceDocument>, IngestError> {
    if !root.is_dir() {
        return Err(IngestError::MissingRoot(root.to_path_buf()));
    }

    let mut documents = Vec::new();
    for court_dir in read_dir_sorted(root)? {
        let Some(court) = court_dir.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !court.starts_with(&layout.court_dir_prefix) || !court_dir.is_dir() {
            continue;
        }

        let text_dir = court_dir.join(&layout.text_dir);
        if !text_dir.is_dir() {
            tracing::debug!(court, "no text directory, skipping");
            continue;
        }

        for path in read_dir_sorted(&text_dir)? {
            if !path.is_file() || !layout.accepts(&path) || is_checkpoint(&path) {
                continue;
            }
            let name = normalize_source_name(root, &path, layout.strip_prefix.as_deref());
            if name.contains(['\n', '\r']) {
                tracing::warn!(source = ?name, "identifier contains a line break, skipping");
                continue;
            }
            documents.push(SourceDocument {
                name,
                court: court.to_string(),
                path,
            });
        }
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(documents)
}

/// Identifier for a source path: relative to `root` when possible, with a
/// configured absolute prefix removed otherwise, always with `/` separators.
pub fn normalize_source_name(root: &Path, path: &Path, strip_prefix: Option<&str>) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .filter(|c| *c != ".")
        .collect::<Vec<_>>()
        .join("/");

    if relative.has_root() {
        name = format!("/{}", name.trim_start_matches('/'));
    }
    if let Some(prefix) = strip_prefix.filter(|p| !p.is_empty()) {
        if let Some(stripped) = name.strip_prefix(prefix) {
            name = stripped.to_string();
        }
    }
    name
}

fn is_checkpoint(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str() == ".ipynb_checkpoints")
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, IngestError> {
    let io_err = |source| IngestError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        paths.push(entry.map_err(io_err)?.path());
    }
    paths.sort();
    Ok(paths)
}
