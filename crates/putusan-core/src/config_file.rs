use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub run: Option<RunConfig>,
    pub source: Option<SourceConfig>,
    pub parsing: Option<ParsingWindowsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the per-court subdirectories.
    pub root: Option<String>,
    /// Processed-file ledger, one source identifier per line.
    pub ledger: Option<String>,
    /// JSON corpus that new records are merged into.
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    pub max_documents: Option<usize>,
    pub progress_interval: Option<usize>,
    pub lossy_decode: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub court_dir_prefix: Option<String>,
    pub text_dir: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub strip_prefix: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingWindowsConfig {
    pub date_window: Option<usize>,
    pub location_window: Option<usize>,
    pub defendant_window: Option<usize>,
    pub defendant_section_len: Option<usize>,
    pub default_nationality: Option<String>,
}

/// Platform config directory path: `<config_dir>/putusan/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("putusan").join("config.toml"))
}

/// Load config by cascading CWD `.putusan.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".putusan.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        paths: Some(merge_paths(
            base.paths.unwrap_or_default(),
            overlay.paths.unwrap_or_default(),
        )),
        run: Some(merge_run(
            base.run.unwrap_or_default(),
            overlay.run.unwrap_or_default(),
        )),
        source: Some(merge_source(
            base.source.unwrap_or_default(),
            overlay.source.unwrap_or_default(),
        )),
        parsing: Some(merge_parsing(
            base.parsing.unwrap_or_default(),
            overlay.parsing.unwrap_or_default(),
        )),
    }
}

fn merge_paths(base: PathsConfig, overlay: PathsConfig) -> PathsConfig {
    PathsConfig {
        root: overlay.root.or(base.root),
        ledger: overlay.ledger.or(base.ledger),
        output: overlay.output.or(base.output),
    }
}

fn merge_run(base: RunConfig, overlay: RunConfig) -> RunConfig {
    RunConfig {
        max_documents: overlay.max_documents.or(base.max_documents),
        progress_interval: overlay.progress_interval.or(base.progress_interval),
        lossy_decode: overlay.lossy_decode.or(base.lossy_decode),
    }
}

fn merge_source(base: SourceConfig, overlay: SourceConfig) -> SourceConfig {
    SourceConfig {
        court_dir_prefix: overlay.court_dir_prefix.or(base.court_dir_prefix),
        text_dir: overlay.text_dir.or(base.text_dir),
        extensions: overlay.extensions.or(base.extensions),
        strip_prefix: overlay.strip_prefix.or(base.strip_prefix),
    }
}

fn merge_parsing(base: ParsingWindowsConfig, overlay: ParsingWindowsConfig) -> ParsingWindowsConfig {
    ParsingWindowsConfig {
        date_window: overlay.date_window.or(base.date_window),
        location_window: overlay.location_window.or(base.location_window),
        defendant_window: overlay.defendant_window.or(base.defendant_window),
        defendant_section_len: overlay.defendant_section_len.or(base.defendant_section_len),
        default_nationality: overlay.default_nationality.or(base.default_nationality),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_parses() {
        let toml_str = "[paths]\nledger = \"state/list.txt\"\n\n[run]\nmax_documents = 50\n";
        let parsed: ConfigFile = toml::from_str(toml_str).unwrap();
        let paths = parsed.paths.unwrap();
        assert_eq!(paths.ledger.as_deref(), Some("state/list.txt"));
        assert!(paths.output.is_none());
        assert_eq!(parsed.run.unwrap().max_documents, Some(50));
        assert!(parsed.source.is_none());
    }

    #[test]
    fn merge_overlay_wins() {
        let base = ConfigFile {
            run: Some(RunConfig {
                max_documents: Some(1000),
                progress_interval: Some(100),
                ..Default::default()
            }),
            ..Default::default()
        };
        let overlay = ConfigFile {
            run: Some(RunConfig {
                max_documents: Some(25),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, overlay).run.unwrap();
        assert_eq!(merged.max_documents, Some(25));
        assert_eq!(merged.progress_interval, Some(100));
    }

    #[test]
    fn merge_base_preserved_when_overlay_absent() {
        let base = ConfigFile {
            source: Some(SourceConfig {
                extensions: Some(vec!["txt".into(), "pdf".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let merged = merge(base, ConfigFile::default());
        assert_eq!(
            merged.source.unwrap().extensions.unwrap(),
            vec!["txt".to_string(), "pdf".to_string()]
        );
    }

    #[test]
    fn load_from_path_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert!(load_from_path(&path).is_none());
        assert!(load_from_path(&dir.path().join("missing.toml")).is_none());
    }
}
