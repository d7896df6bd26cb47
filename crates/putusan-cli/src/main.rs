use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use putusan_core::Provenance;
use putusan_core::config_file::{self, ConfigFile};
use putusan_ingest::{BatchConfig, Corpus, Ledger, ProgressEvent, SourceLayout};
use putusan_parsing::{CaseExtractor, ParsingConfigBuilder};

mod output;

use output::ColorMode;

/// Court decision extractor - Incrementally extract case metadata from Indonesian court decisions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every source document not yet in the ledger and append to the corpus
    Run {
        #[command(flatten)]
        paths: PathArgs,

        /// Maximum documents attempted in this run (0 = no limit)
        #[arg(long)]
        max_documents: Option<usize>,

        /// Replace invalid UTF-8 instead of skipping the document
        #[arg(long)]
        lossy: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Extract one document and print its record as JSON, without touching any state
    Extract {
        /// Path to the decision text (or PDF, when built with the `pdf` feature)
        file_path: PathBuf,

        /// Identifier written to `nama_file` (default: the path as given)
        #[arg(long)]
        name: Option<String>,

        /// Replace invalid UTF-8 instead of failing
        #[arg(long)]
        lossy: bool,
    },

    /// Create an empty corpus and ledger if they do not exist yet
    Init {
        #[command(flatten)]
        paths: PathArgs,
    },

    /// Show corpus, ledger and pending-source counts
    Status {
        #[command(flatten)]
        paths: PathArgs,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
}

#[derive(clap::Args, Debug, Default, Clone)]
struct PathArgs {
    /// Directory holding the per-court subdirectories
    #[arg(long)]
    root: Option<PathBuf>,

    /// Processed-file ledger
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// JSON corpus file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.log_file.as_deref())?;

    let file_config = config_file::load_config();
    let env = |key: &str| std::env::var(key).ok();

    match cli.command {
        Command::Run {
            paths,
            max_documents,
            lossy,
            no_color,
        } => {
            let config = resolve_batch_config(&paths, max_documents, lossy, &file_config, env)?;
            run(&config, &file_config, color_mode(no_color))
        }
        Command::Extract {
            file_path,
            name,
            lossy,
        } => {
            let lossy = lossy || run_section_lossy(&file_config);
            extract(&file_path, name, lossy, &file_config)
        }
        Command::Init { paths } => {
            let config = resolve_batch_config(&paths, None, false, &file_config, env)?;
            init(&config)
        }
        Command::Status { paths, no_color } => {
            let config = resolve_batch_config(&paths, None, false, &file_config, env)?;
            let report = putusan_ingest::status(&config)?;
            let mut stdout = std::io::stdout();
            output::print_status(&mut stdout, &report, color_mode(no_color))?;
            Ok(())
        }
    }
}

fn color_mode(no_color: bool) -> ColorMode {
    ColorMode(!no_color && std::io::stdout().is_terminal())
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,putusan=info"));

    let Some(log_file) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = log_file
        .file_name()
        .with_context(|| format!("--log-file {} has no file name", log_file.display()))?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(Some(guard))
}

/// Resolve run settings: CLI flags > env vars > config file > defaults.
fn resolve_batch_config(
    paths: &PathArgs,
    max_documents: Option<usize>,
    lossy: bool,
    file: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<BatchConfig> {
    let defaults = BatchConfig::default();
    let file_paths = file.paths.clone().unwrap_or_default();
    let file_run = file.run.clone().unwrap_or_default();

    let pick_path = |flag: &Option<PathBuf>, var: &str, from_file: Option<String>, default: PathBuf| {
        flag.clone()
            .or_else(|| env(var).map(PathBuf::from))
            .or_else(|| from_file.map(PathBuf::from))
            .unwrap_or(default)
    };

    let env_max = match env("PUTUSAN_MAX_DOCUMENTS") {
        Some(v) => Some(
            v.trim()
                .parse::<usize>()
                .with_context(|| format!("PUTUSAN_MAX_DOCUMENTS must be a number, got {v:?}"))?,
        ),
        None => None,
    };

    Ok(BatchConfig {
        root: pick_path(&paths.root, "PUTUSAN_ROOT", file_paths.root, defaults.root),
        ledger_path: pick_path(
            &paths.ledger,
            "PUTUSAN_LEDGER",
            file_paths.ledger,
            defaults.ledger_path,
        ),
        output_path: pick_path(
            &paths.output,
            "PUTUSAN_OUTPUT",
            file_paths.output,
            defaults.output_path,
        ),
        layout: resolve_layout(file),
        max_documents: max_documents
            .or(env_max)
            .or(file_run.max_documents)
            .unwrap_or(defaults.max_documents),
        progress_interval: file_run
            .progress_interval
            .unwrap_or(defaults.progress_interval),
        lossy_decode: lossy || file_run.lossy_decode.unwrap_or(defaults.lossy_decode),
    })
}

fn resolve_layout(file: &ConfigFile) -> SourceLayout {
    let defaults = SourceLayout::default();
    let Some(source) = file.source.clone() else {
        return defaults;
    };
    SourceLayout {
        court_dir_prefix: source.court_dir_prefix.unwrap_or(defaults.court_dir_prefix),
        text_dir: source.text_dir.unwrap_or(defaults.text_dir),
        extensions: source.extensions.unwrap_or(defaults.extensions),
        strip_prefix: source.strip_prefix.or(defaults.strip_prefix),
    }
}

fn run_section_lossy(file: &ConfigFile) -> bool {
    file.run
        .as_ref()
        .and_then(|r| r.lossy_decode)
        .unwrap_or(false)
}

fn build_extractor(file: &ConfigFile) -> anyhow::Result<CaseExtractor> {
    let parsing = file.parsing.clone().unwrap_or_default();
    let config = ParsingConfigBuilder::from_file_config(&parsing)
        .build()
        .context("invalid parsing configuration")?;
    Ok(CaseExtractor::with_config(config))
}

fn run(config: &BatchConfig, file: &ConfigFile, color: ColorMode) -> anyhow::Result<()> {
    let extractor = build_extractor(file)?;

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("=> "),
    );

    let summary = putusan_ingest::run(config, &extractor, |event| match event {
        ProgressEvent::Started { planned, .. } => {
            bar.set_length(planned as u64);
        }
        ProgressEvent::Processing { name, .. } => {
            bar.set_message(name);
            bar.inc(1);
        }
        ProgressEvent::Failed { name, error } => {
            bar.println(format!("skipped {name}: {error}"));
        }
        ProgressEvent::Checkpoint { .. } => {}
        ProgressEvent::CapReached { remaining, .. } => {
            bar.println(format!(
                "Per-run limit reached; {remaining} documents left for the next run"
            ));
        }
    });
    bar.finish_and_clear();
    let summary = summary?;

    let mut stdout = std::io::stdout();
    output::print_summary(&mut stdout, &summary, color)?;
    Ok(())
}

fn extract(path: &Path, name: Option<String>, lossy: bool, file: &ConfigFile) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    let extractor = build_extractor(file)?;
    let text = putusan_ingest::read_document(path, lossy)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let name = name.unwrap_or_else(|| {
        let strip_prefix = resolve_layout(file).strip_prefix;
        putusan_ingest::normalize_source_name(Path::new("."), path, strip_prefix.as_deref())
    });
    let record = extractor.extract(&text, &Provenance::new(name));

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &record)?;
    writeln!(stdout)?;
    Ok(())
}

fn init(config: &BatchConfig) -> anyhow::Result<()> {
    let color = color_mode(false);
    let mut stdout = std::io::stdout();

    let created = Corpus::init(&config.output_path)?;
    output::print_init_result(&mut stdout, "corpus", &config.output_path, created, color)?;

    let created = Ledger::init(&config.ledger_path)?;
    output::print_init_result(&mut stdout, "ledger", &config.ledger_path, created, color)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use putusan_core::config_file::{PathsConfig, RunConfig, SourceConfig};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config =
            resolve_batch_config(&PathArgs::default(), None, false, &ConfigFile::default(), no_env)
                .unwrap();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.ledger_path, PathBuf::from("list.txt"));
        assert_eq!(config.output_path, PathBuf::from("extract.json"));
        assert_eq!(config.max_documents, 1000);
        assert_eq!(config.progress_interval, 100);
        assert!(!config.lossy_decode);
        assert_eq!(config.layout.court_dir_prefix, "pn-");
    }

    #[test]
    fn flags_beat_env_beat_file() {
        let file = ConfigFile {
            paths: Some(PathsConfig {
                root: Some("/from/file".into()),
                ledger: Some("file-list.txt".into()),
                output: Some("file.json".into()),
            }),
            run: Some(RunConfig {
                max_documents: Some(10),
                progress_interval: Some(5),
                lossy_decode: Some(true),
            }),
            ..Default::default()
        };
        let env = |key: &str| match key {
            "PUTUSAN_ROOT" => Some("/from/env".to_string()),
            "PUTUSAN_MAX_DOCUMENTS" => Some("20".to_string()),
            _ => None,
        };
        let flags = PathArgs {
            root: None,
            ledger: Some("flag-list.txt".into()),
            output: None,
        };

        let config = resolve_batch_config(&flags, None, false, &file, env).unwrap();
        assert_eq!(config.root, PathBuf::from("/from/env"));
        assert_eq!(config.ledger_path, PathBuf::from("flag-list.txt"));
        assert_eq!(config.output_path, PathBuf::from("file.json"));
        assert_eq!(config.max_documents, 20);
        assert_eq!(config.progress_interval, 5);
        assert!(config.lossy_decode);

        let config = resolve_batch_config(&flags, Some(3), false, &file, env).unwrap();
        assert_eq!(config.max_documents, 3);
    }

    #[test]
    fn invalid_env_number_is_an_error() {
        let env = |key: &str| (key == "PUTUSAN_MAX_DOCUMENTS").then(|| "banyak".to_string());
        let result =
            resolve_batch_config(&PathArgs::default(), None, false, &ConfigFile::default(), env);
        assert!(result.is_err());
    }

    #[test]
    fn layout_from_file() {
        let file = ConfigFile {
            source: Some(SourceConfig {
                text_dir: Some("teks".into()),
                extensions: Some(vec!["txt".into(), "pdf".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let layout = resolve_layout(&file);
        assert_eq!(layout.court_dir_prefix, "pn-");
        assert_eq!(layout.text_dir, "teks");
        assert_eq!(layout.extensions.len(), 2);
        assert_eq!(layout.strip_prefix.as_deref(), Some("/home/runner/work/data/"));
    }

    #[test]
    fn cli_parses_run_flags() {
        let cli = Cli::parse_from([
            "putusan",
            "run",
            "--root",
            "data",
            "--max-documents",
            "50",
            "--lossy",
            "--log-file",
            "run.log",
        ]);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        match cli.command {
            Command::Run {
                paths,
                max_documents,
                lossy,
                no_color,
            } => {
                assert_eq!(paths.root, Some(PathBuf::from("data")));
                assert_eq!(max_documents, Some(50));
                assert!(lossy);
                assert!(!no_color);
            }
            other => panic!("expected run, got {other:?}"),
        }
    }
}
