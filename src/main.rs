//! relation-fixer — add inherited, mixed and implemented members to a JSDoc
//! doclet dump.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `jsdoc -X src | relation-fixer > doclets.json`
//! - **file mode**: `relation-fixer -o doclets.json dump/*.json`

use anyhow::{Context, Result};
use clap::Parser;
use relation_fixer::{output, Doclet, Stage};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "relation-fixer",
    version,
    about = "Synthesize inherited, mixed and implemented members in JSDoc doclet dumps"
)]
struct Cli {
    /// Input JSON files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output file. Writes to stdout when omitted.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), pretty, lines
    #[arg(short = 'f', long, default_value = "json")]
    format: String,

    /// Last pass to run: relations, all
    #[arg(long, default_value = "all")]
    stage: String,

    /// Leave doclets marked `ignore: true` out of the output
    #[arg(long)]
    drop_ignored: bool,

    /// Log every per-entity decision
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let stage = Stage::parse(&cli.stage)
        .with_context(|| format!("unknown stage: {}. Use relations or all", cli.stage))?;
    let writer = output::create_writer(&cli.format)?;

    let doclets = if cli.files.is_empty() {
        read_stdin()?
    } else {
        read_files(&expand_globs(&cli.files)?)?
    };

    let mut fixed = relation_fixer::run(&doclets, stage)?;
    if cli.drop_ignored {
        fixed.retain(|d| !d.is_ignored());
    }

    let rendered = writer.write(&fixed)?;
    match cli.output {
        Some(ref path) => fs::write(path, rendered)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Logs go to stderr so stdout stays valid JSON. `RUST_LOG` wins over flags.
fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn read_stdin() -> Result<Vec<Doclet>> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    parse_doclets(&input).context("failed to parse doclets from stdin")
}

/// Concatenate the doclet arrays of every file, in path order.
fn read_files(paths: &[PathBuf]) -> Result<Vec<Doclet>> {
    let mut doclets = Vec::new();
    for path in paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let parsed = parse_doclets(&content)
            .with_context(|| format!("failed to parse doclets from {}", path.display()))?;
        debug!(file = %path.display(), doclets = parsed.len(), "read doclets");
        doclets.extend(parsed);
    }
    Ok(doclets)
}

fn parse_doclets(content: &str) -> Result<Vec<Doclet>> {
    Ok(serde_json::from_str(content)?)
}

/// File extensions recognized as doclet dumps.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for JSON files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_is_scanned_for_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.json"), "[]").unwrap();
        fs::write(dir.path().join("a.json"), "[]").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = expand_globs(&[dir.path().to_string_lossy().to_string()]).unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.json", "b.json"]);
    }

    #[test]
    fn same_file_twice_is_read_once() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("dump.json");
        fs::write(&file, "[]").unwrap();
        let pattern = file.to_string_lossy().to_string();

        let files = expand_globs(&[pattern.clone(), pattern]).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn files_are_concatenated() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        fs::write(&a, r#"[{"longname":"A","kind":"class"}]"#).unwrap();
        fs::write(&b, r#"[{"longname":"B","kind":"class","augments":["A"]}]"#).unwrap();

        let doclets = read_files(&[a, b]).unwrap();
        assert_eq!(doclets.len(), 2);
        assert_eq!(doclets[1].augments.as_deref().unwrap(), ["A"]);
    }

    #[test]
    fn non_array_input_is_rejected() {
        assert!(parse_doclets(r#"{"longname":"A"}"#).is_err());
    }
}
