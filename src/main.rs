//! cdoc — generate documentation from comments in C source files.
//!
//! Associates the comment block directly above each typedef, function
//! prototype and macro with its declaration and renders one document per
//! file. Supports two modes:
//!
//! - **stdin mode**: `cdoc < list.h`
//! - **file mode**: `cdoc -o docs include/`

mod discover;
mod error;
mod model;
mod parser;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "cdoc",
    about = "Generate documentation from comments in C headers"
)]
struct Cli {
    /// Input files, directories (walked recursively) or glob patterns.
    /// If omitted, reads C source from stdin.
    paths: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long, default_value = "docs")]
    output: PathBuf,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// File extensions collected when walking directories (repeatable)
    #[arg(short = 'e', long = "ext", default_value = "h")]
    extensions: Vec<String>,

    /// Prefix template file. Supports ${name} substitution.
    /// Defaults to _prefix.md in the output directory, if present.
    #[arg(short = 'p', long)]
    prefix: Option<PathBuf>,

    /// Document title in stdin mode
    #[arg(short = 't', long, default_value = "stdin")]
    title: String,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,

    /// Log per-category match counts
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let renderer = render::create_renderer(&cli.format)?;
    let mut extractor = parser::Extractor::new().context("failed to set up the C parser")?;

    if cli.paths.is_empty() {
        return stdin_mode(&cli, &mut extractor, renderer.as_ref());
    }

    file_mode(&cli, &mut extractor, renderer.as_ref())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CDOC_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// stdin mode: read C source from stdin, write one document to stdout.
fn stdin_mode(
    cli: &Cli,
    extractor: &mut parser::Extractor,
    renderer: &dyn render::Renderer,
) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let doc = extractor.extract(Path::new("<stdin>"), &cli.title, &input)?;
    print!("{}", renderer.render(&doc)?);
    Ok(())
}

/// file mode: one document per discovered file, written to the output directory.
fn file_mode(
    cli: &Cli,
    extractor: &mut parser::Extractor,
    renderer: &dyn render::Renderer,
) -> Result<()> {
    let output_dir = cli.output.as_path();
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let prefix_template = resolve_prefix(cli.prefix.as_deref(), output_dir)?;
    let input_files = discover::discover(&cli.paths, &cli.extensions)?;

    let ext = renderer.file_extension();
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

    for path in &input_files {
        info!("processing {}", path.display());

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let display_name = display_name(path);
        let doc = match extractor.extract(path, &display_name, &content) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let name = derive_output_name(&display_name);
        let out_path = output_dir.join(format!("{}.{}", name, ext));
        if let Some(previous) = written.insert(out_path.clone(), path.clone()) {
            warn!(
                "{} overwrites output of {} ({})",
                path.display(),
                previous.display(),
                out_path.display()
            );
        }

        let mut output = String::new();

        // Prefix with ${name} substitution
        if let Some(ref tpl) = prefix_template {
            output.push_str(&tpl.replace("${name}", &name));
            output.push('\n');
        }

        output.push_str(&renderer.render(&doc)?);

        fs::write(&out_path, &output)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
    }

    Ok(())
}

/// Resolve the prefix template from the -p flag, falling back to
/// `_prefix.md` in the output directory.
fn resolve_prefix(prefix_arg: Option<&Path>, output_dir: &Path) -> Result<Option<String>> {
    match prefix_arg {
        Some(path) => {
            let template = fs::read_to_string(path)
                .with_context(|| format!("failed to read prefix file: {}", path.display()))?;
            Ok(Some(template))
        }
        None => {
            let candidate = output_dir.join("_prefix.md");
            if candidate.is_file() {
                Ok(Some(fs::read_to_string(&candidate).with_context(|| {
                    format!("failed to read prefix file: {}", candidate.display())
                })?))
            } else {
                Ok(None)
            }
        }
    }
}

/// Base name of the source file, used as the document title.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// Strip the last extension from a file name.
/// "list.h" → "list", "vec.inl.h" → "vec.inl"
fn derive_output_name(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_from_header() {
        assert_eq!(derive_output_name("list.h"), "list");
        assert_eq!(derive_output_name("vec.inl.h"), "vec.inl");
    }

    #[test]
    fn output_name_no_extension() {
        assert_eq!(derive_output_name("Makefile"), "Makefile");
        assert_eq!(derive_output_name(".hidden"), ".hidden");
    }

    #[test]
    fn display_name_is_base_name() {
        assert_eq!(display_name(Path::new("include/sub/list.h")), "list.h");
        assert_eq!(display_name(Path::new("list.h")), "list.h");
    }

    #[test]
    fn prefix_defaults_to_output_dir_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(resolve_prefix(None, dir.path()).unwrap(), None);
        fs::write(dir.path().join("_prefix.md"), "---\ntitle: ${name}\n---\n").unwrap();
        assert_eq!(
            resolve_prefix(None, dir.path()).unwrap().as_deref(),
            Some("---\ntitle: ${name}\n---\n")
        );
    }

    #[test]
    fn missing_prefix_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.md");
        assert!(resolve_prefix(Some(&missing), dir.path()).is_err());
    }
}
