//! Input discovery: files, recursive directory walks and glob patterns.

use crate::error::{Error, Result};
use ignore::WalkBuilder;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Expand the command-line inputs into a sorted, de-duplicated file list.
///
/// Explicit files are kept as given. Directories are walked recursively for
/// files whose extension is in `extensions`. Anything else is a glob pattern.
pub fn discover(inputs: &[String], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            walk(path, extensions, &mut files)?;
        } else {
            expand_glob(input, &mut files);
        }
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn expand_glob(pattern: &str, files: &mut Vec<PathBuf>) {
    let entries = match glob::glob(pattern) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("invalid glob pattern {}: {}", pattern, e);
            return;
        }
    };
    let matches: Vec<_> = entries.filter_map(|r| r.ok()).filter(|p| p.is_file()).collect();
    if matches.is_empty() {
        warn!("no files matched: {}", pattern);
    }
    files.extend(matches);
}

/// Recursively collect matching files under `dir`, skipping hidden directories.
fn walk(dir: &Path, extensions: &[String], files: &mut Vec<PathBuf>) -> Result<()> {
    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(entry.depth() > 0 && is_dir && is_hidden(entry.path()))
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if let Some(code) = exhausted_errno(&e) {
                    return Err(Error::ResourceExhausted {
                        path: dir.to_path_buf(),
                        source: io::Error::from_raw_os_error(code),
                    });
                }
                warn!("couldn't open directory: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if entry.depth() > 0 && path.is_file() && has_extension(path, extensions) {
            files.push(path.to_path_buf());
        }
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want == ext))
}

/// Errno of a walk error caused by running out of file descriptors.
#[cfg(unix)]
fn exhausted_errno(e: &ignore::Error) -> Option<i32> {
    e.io_error()
        .and_then(io::Error::raw_os_error)
        .filter(|&code| code == libc::EMFILE || code == libc::ENFILE)
}

#[cfg(not(unix))]
fn exhausted_errno(_e: &ignore::Error) -> Option<i32> {
    None
}
