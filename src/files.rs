//! Source tree copying.
//!
//! Builds the MkDocs tree from the GitBook one before any page is rewritten:
//!
//! ```text
//! src/                          docs/
//! ├── .git/             skip    │
//! ├── .gitbook/assets/  skip    │   (assets are copied later, renamed)
//! ├── SUMMARY.md        skip    │
//! ├── README.md         ──────→ ├── README.md
//! ├── notes.txt         skip    │
//! └── guide/            ──────→ └── guide/
//!     ├── start.md                  ├── start.md
//!     └── draft.md                  └── draft.hidden.md   (frontmatter `hidden: true`)
//! ```
//!
//! At the root only markdown pages are copied; below it everything is.
//! Top-level directories starting with `.` are skipped, as is the target
//! itself when it lives inside the source.

use crate::naming;
use log::debug;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Outcome of [`copy_tree`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CopyReport {
    /// Files written to the target.
    pub files: usize,
    /// Target-relative paths of pages renamed as hidden.
    pub hidden_pages: Vec<PathBuf>,
}

pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

/// Replace `target` with a copy of `source`.
///
/// `skip_root_files` names root-level files that belong to the conversion
/// itself (outline, config, asset manifest) and are not pages.
pub fn copy_tree(
    source: &Path,
    target: &Path,
    skip_root_files: &[&str],
) -> Result<CopyReport, FileError> {
    if target.exists() {
        fs::remove_dir_all(target)?;
        debug!("removed {}", target.display());
    }
    fs::create_dir_all(target)?;
    let target_abs = target.canonicalize()?;

    let mut report = CopyReport::default();
    let walker = WalkDir::new(source)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| included(entry, &target_abs, skip_root_files));

    for entry in walker {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(source) else {
            continue;
        };
        let mut destination = target.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&destination)?;
            continue;
        }

        if is_markdown(entry.path()) && is_hidden_page(&read_lossy(entry.path())?) {
            let name = entry.file_name().to_string_lossy();
            destination.set_file_name(naming::hidden_page_name(&name));
            if let Ok(hidden) = destination.strip_prefix(target) {
                report.hidden_pages.push(hidden.to_path_buf());
            }
        }
        debug!("copy {} >> {}", entry.path().display(), destination.display());
        fs::copy(entry.path(), &destination)?;
        report.files += 1;
    }
    Ok(report)
}

fn included(entry: &DirEntry, target_abs: &Path, skip_root_files: &[&str]) -> bool {
    let name = entry.file_name().to_string_lossy();
    if entry.file_type().is_dir() {
        if entry.depth() == 1 && name.starts_with('.') {
            return false;
        }
        return entry
            .path()
            .canonicalize()
            .map(|p| p != target_abs)
            .unwrap_or(true);
    }
    if entry.depth() == 1 {
        return is_markdown(entry.path()) && !skip_root_files.contains(&name.as_ref());
    }
    true
}

fn read_lossy(path: &Path) -> std::io::Result<String> {
    Ok(String::from_utf8_lossy(&fs::read(path)?).into_owned())
}

/// Parse a leading `---` delimited YAML block.
///
/// Returns `None` when there is no block or it is not a YAML mapping.
pub fn extract_frontmatter(input: &str) -> Option<Mapping> {
    let mut lines = input.lines();
    let first = lines.next()?.trim_start_matches('\u{feff}').trim_end();
    if first != "---" {
        return None;
    }

    let mut yaml_lines: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            closed = true;
            break;
        }
        yaml_lines.push(line);
    }
    if !closed || yaml_lines.is_empty() {
        return None;
    }

    let value: Value = serde_yaml::from_str(&yaml_lines.join("\n")).ok()?;
    match value {
        Value::Mapping(map) => Some(map),
        _ => None,
    }
}

/// True if the page's frontmatter says `hidden: true`.
pub fn is_hidden_page(text: &str) -> bool {
    extract_frontmatter(text)
        .and_then(|fm| fm.get("hidden").and_then(Value::as_bool))
        .unwrap_or(false)
}

/// Every markdown file below `root`, sorted by path.
pub fn markdown_files(root: &Path) -> Result<Vec<PathBuf>, FileError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_markdown(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Copy every file under `extra_dir` into `target`, keeping relative paths.
///
/// Returns `None` if `extra_dir` does not exist.
pub fn copy_extra_files(extra_dir: &Path, target: &Path) -> Result<Option<usize>, FileError> {
    if !extra_dir.is_dir() {
        return Ok(None);
    }
    let mut copied = 0;
    for entry in WalkDir::new(extra_dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(extra_dir) else {
            continue;
        };
        let destination = target.join(relative);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("extra {} >> {}", entry.path().display(), destination.display());
        fs::copy(entry.path(), &destination)?;
        copied += 1;
    }
    Ok(Some(copied))
}
