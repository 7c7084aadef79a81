//! Shared test utilities for the gitbook2mkdocs test suite.
//!
//! Provides fixture setup, outline parsing shortcuts, and lookup helpers that
//! panic with the available keys when something is missing.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = parse_str("# T\n## Guide\n* [Start](guide/start.md)\n");
//! let guide = find_doc(&tree, "guide");
//! assert_eq!(entry_labels(guide), vec!["start.md"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::NavConfig;
use crate::nav::{self, NavDocument, NavEntry, NavTree};
use crate::outline;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/book/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/book");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Outline parsing
// =========================================================================

/// Lex and parse outline text with the default navigation config.
pub fn parse_str(text: &str) -> NavTree {
    nav::parse(&outline::lex(text), &NavConfig::default())
}

// =========================================================================
// Tree lookups, panics with a clear message on miss
// =========================================================================

/// Find a document by directory (`""` for the root). Panics if not found.
pub fn find_doc<'a>(tree: &'a NavTree, dir: &str) -> &'a NavDocument {
    tree.get(dir).unwrap_or_else(|| {
        let keys: Vec<&str> = tree.documents.keys().map(|k| k.dir()).collect();
        panic!("document '{dir}' not found. Available: {keys:?}")
    })
}

/// Compact labels for a document's entries.
///
/// Plain files show the file name, directory references `title: dir`, raw
/// titles are prefixed with `~`.
pub fn entry_labels(document: &NavDocument) -> Vec<String> {
    document
        .entries()
        .iter()
        .map(|entry| match entry {
            NavEntry::PlainFile { file, .. } => file.clone(),
            NavEntry::DirectoryRef { title, dir } => format!("{title}: {dir}"),
            NavEntry::RawTitle(text) => format!("~{text}"),
        })
        .collect()
}
