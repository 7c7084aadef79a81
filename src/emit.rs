//! Navigation document emission.
//!
//! Each [`NavDocument`] becomes one YAML file in the layout the MkDocs
//! awesome-nav plugin reads:
//!
//! ```yaml
//! ignore: '*.hidden.md'
//! nav:
//! - README.md
//! - changelog.md
//! - Getting Started: getting-started
//! - '*'
//! ```
//!
//! Documents touch disjoint paths, so they are written in parallel. A failed
//! write is recorded in the [`EmitReport`] and the remaining documents are
//! still written.

use crate::config::NavConfig;
use crate::nav::{DocumentKey, NavDocument, NavEntry, NavTree};
use log::{debug, warn};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Wildcard entry that pulls in every page not listed explicitly.
pub const WILDCARD: &str = "*";

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Serialize)]
struct NavFile<'a> {
    ignore: &'a str,
    nav: Vec<NavItem<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum NavItem<'a> {
    Name(&'a str),
    Titled(BTreeMap<&'a str, &'a str>),
}

impl<'a> NavItem<'a> {
    fn titled(title: &'a str, target: &'a str) -> Self {
        NavItem::Titled(BTreeMap::from([(title, target)]))
    }
}

fn nav_items<'a>(document: &'a NavDocument, config: &NavConfig) -> Vec<NavItem<'a>> {
    let mut items: Vec<NavItem<'a>> = document
        .entries()
        .iter()
        .map(|entry| match entry {
            NavEntry::PlainFile { title, file } if config.always_use_titles => {
                NavItem::titled(title, file)
            }
            NavEntry::PlainFile { file, .. } => NavItem::Name(file),
            NavEntry::DirectoryRef { title, dir } => NavItem::titled(title, dir),
            NavEntry::RawTitle(text) => NavItem::Name(text),
        })
        .collect();
    if config.include_star {
        items.push(NavItem::Name(WILDCARD));
    }
    items
}

/// Serialize one document to YAML text.
pub fn render_document(document: &NavDocument, config: &NavConfig) -> Result<String, EmitError> {
    let file = NavFile {
        ignore: &config.ignore,
        nav: nav_items(document, config),
    };
    Ok(serde_yaml::to_string(&file)?)
}

/// Outcome of writing a [`NavTree`].
#[derive(Debug, Default)]
pub struct EmitReport {
    /// Paths written, in document key order.
    pub written: Vec<PathBuf>,
    /// Paths that could not be written, with the cause.
    pub failures: Vec<(PathBuf, EmitError)>,
}

/// Write every document of `tree` to `output_root/<dir>/<nav_file>`.
pub fn emit(tree: &NavTree, output_root: &Path, config: &NavConfig) -> EmitReport {
    let documents: Vec<(&DocumentKey, &NavDocument)> = tree.documents.iter().collect();
    let results: Vec<(PathBuf, Result<(), EmitError>)> = documents
        .par_iter()
        .map(|(key, document)| {
            let path = output_root.join(key.file_path(&config.nav_file));
            let result = write_document(&path, document, config);
            (path, result)
        })
        .collect();

    let mut report = EmitReport::default();
    for (path, result) in results {
        match result {
            Ok(()) => {
                debug!("wrote {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                warn!("could not write {}: {e}", path.display());
                report.failures.push((path, e));
            }
        }
    }
    report
}

fn write_document(path: &Path, document: &NavDocument, config: &NavConfig) -> Result<(), EmitError> {
    let yaml = render_document(document, config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, yaml)?;
    Ok(())
}
