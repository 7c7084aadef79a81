//! Asset renaming and copying.
//!
//! GitBook keeps every upload in one flat directory (`.gitbook/assets/`) under
//! its original name. While pages are rewritten, each referenced image gets a
//! short sequential name and each attached file keeps its own; the resulting
//! [`AssetMap`] drives both the `assets.json` manifest and the final copy:
//!
//! ```text
//! .gitbook/assets/Screenshot%202024.png  →  assets/image-1.png
//! .gitbook/assets/diagram.svg            →  assets/image-2.svg
//! .gitbook/assets/manual.pdf             →  assets/manual.pdf
//! ```

use crate::naming;
use log::{debug, warn};
use percent_encoding::percent_decode_str;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Original asset name → new name, in the order assets were first referenced.
///
/// Names are kept as they appear in page links, percent-encoding included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMap {
    entries: Vec<(String, String)>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// New name for an image, allocating `image-N.ext` on first sight.
    pub fn rename_image(&mut self, original: &str) -> String {
        if let Some(renamed) = self.get(original) {
            return renamed.to_string();
        }
        let renamed = naming::renamed_image(self.entries.len() + 1, original);
        debug!("asset {original} >> {renamed}");
        self.entries.push((original.to_string(), renamed.clone()));
        renamed
    }

    /// Register an attachment that keeps its name.
    pub fn record_file(&mut self, original: &str) {
        if self.get(original).is_none() {
            self.entries
                .push((original.to_string(), original.to_string()));
        }
    }

    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(from, _)| from == original)
            .map(|(_, to)| to.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AssetMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

/// Write the map as pretty JSON.
pub fn write_manifest(map: &AssetMap, path: &Path) -> Result<(), AssetError> {
    let json = serde_json::to_string_pretty(map)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Outcome of [`copy_assets`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AssetCopyReport {
    pub copied: usize,
    /// Referenced assets absent from the source directory.
    pub missing: Vec<PathBuf>,
    /// The whole source directory was absent; nothing was copied.
    pub source_missing: bool,
}

/// Copy every mapped asset from `source_dir` to `target_dir` under its new name.
///
/// Names are percent-decoded before lookup. Missing assets are reported, not
/// fatal.
pub fn copy_assets(
    map: &AssetMap,
    source_dir: &Path,
    target_dir: &Path,
) -> Result<AssetCopyReport, AssetError> {
    let mut report = AssetCopyReport::default();
    if !source_dir.is_dir() {
        warn!(
            "asset directory {} not found, no assets copied",
            source_dir.display()
        );
        report.source_missing = true;
        return Ok(report);
    }

    std::fs::create_dir_all(target_dir)?;
    for (original, renamed) in map.iter() {
        let decoded = percent_decode_str(original).decode_utf8_lossy();
        let from = source_dir.join(&*decoded);
        if !from.is_file() {
            warn!("missing asset {}", from.display());
            report.missing.push(from);
            continue;
        }
        std::fs::copy(&from, target_dir.join(renamed))?;
        report.copied += 1;
    }
    Ok(report)
}
