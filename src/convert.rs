//! Conversion pipeline.
//!
//! ```text
//! 1. Copy      src/            →  docs/            (pages, hidden renames)
//! 2. Rewrite   docs/**/*.md    →  docs/**/*.md     (GitBook markup → MkDocs)
//! 3. Navigate  src/SUMMARY.md  →  docs/**/.nav.yml
//! 4. Assets    src/.gitbook/assets → docs/assets   (renamed, + src/assets.json)
//! 5. Extra     extra/          →  docs/
//! ```
//!
//! Only stage 1 and 2 failures abort the run. A missing outline, missing
//! assets and unwritable navigation files end up in the [`ConvertReport`].

use crate::assets::{self, AssetCopyReport, AssetError};
use crate::config::{CONFIG_FILENAME, ConfigError, ConvertConfig};
use crate::emit::{self, EmitReport};
use crate::files::{self, CopyReport, FileError};
use crate::nav::{self, NavError, NavTree};
use crate::rewrite::Rewriter;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Navigation error: {0}")]
    Nav(#[from] NavError),
    #[error("File error: {0}")]
    Files(#[from] FileError),
    #[error("Asset error: {0}")]
    Assets(#[from] AssetError),
    #[error("Source directory not found: {0}")]
    SourceMissing(PathBuf),
    #[error("Target directory {0} contains the source tree")]
    TargetContainsSource(PathBuf),
}

/// What happened to navigation during a run.
#[derive(Debug)]
pub enum NavOutcome {
    /// Turned off by config or command line.
    Disabled,
    /// The outline file does not exist.
    MissingOutline(PathBuf),
    Emitted { tree: NavTree, report: EmitReport },
}

#[derive(Debug)]
pub struct ConvertReport {
    pub copy: CopyReport,
    /// Markdown pages passed through the rewriter.
    pub pages: usize,
    pub nav: NavOutcome,
    /// Assets referenced by the rewritten pages.
    pub assets_found: usize,
    pub manifest: PathBuf,
    pub asset_copy: AssetCopyReport,
    /// `None` when the extra directory does not exist.
    pub extra_files: Option<usize>,
}

/// Run the full pipeline from a GitBook tree at `source` into `target`.
///
/// `target` is deleted and rebuilt. `generate_nav` can turn navigation off
/// even when the config enables it.
pub fn convert(
    source: &Path,
    target: &Path,
    config: &ConvertConfig,
    generate_nav: bool,
) -> Result<ConvertReport, ConvertError> {
    check_directories(source, target)?;

    let skip = [
        config.nav.summary_file.as_str(),
        CONFIG_FILENAME,
        config.assets.manifest.as_str(),
    ];
    let copy = files::copy_tree(source, target, &skip)?;
    info!("copied {} files into {}", copy.files, target.display());

    let mut rewriter = Rewriter::new(config);
    let pages = rewrite_pages(target, &mut rewriter)?;
    let asset_map = rewriter.into_assets();

    let nav = if generate_nav && config.nav.enabled {
        generate_nav_files(source, target, config)?
    } else {
        NavOutcome::Disabled
    };

    let manifest = source.join(&config.assets.manifest);
    assets::write_manifest(&asset_map, &manifest)?;
    let asset_copy = assets::copy_assets(
        &asset_map,
        &source.join(&config.assets.source_dir),
        &target.join(&config.assets.target_dir),
    )?;

    let extra_files = files::copy_extra_files(Path::new(&config.extra.dir), target)?;

    Ok(ConvertReport {
        copy,
        pages,
        nav,
        assets_found: asset_map.len(),
        manifest,
        asset_copy,
        extra_files,
    })
}

/// Parse `<source>/<summary_file>` and write navigation files under `target`.
pub fn generate_nav_files(
    source: &Path,
    target: &Path,
    config: &ConvertConfig,
) -> Result<NavOutcome, ConvertError> {
    let Some(tree) = nav::build_nav_tree(source, &config.nav)? else {
        return Ok(NavOutcome::MissingOutline(
            source.join(&config.nav.summary_file),
        ));
    };
    let report = emit::emit(&tree, target, &config.nav);
    Ok(NavOutcome::Emitted { tree, report })
}

fn check_directories(source: &Path, target: &Path) -> Result<(), ConvertError> {
    if !source.is_dir() {
        return Err(ConvertError::SourceMissing(source.to_path_buf()));
    }
    if target.exists() && source.canonicalize()?.starts_with(target.canonicalize()?) {
        return Err(ConvertError::TargetContainsSource(target.to_path_buf()));
    }
    Ok(())
}

/// Rewrite every markdown page under `root` in place.
fn rewrite_pages(root: &Path, rewriter: &mut Rewriter) -> Result<usize, ConvertError> {
    let pages = files::markdown_files(root)?;
    for page in &pages {
        debug!("rewriting {}", page.display());
        let text = fs::read_to_string(page)?;
        let rewritten = rewriter.rewrite(&text);
        if rewritten != text {
            fs::write(page, rewritten)?;
        }
    }
    Ok(pages.len())
}
