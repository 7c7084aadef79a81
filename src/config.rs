//! Conversion configuration module.
//!
//! Handles loading, validating, and merging `gitbook2mkdocs.toml`. Stock
//! defaults are serialized to a TOML table and the user's file (if any) is
//! merged on top, so a config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! The file lives in the root of the GitBook source tree:
//!
//! ```text
//! src/
//! ├── gitbook2mkdocs.toml      # Optional, overrides stock defaults
//! ├── SUMMARY.md
//! ├── README.md
//! └── guide/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [nav]
//! enabled = true
//! summary_file = "SUMMARY.md"
//! nav_file = ".nav.yml"
//! index_file = "README.md"
//! include_star = true
//! always_use_titles = false
//! ignore = "*.hidden.md"
//!
//! [assets]
//! source_dir = ".gitbook/assets"
//! target_dir = "assets"
//! manifest = "assets.json"
//!
//! [rewrite]
//! rules = ["tag", "hint", "tab", "embed_yt", "embed", "code", "mark", "link", "quote", "images", "file"]
//! exclude = []
//!
//! [extra]
//! dir = "extra"
//! ```
//!
//! Unknown keys and unknown rule names are rejected to catch typos early.

use crate::rewrite::Rule;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the source root.
pub const CONFIG_FILENAME: &str = "gitbook2mkdocs.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full conversion configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Navigation file generation.
    pub nav: NavConfig,
    /// Asset renaming and copying.
    pub assets: AssetsConfig,
    /// Inline markup rewriting.
    pub rewrite: RewriteConfig,
    /// Extra files copied over the finished tree.
    pub extra: ExtraConfig,
}

impl ConvertConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("nav.summary_file", &self.nav.summary_file),
            ("nav.nav_file", &self.nav.nav_file),
            ("nav.index_file", &self.nav.index_file),
        ] {
            if value.is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
            if value.contains('/') || value.contains('\\') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a bare filename, got {value:?}"
                )));
            }
        }
        if self.nav.ignore.trim().is_empty() {
            return Err(ConfigError::Validation(
                "nav.ignore must not be empty".into(),
            ));
        }
        if self.assets.target_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets.target_dir must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for the outline parser and the nav emitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Whether `convert` generates navigation files at all.
    pub enabled: bool,
    /// Outline file name, relative to the tree root.
    pub summary_file: String,
    /// Navigation document file name. The root document's key is exactly this.
    pub nav_file: String,
    /// Per-directory landing page, always listed first in its directory.
    pub index_file: String,
    /// Append a `"*"` entry so files not listed in the outline still show up.
    pub include_star: bool,
    /// Emit `{title: file}` for plain pages instead of the bare filename.
    pub always_use_titles: bool,
    /// Glob written to the `ignore` field of every navigation document.
    pub ignore: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            summary_file: "SUMMARY.md".to_string(),
            nav_file: ".nav.yml".to_string(),
            index_file: "README.md".to_string(),
            include_star: true,
            always_use_titles: false,
            ignore: "*.hidden.md".to_string(),
        }
    }
}

/// Asset directory layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Where GitBook keeps uploaded files, relative to the source root.
    pub source_dir: String,
    /// Where renamed assets land, relative to the target root.
    pub target_dir: String,
    /// Rename map written into the source root.
    pub manifest: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            source_dir: ".gitbook/assets".to_string(),
            target_dir: "assets".to_string(),
            manifest: "assets.json".to_string(),
        }
    }
}

/// Which rewrite rules run, in their fixed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RewriteConfig {
    /// Enabled rules. Order in this list does not change execution order.
    pub rules: Vec<Rule>,
    /// Rules removed from `rules`.
    pub exclude: Vec<Rule>,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            rules: Rule::DEFAULT.to_vec(),
            exclude: Vec::new(),
        }
    }
}

impl RewriteConfig {
    /// The rules that will actually run, in execution order.
    pub fn active_rules(&self) -> Vec<Rule> {
        Rule::ALL
            .iter()
            .copied()
            .filter(|r| self.rules.contains(r) && !self.exclude.contains(r))
            .collect()
    }
}

/// Extra files copied into the target root after conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtraConfig {
    /// Directory of extra files (stylesheets, overrides). Relative paths
    /// resolve against the working directory.
    pub dir: String,
}

impl Default for ExtraConfig {
    fn default() -> Self {
        Self {
            dir: "extra".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ConvertConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `gitbook2mkdocs.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the config for a source tree: stock defaults, user file on top,
/// then validation.
pub fn load_config(source_root: &Path) -> Result<ConvertConfig, ConfigError> {
    let merged = match load_raw_config(source_root)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    let config: ConvertConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `gitbook2mkdocs.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# gitbook2mkdocs configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# Place this file in the root of the GitBook source tree.

# ---------------------------------------------------------------------------
# Navigation (.nav.yml files for the mkdocs awesome-nav plugin)
# ---------------------------------------------------------------------------
[nav]
# Generate navigation files during `convert`.
enabled = true

# Outline file describing the whole page tree.
summary_file = "SUMMARY.md"

# File name of every generated navigation document.
nav_file = ".nav.yml"

# Landing page of a directory; always listed first in its navigation.
index_file = "README.md"

# Append "*" so pages missing from the outline are still listed.
include_star = true

# Write {Title: page.md} for every page instead of the bare file name.
always_use_titles = false

# Pages matching this glob are hidden from navigation.
ignore = "*.hidden.md"

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# GitBook upload directory, relative to the source root.
source_dir = ".gitbook/assets"

# Destination directory, relative to the target root.
target_dir = "assets"

# Rename map (original name -> new name), written into the source root.
manifest = "assets.json"

# ---------------------------------------------------------------------------
# Inline markup rewriting
# ---------------------------------------------------------------------------
[rewrite]
# Available: tag, hint, tab, embed_yt, embed, code, mark, link, quote,
#            images, file, listitem
rules = ["tag", "hint", "tab", "embed_yt", "embed", "code", "mark", "link", "quote", "images", "file"]
exclude = []

# ---------------------------------------------------------------------------
# Extra files copied over the finished tree
# ---------------------------------------------------------------------------
[extra]
dir = "extra"
"##
}
