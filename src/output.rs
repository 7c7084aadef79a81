//! CLI output formatting for the conversion stages.
//!
//! # Information-First Display
//!
//! Every navigation entry leads with its positional index and title; the file
//! or directory it points at follows the arrow. Filesystem paths are shown
//! relative to the directory the user passed in, so the output reads as an
//! inventory of the book rather than a log of file operations.
//!
//! # Output Format
//!
//! ## Navigation
//!
//! ```text
//! (root) → .nav.yml
//!     001 Welcome → README.md
//!     002 Getting Started → getting-started/
//!     *
//! getting-started → getting-started/.nav.yml
//!     001 Installation → installation.md
//!
//! Malformed
//!     line 9: * Broken link
//! ```
//!
//! ## Convert
//!
//! ```text
//! Pages
//!     14 files copied, 11 pages rewritten
//!     Hidden: getting-started/drafts.hidden.md
//! Navigation
//!     Wrote 5 navigation files
//! Assets
//!     3 referenced, 3 copied → assets.json
//!     Missing: .gitbook/assets/gone.png
//! Extra
//!     none
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout.

use crate::config::NavConfig;
use crate::convert::{ConvertReport, NavOutcome};
use crate::emit::{EmitReport, WILDCARD};
use crate::nav::{NavEntry, NavTree};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `path` relative to `root` when possible, for display.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// One navigation entry: index, title, and where it points.
///
/// ```text
/// 001 Welcome → README.md
/// 002 Getting Started → getting-started/
/// 003 Orphan line
/// ```
fn entry_line(index: usize, entry: &NavEntry) -> String {
    match entry {
        NavEntry::PlainFile { title, file } => {
            format!("{} {} \u{2192} {}", format_index(index), title, file)
        }
        NavEntry::DirectoryRef { title, dir } => {
            format!("{} {} \u{2192} {}/", format_index(index), title, dir)
        }
        NavEntry::RawTitle(text) => format!("{} {}", format_index(index), text),
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Format the parsed navigation tree, one block per document.
pub fn format_nav_tree(tree: &NavTree, config: &NavConfig) -> Vec<String> {
    let mut lines = Vec::new();

    for (key, document) in &tree.documents {
        lines.push(format!(
            "{} \u{2192} {}",
            key,
            key.file_path(&config.nav_file)
        ));
        for (i, entry) in document.entries().iter().enumerate() {
            lines.push(format!("{}{}", indent(1), entry_line(i + 1, entry)));
        }
        if config.include_star {
            lines.push(format!("{}{}", indent(1), WILDCARD));
        }
    }

    if !tree.malformed.is_empty() {
        lines.push(String::new());
        lines.push("Malformed".to_string());
        for line in &tree.malformed {
            lines.push(format!("{}line {}: {}", indent(1), line.line_number, line.text));
        }
    }

    lines
}

/// Print the navigation tree to stdout.
pub fn print_nav_tree(tree: &NavTree, config: &NavConfig) {
    for line in format_nav_tree(tree, config) {
        println!("{}", line);
    }
}

/// Format the result of writing navigation files.
pub fn format_emit_report(report: &EmitReport, output_root: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Wrote {}",
        plural(report.written.len(), "navigation file")
    )];
    for (path, error) in &report.failures {
        lines.push(format!(
            "Failed: {}: {}",
            display_path(path, output_root),
            error
        ));
    }
    lines
}

/// Print the emit report to stdout.
pub fn print_emit_report(report: &EmitReport, output_root: &Path) {
    for line in format_emit_report(report, output_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Format the summary of a full conversion run.
pub fn format_convert_report(report: &ConvertReport, source: &Path, target: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Pages".to_string());
    lines.push(format!(
        "{}{} copied, {} rewritten",
        indent(1),
        plural(report.copy.files, "file"),
        plural(report.pages, "page")
    ));
    for hidden in &report.copy.hidden_pages {
        lines.push(format!("{}Hidden: {}", indent(1), hidden.display()));
    }

    lines.push("Navigation".to_string());
    match &report.nav {
        NavOutcome::Disabled => lines.push(format!("{}disabled", indent(1))),
        NavOutcome::MissingOutline(path) => lines.push(format!(
            "{}{} not found, skipped",
            indent(1),
            display_path(path, source)
        )),
        NavOutcome::Emitted { tree, report } => {
            for line in format_emit_report(report, target) {
                lines.push(format!("{}{}", indent(1), line));
            }
            if !tree.malformed.is_empty() {
                lines.push(format!(
                    "{}{} ignored",
                    indent(1),
                    plural(tree.malformed.len(), "malformed outline line")
                ));
            }
        }
    }

    lines.push("Assets".to_string());
    if report.asset_copy.source_missing {
        lines.push(format!(
            "{}{} referenced, asset directory not found",
            indent(1),
            report.assets_found
        ));
    } else {
        lines.push(format!(
            "{}{} referenced, {} copied \u{2192} {}",
            indent(1),
            report.assets_found,
            report.asset_copy.copied,
            display_path(&report.manifest, source)
        ));
    }
    for missing in &report.asset_copy.missing {
        lines.push(format!(
            "{}Missing: {}",
            indent(1),
            display_path(missing, source)
        ));
    }

    lines.push("Extra".to_string());
    match report.extra_files {
        Some(count) => lines.push(format!("{}{} copied", indent(1), plural(count, "file"))),
        None => lines.push(format!("{}none", indent(1))),
    }

    lines
}

/// Print the conversion summary to stdout.
pub fn print_convert_report(report: &ConvertReport, source: &Path, target: &Path) {
    for line in format_convert_report(report, source, target) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCopyReport;
    use crate::emit::EmitError;
    use crate::files::CopyReport;
    use crate::test_helpers::*;
    use std::path::PathBuf;

    fn report_with_nav(nav: NavOutcome) -> ConvertReport {
        ConvertReport {
            copy: CopyReport {
                files: 4,
                hidden_pages: vec![PathBuf::from("guide/draft.hidden.md")],
            },
            pages: 3,
            nav,
            assets_found: 2,
            manifest: PathBuf::from("/book/src/assets.json"),
            asset_copy: AssetCopyReport {
                copied: 1,
                missing: vec![PathBuf::from("/book/src/.gitbook/assets/gone.png")],
                source_missing: false,
            },
            extra_files: None,
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(123), "123");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entry_lines_per_variant() {
        let file = NavEntry::PlainFile {
            title: "Welcome".to_string(),
            file: "README.md".to_string(),
        };
        let dir = NavEntry::DirectoryRef {
            title: "Guide".to_string(),
            dir: "guide".to_string(),
        };
        let raw = NavEntry::RawTitle("Orphan".to_string());

        assert_eq!(entry_line(1, &file), "001 Welcome \u{2192} README.md");
        assert_eq!(entry_line(2, &dir), "002 Guide \u{2192} guide/");
        assert_eq!(entry_line(3, &raw), "003 Orphan");
    }

    #[test]
    fn display_path_outside_root_kept() {
        assert_eq!(
            display_path(Path::new("/a/b/c.md"), Path::new("/a")),
            "b/c.md"
        );
        assert_eq!(display_path(Path::new("/x/c.md"), Path::new("/a")), "/x/c.md");
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    #[test]
    fn nav_tree_lists_documents_in_key_order() {
        let tree = parse_str(
            "# T\n\
             * [Welcome](README.md)\n\
             ## Guide\n\
             * [Start](guide/start.md)\n",
        );
        let lines = format_nav_tree(&tree, &NavConfig::default());
        assert_eq!(
            lines,
            vec![
                "(root) \u{2192} .nav.yml",
                "    001 Welcome \u{2192} README.md",
                "    002 Guide \u{2192} guide/",
                "    *",
                "guide \u{2192} guide/.nav.yml",
                "    001 Start \u{2192} start.md",
                "    *",
            ]
        );
    }

    #[test]
    fn nav_tree_without_star() {
        let tree = parse_str("# T\n* [A](a.md)\n");
        let config = NavConfig {
            include_star: false,
            ..NavConfig::default()
        };
        let lines = format_nav_tree(&tree, &config);
        assert_eq!(lines.last().unwrap(), "    001 A \u{2192} a.md");
    }

    #[test]
    fn nav_tree_lists_malformed_lines() {
        let tree = parse_str("# T\n* [A](a.md)\n* stray text\n");
        let lines = format_nav_tree(&tree, &NavConfig::default());
        let at = lines.iter().position(|l| l == "Malformed").unwrap();
        assert_eq!(lines[at + 1], "    line 3: * stray text");
    }

    #[test]
    fn emit_report_counts_and_failures() {
        let report = EmitReport {
            written: vec![PathBuf::from("/out/.nav.yml")],
            failures: vec![(
                PathBuf::from("/out/guide/.nav.yml"),
                EmitError::Io(std::io::Error::other("denied")),
            )],
        };
        let lines = format_emit_report(&report, Path::new("/out"));
        assert_eq!(lines[0], "Wrote 1 navigation file");
        assert_eq!(lines[1], "Failed: guide/.nav.yml: IO error: denied");
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    #[test]
    fn convert_report_sections() {
        let report = report_with_nav(NavOutcome::Disabled);
        let lines = format_convert_report(&report, Path::new("/book/src"), Path::new("/book/docs"));
        assert_eq!(
            lines,
            vec![
                "Pages",
                "    4 files copied, 3 pages rewritten",
                "    Hidden: guide/draft.hidden.md",
                "Navigation",
                "    disabled",
                "Assets",
                "    2 referenced, 1 copied \u{2192} assets.json",
                "    Missing: .gitbook/assets/gone.png",
                "Extra",
                "    none",
            ]
        );
    }

    #[test]
    fn convert_report_missing_outline() {
        let report = report_with_nav(NavOutcome::MissingOutline(PathBuf::from(
            "/book/src/SUMMARY.md",
        )));
        let lines = format_convert_report(&report, Path::new("/book/src"), Path::new("/book/docs"));
        assert!(lines.contains(&"    SUMMARY.md not found, skipped".to_string()));
    }

    #[test]
    fn convert_report_emitted_nav_and_extra() {
        let tree = parse_str("# T\n* [A](a.md)\n* stray\n");
        let emitted = EmitReport {
            written: vec![PathBuf::from("/book/docs/.nav.yml")],
            failures: Vec::new(),
        };
        let mut report = report_with_nav(NavOutcome::Emitted {
            tree,
            report: emitted,
        });
        report.extra_files = Some(1);

        let lines = format_convert_report(&report, Path::new("/book/src"), Path::new("/book/docs"));
        assert!(lines.contains(&"    Wrote 1 navigation file".to_string()));
        assert!(lines.contains(&"    1 malformed outline line ignored".to_string()));
        assert_eq!(lines.last().unwrap(), "    1 file copied");
    }
}
