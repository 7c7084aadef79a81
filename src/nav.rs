//! Outline parsing: `SUMMARY.md` lines → one navigation document per directory.
//!
//! The parser is a recursive descent over indentation. Each call of
//! [`Parser::parse_document`] owns one document frame and reads lines until
//! something closes it:
//!
//! ```text
//! # Table of contents                  root document (depth 0)
//! * [Welcome](README.md)               ─ entry of root
//! ## Guide                             ─ opens chapter (depth 1), DirectoryRef in root
//! * [Start](guide/start.md)              ─ entry of chapter
//! * [Advanced](guide/advanced/README.md) ─ entry of chapter, shown as its folder
//!   * [Tuning](guide/advanced/tuning.md)   ─ deeper: previous bullet becomes the
//!                                            header of guide/advanced (depth 2)
//! ## Reference                         ─ closes depth 2 and depth 1, handed back to root
//! ```
//!
//! Lines that close a frame are pushed back onto the [`LineCursor`] so the
//! parent frame reads them again. A shallower bullet is therefore processed
//! exactly once, by the frame whose depth it matches.
//!
//! ## Chapter folding
//!
//! A chapter is first keyed by its heading title. When it closes, the key is
//! replaced by the deepest directory shared by every page linked directly in
//! the chapter (`a/b/x.md`, `a/b/y.md`, `a/c/z.md` → `a`). An index page
//! counts for the directory its folder entry lives in (`a/s/README.md` → `a`),
//! so a chapter never folds onto one of its nested documents. Chapters whose
//! pages share nothing but the tree root keep their heading key, since folding
//! to the root would merge the chapter into the root document.
//!
//! Opening or folding into a key that already has a document merges the two.
//! Entries stay in source-line order and a synthesized index entry stays first.

use crate::config::NavConfig;
use crate::naming;
use crate::outline::{self, LineCursor, LineKind, OutlineLine};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Identifies a navigation document by the directory it describes.
///
/// The empty directory is the tree root. Keys sort by directory, so the root
/// comes first and a directory precedes its subdirectories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentKey {
    dir: String,
}

impl DocumentKey {
    pub fn root() -> Self {
        Self { dir: String::new() }
    }

    pub fn for_dir(dir: &str) -> Self {
        Self {
            dir: dir.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn is_root(&self) -> bool {
        self.dir.is_empty()
    }

    /// Path of the document relative to the output root: `guide/.nav.yml`.
    pub fn file_path(&self, nav_file: &str) -> String {
        naming::join(&self.dir, nav_file)
    }
}

impl fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.dir)
        }
    }
}

/// One item of a navigation document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEntry {
    /// Link to a markdown file in the document's directory.
    PlainFile { title: String, file: String },
    /// Link to a subdirectory that has its own navigation document.
    DirectoryRef { title: String, dir: String },
    /// Outline text that carried no link; kept so nothing is dropped silently.
    RawTitle(String),
}

impl NavEntry {
    pub fn title(&self) -> &str {
        match self {
            NavEntry::PlainFile { title, .. } | NavEntry::DirectoryRef { title, .. } => title,
            NavEntry::RawTitle(text) => text,
        }
    }
}

/// Origin of entries synthesized by the parser rather than read from a line.
const SYNTHESIZED: usize = 0;

/// Ordered entries of one navigation document.
///
/// Every entry remembers the outline line it came from, so documents merged
/// from several frames keep source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavDocument {
    entries: Vec<NavEntry>,
    origins: Vec<usize>,
}

impl NavDocument {
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, origin: usize, entry: NavEntry) {
        self.entries.push(entry);
        self.origins.push(origin);
    }

    /// Put the directory's index page first, once.
    fn prepend_index(&mut self, title: &str, file: &str) {
        if self.origins.first() == Some(&SYNTHESIZED) {
            return;
        }
        self.entries.insert(
            0,
            NavEntry::PlainFile {
                title: title.to_string(),
                file: file.to_string(),
            },
        );
        self.origins.insert(0, SYNTHESIZED);
    }

    /// Merge another document into this one, keeping source order.
    fn absorb(&mut self, other: NavDocument) {
        let has_index = self.origins.first() == Some(&SYNTHESIZED);
        let mut merged: Vec<(usize, NavEntry)> = self
            .origins
            .drain(..)
            .zip(self.entries.drain(..))
            .collect();
        merged.extend(
            other
                .origins
                .into_iter()
                .zip(other.entries)
                .filter(|(origin, _)| !(has_index && *origin == SYNTHESIZED)),
        );
        merged.sort_by_key(|(origin, _)| *origin);
        let (origins, entries): (Vec<usize>, Vec<NavEntry>) = merged.into_iter().unzip();
        self.origins = origins;
        self.entries = entries;
    }
}

/// A bullet the parser could not extract a link from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    pub line_number: usize,
    pub text: String,
}

/// Parse result: every navigation document, keyed by directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavTree {
    pub documents: BTreeMap<DocumentKey, NavDocument>,
    pub malformed: Vec<MalformedLine>,
}

impl NavTree {
    pub fn get(&self, dir: &str) -> Option<&NavDocument> {
        self.documents.get(&DocumentKey::for_dir(dir))
    }

    pub fn root(&self) -> Option<&NavDocument> {
        self.documents.get(&DocumentKey::root())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Read and lex the outline file.
///
/// A missing outline is not an error: it is logged and `Ok(None)` is returned,
/// so callers can skip navigation and carry on.
pub fn read_outline(path: &Path) -> Result<Option<Vec<OutlineLine>>, NavError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(outline::lex(&text))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found, skipping navigation", path.display());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Read `<root>/<summary_file>` and parse it. `None` if there is no outline.
pub fn build_nav_tree(root: &Path, config: &NavConfig) -> Result<Option<NavTree>, NavError> {
    let lines = read_outline(&root.join(&config.summary_file))?;
    Ok(lines.map(|lines| parse(&lines, config)))
}

/// Parse lexed outline lines into navigation documents.
///
/// The root document always exists in the result.
pub fn parse(lines: &[OutlineLine], config: &NavConfig) -> NavTree {
    let mut parser = Parser {
        cursor: LineCursor::new(lines),
        index_file: &config.index_file,
        tree: NavTree::default(),
    };
    parser.run();
    parser.tree
}

struct Parser<'a> {
    cursor: LineCursor<'a>,
    index_file: &'a str,
    tree: NavTree,
}

/// State of the document currently being filled.
struct Frame<'a> {
    key: DocumentKey,
    depth: usize,
    /// Opened by a `## ` heading; only chapters fold their key.
    chapter: bool,
    /// Directories the entries linked directly in a chapter belong to.
    child_dirs: Vec<String>,
    /// Most recent bullet of this frame, the header of a deeper document.
    last_bullet: Option<&'a OutlineLine>,
}

impl<'a> Parser<'a> {
    fn run(&mut self) {
        let header = match self.cursor.next_line() {
            Some(line) if line.kind == LineKind::Bullet => {
                self.cursor.push_back();
                None
            }
            first => first,
        };
        self.parse_document(header, 0, DocumentKey::root());
    }

    /// Fill the document headed by `header` and return its final key.
    ///
    /// `fallback` keys the document when the header carries no link path.
    fn parse_document(
        &mut self,
        header: Option<&'a OutlineLine>,
        depth: usize,
        fallback: DocumentKey,
    ) -> DocumentKey {
        let header_link = header.and_then(|h| h.link.as_ref());
        let key = match header_link.and_then(|l| l.path.as_deref()) {
            _ if depth == 0 => DocumentKey::root(),
            Some(path) => DocumentKey::for_dir(path),
            None => fallback,
        };
        let mut frame = Frame {
            key,
            depth,
            chapter: depth == 1 && header.is_some_and(|h| h.kind == LineKind::TopHeading),
            child_dirs: Vec::new(),
            last_bullet: None,
        };

        let index_link = header_link.filter(|l| l.is_index(self.index_file));
        let document = self.document_mut(&frame.key);
        if let Some(link) = index_link {
            document.prepend_index(&link.title, &link.filename);
        }
        debug!("open {} at depth {depth}", frame.key);

        while let Some(line) = self.cursor.next_line() {
            match line.kind {
                LineKind::TopHeading | LineKind::SectionBreak if depth > 0 => {
                    self.cursor.push_back();
                    break;
                }
                LineKind::TopHeading => {
                    let title = line.display_title();
                    let chapter =
                        self.parse_document(Some(line), 1, DocumentKey::for_dir(title));
                    self.document_mut(&frame.key).push(
                        line.number,
                        NavEntry::DirectoryRef {
                            title: title.to_string(),
                            dir: chapter.dir().to_string(),
                        },
                    );
                }
                LineKind::SectionBreak | LineKind::Other => {}
                LineKind::Bullet if depth > 0 && line.nesting_depth() > depth => {
                    match frame.last_bullet {
                        Some(previous) => {
                            self.cursor.push_back();
                            self.parse_document(Some(previous), depth + 1, frame.key.clone());
                        }
                        None => self.add_entry(&mut frame, line),
                    }
                }
                LineKind::Bullet if depth > 0 && line.nesting_depth() < depth => {
                    self.cursor.push_back();
                    break;
                }
                LineKind::Bullet => self.add_entry(&mut frame, line),
            }
        }

        self.close(frame)
    }

    fn add_entry(&mut self, frame: &mut Frame<'a>, line: &'a OutlineLine) {
        let entry = match &line.link {
            Some(link) => {
                let (entry, entry_dir) = match link.last_dir_segment() {
                    // Listed as its folder, relative to the folder's parent.
                    Some(dir) if link.is_index(self.index_file) => (
                        NavEntry::DirectoryRef {
                            title: link.title.clone(),
                            dir: dir.to_string(),
                        },
                        naming::parent_dir(link.dir().trim_end_matches('/')),
                    ),
                    _ => (
                        NavEntry::PlainFile {
                            title: link.title.clone(),
                            file: link.filename.clone(),
                        },
                        link.dir(),
                    ),
                };
                if frame.chapter {
                    frame.child_dirs.push(entry_dir.to_string());
                }
                entry
            }
            None => {
                warn!(
                    "outline line {}: no link target in `{}`",
                    line.number, line.raw
                );
                self.tree.malformed.push(MalformedLine {
                    line_number: line.number,
                    text: line.raw.clone(),
                });
                NavEntry::RawTitle(line.title.clone())
            }
        };
        self.document_mut(&frame.key).push(line.number, entry);
        frame.last_bullet = Some(line);
    }

    /// Finish a frame, folding a chapter's key to its pages' common directory.
    fn close(&mut self, frame: Frame<'a>) -> DocumentKey {
        debug!("close {} at depth {}", frame.key, frame.depth);
        if !frame.chapter || frame.child_dirs.is_empty() {
            return frame.key;
        }

        let common = common_dir(&frame.child_dirs);
        if common.is_empty() {
            warn!(
                "chapter `{}` has pages without a shared directory, keeping its heading key",
                frame.key
            );
            return frame.key;
        }

        let folded = DocumentKey::for_dir(&common);
        if folded != frame.key {
            debug!("fold {} into {folded}", frame.key);
            if let Some(document) = self.tree.documents.remove(&frame.key) {
                self.document_mut(&folded).absorb(document);
            }
        }
        folded
    }

    fn document_mut(&mut self, key: &DocumentKey) -> &mut NavDocument {
        self.tree.documents.entry(key.clone()).or_default()
    }
}

/// Deepest directory shared by all `dirs`, compared segment by segment.
fn common_dir(dirs: &[String]) -> String {
    let mut iter = dirs.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut common: Vec<&str> = first.split('/').filter(|s| !s.is_empty()).collect();
    for dir in iter {
        let shared = common
            .iter()
            .zip(dir.split('/').filter(|s| !s.is_empty()))
            .take_while(|(a, b)| *a == b)
            .count();
        common.truncate(shared);
    }
    common.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    // =========================================================================
    // Documented examples
    // =========================================================================

    #[test]
    fn chapter_becomes_directory_document() {
        let tree = parse_str(
            "## Table of contents\n\
             * [Intro](README.md)\n\
             ## Guide\n\
             * [Start](guide/start.md)\n\
             * [Details](guide/details.md)\n",
        );

        assert_eq!(tree.len(), 2);
        assert_eq!(
            entry_labels(find_doc(&tree, "")),
            vec!["README.md", "Guide: guide"]
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "guide")),
            vec!["start.md", "details.md"]
        );
    }

    #[test]
    fn deeper_bullet_opens_nested_document() {
        let tree = parse_str(
            "# Contents\n\
             ## Guide\n\
             * [Start](guide/start.md)\n\
             * [Advanced](guide/advanced/README.md)\n\
             \x20 * [Tuning](guide/advanced/tuning.md)\n\
             \x20 * [Limits](guide/advanced/limits.md)\n\
             * [End](guide/end.md)\n",
        );

        assert_eq!(
            entry_labels(find_doc(&tree, "guide")),
            vec!["start.md", "Advanced: advanced", "end.md"]
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "guide/advanced")),
            vec!["README.md", "tuning.md", "limits.md"]
        );
    }

    #[test]
    fn chapter_folds_to_deepest_common_directory() {
        let tree = parse_str(
            "# Contents\n\
             ## Mixed\n\
             * [X](a/b/x.md)\n\
             * [Y](a/b/y.md)\n\
             * [Z](a/c/z.md)\n",
        );

        assert!(tree.get("Mixed").is_none());
        assert!(tree.get("a/b").is_none());
        assert_eq!(
            entry_labels(find_doc(&tree, "a")),
            vec!["x.md", "y.md", "z.md"]
        );
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["Mixed: a"]);
    }

    // =========================================================================
    // Root document
    // =========================================================================

    #[test]
    fn root_exists_for_header_only_outline() {
        let tree = parse_str("# Table of contents\n");
        assert_eq!(tree.len(), 1);
        assert!(find_doc(&tree, "").is_empty());
    }

    #[test]
    fn root_exists_for_empty_outline() {
        let tree = parse_str("");
        assert!(tree.root().is_some());
    }

    #[test]
    fn leading_bullet_is_not_swallowed_as_header() {
        let tree = parse_str("* [A](a.md)\n* [B](b.md)\n");
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["a.md", "b.md"]);
    }

    #[test]
    fn root_bullets_ignore_indentation() {
        let tree = parse_str("# T\n* [A](a.md)\n    * [B](b.md)\n");
        assert_eq!(tree.len(), 1);
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["a.md", "b.md"]);
    }

    #[test]
    fn root_header_link_does_not_rekey_root() {
        let tree = parse_str("# [Home](home/README.md)\n* [A](a.md)\n");
        assert_eq!(tree.len(), 1);
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["README.md", "a.md"]);
    }

    #[test]
    fn root_index_bullet_with_path_is_directory_ref() {
        let tree = parse_str("* [Home](home/README.md)\n");
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["Home: home"]);
    }

    // =========================================================================
    // Index entries
    // =========================================================================

    #[test]
    fn index_header_is_first_entry() {
        let tree = parse_str(
            "# T\n\
             ## Guide\n\
             * [Guide](guide/README.md)\n\
             \x20 * [A](guide/topic/a.md)\n",
        );
        let nested = find_doc(&tree, "guide");
        assert_eq!(nested.entries()[0].title(), "Guide");
        assert_eq!(entry_labels(nested), vec!["README.md", "a.md"]);
        assert_eq!(entry_labels(find_doc(&tree, "Guide")), vec!["Guide: guide"]);
    }

    #[test]
    fn chapter_of_index_subtree_does_not_fold_onto_it() {
        let tree = parse_str(
            "# T\n\
             ## G\n\
             * [S](g/s/README.md)\n\
             \x20 * [X](g/s/x.md)\n\
             * [Y](g/y.md)\n",
        );
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["G: g"]);
        assert_eq!(entry_labels(find_doc(&tree, "g")), vec!["S: s", "y.md"]);
        assert_eq!(entry_labels(find_doc(&tree, "g/s")), vec!["README.md", "x.md"]);
    }

    #[test]
    fn chapter_with_only_an_index_bullet_folds_to_its_parent() {
        let tree = parse_str("# T\n## G\n* [S](g/s/README.md)\n\x20 * [X](g/s/x.md)\n");
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["G: g"]);
        assert_eq!(entry_labels(find_doc(&tree, "g")), vec!["S: s"]);
        assert_eq!(entry_labels(find_doc(&tree, "g/s")), vec!["README.md", "x.md"]);
    }

    #[test]
    fn linked_chapter_heading_prepends_its_index() {
        let tree = parse_str(
            "# T\n\
             ## [API](api/README.md)\n\
             * [Client](api/client.md)\n",
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "api")),
            vec!["README.md", "client.md"]
        );
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["API: api"]);
    }

    #[test]
    fn index_without_path_stays_plain_file() {
        let tree = parse_str("# T\n## Guide\n* [Intro](README.md)\n* [A](guide/a.md)\n");
        let doc = find_doc(&tree, "Guide");
        assert_eq!(entry_labels(doc), vec!["README.md", "a.md"]);
    }

    // =========================================================================
    // Closing frames
    // =========================================================================

    #[test]
    fn shallower_bullet_processed_once_by_parent() {
        let tree = parse_str(
            "# T\n\
             ## G\n\
             * [Sub](g/sub/README.md)\n\
             \x20 * [Deep](g/sub/deep.md)\n\
             * [After](g/after.md)\n",
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "g")),
            vec!["Sub: sub", "after.md"]
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "g/sub")),
            vec!["README.md", "deep.md"]
        );
    }

    #[test]
    fn heading_closes_every_open_level() {
        let tree = parse_str(
            "# T\n\
             ## One\n\
             * [A](one/a/README.md)\n\
             \x20 * [B](one/a/b/README.md)\n\
             \x20   * [C](one/a/b/c.md)\n\
             ## Two\n\
             * [D](two/d.md)\n",
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "")),
            vec!["One: one", "Two: two"]
        );
        assert_eq!(entry_labels(find_doc(&tree, "one")), vec!["A: a"]);
        assert_eq!(entry_labels(find_doc(&tree, "one/a")), vec!["README.md", "B: b"]);
        assert_eq!(entry_labels(find_doc(&tree, "one/a/b")), vec!["README.md", "c.md"]);
        assert_eq!(entry_labels(find_doc(&tree, "two")), vec!["d.md"]);
    }

    #[test]
    fn section_break_closes_chapter() {
        let tree = parse_str(
            "# T\n\
             ## G\n\
             * [A](g/a.md)\n\
             ***\n\
             * [Loose](loose.md)\n",
        );
        assert_eq!(entry_labels(find_doc(&tree, "g")), vec!["a.md"]);
        assert_eq!(
            entry_labels(find_doc(&tree, "")),
            vec!["G: g", "loose.md"]
        );
    }

    #[test]
    fn chapter_folds_at_end_of_input() {
        let tree = parse_str("# T\n## Last\n* [A](last/a.md)\n");
        assert!(tree.get("Last").is_none());
        assert_eq!(entry_labels(find_doc(&tree, "last")), vec!["a.md"]);
    }

    #[test]
    fn chapter_without_children_keeps_heading_key() {
        let tree = parse_str("# T\n## Empty\n## Full\n* [A](full/a.md)\n");
        assert!(find_doc(&tree, "Empty").is_empty());
        assert_eq!(
            entry_labels(find_doc(&tree, "")),
            vec!["Empty: Empty", "Full: full"]
        );
    }

    #[test]
    fn chapter_with_only_root_pages_keeps_heading_key() {
        let tree = parse_str("# T\n## Misc\n* [A](a.md)\n* [B](other/b.md)\n");
        assert_eq!(
            entry_labels(find_doc(&tree, "Misc")),
            vec!["a.md", "b.md"]
        );
    }

    #[test]
    fn folding_into_existing_document_merges_in_source_order() {
        let tree = parse_str(
            "# T\n\
             ## A\n\
             * [One](shared/one.md)\n\
             ## B\n\
             * [Two](shared/two.md)\n",
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "shared")),
            vec!["one.md", "two.md"]
        );
        assert_eq!(
            entry_labels(find_doc(&tree, "")),
            vec!["A: shared", "B: shared"]
        );
    }

    // =========================================================================
    // Odd input
    // =========================================================================

    #[test]
    fn bullet_without_link_recorded_as_malformed() {
        let tree = parse_str("# T\n## G\n* [A](g/a.md)\n* Just text\n");
        assert_eq!(
            entry_labels(find_doc(&tree, "g")),
            vec!["a.md", "~Just text"]
        );
        assert_eq!(
            tree.malformed,
            vec![MalformedLine {
                line_number: 4,
                text: "* Just text".to_string()
            }]
        );
    }

    #[test]
    fn deeper_bullet_without_previous_is_plain_entry() {
        let tree = parse_str("# T\n## G\n  * [A](g/a.md)\n* [B](g/b.md)\n");
        assert_eq!(entry_labels(find_doc(&tree, "g")), vec!["a.md", "b.md"]);
    }

    #[test]
    fn other_lines_ignored() {
        let tree = parse_str(
            "# T\n\
             Some prose.\n\
             ## G\n\
             ### Part one\n\
             * [A](g/a.md)\n",
        );
        assert_eq!(entry_labels(find_doc(&tree, "")), vec!["G: g"]);
        assert_eq!(entry_labels(find_doc(&tree, "g")), vec!["a.md"]);
    }

    #[test]
    fn tab_indentation_nests() {
        let tree = parse_str("# T\n## G\n* [S](g/s/README.md)\n\t* [X](g/s/x.md)\n");
        assert_eq!(entry_labels(find_doc(&tree, "g")), vec!["S: s"]);
        assert_eq!(entry_labels(find_doc(&tree, "g/s")), vec!["README.md", "x.md"]);
    }

    #[test]
    fn reparse_is_identical() {
        let text = std::fs::read_to_string(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/book/SUMMARY.md"),
        )
        .unwrap();
        assert_eq!(parse_str(&text), parse_str(&text));
    }

    #[test]
    fn index_file_name_is_configurable() {
        let config = NavConfig {
            index_file: "index.md".to_string(),
            ..NavConfig::default()
        };
        let lines = outline::lex("# T\n## G\n* [S](g/s/index.md)\n* [R](g/README.md)\n");
        let tree = parse(&lines, &config);
        assert_eq!(entry_labels(find_doc(&tree, "g")), vec!["S: s", "README.md"]);
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn common_dir_segment_wise() {
        let dirs = |d: &[&str]| d.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(common_dir(&dirs(&["a/b", "a/b", "a/c"])), "a");
        assert_eq!(common_dir(&dirs(&["ab/x", "ac/x"])), "");
        assert_eq!(common_dir(&dirs(&["a/b/c"])), "a/b/c");
        assert_eq!(common_dir(&dirs(&["a/b", ""])), "");
        assert_eq!(common_dir(&[]), "");
    }

    #[test]
    fn document_key_paths() {
        assert_eq!(DocumentKey::root().file_path(".nav.yml"), ".nav.yml");
        assert_eq!(
            DocumentKey::for_dir("guide/").file_path(".nav.yml"),
            "guide/.nav.yml"
        );
        assert!(DocumentKey::root() < DocumentKey::for_dir("a"));
    }

    #[test]
    fn read_outline_missing_file_is_none() {
        let tmp = tempfile::TempDir::new().unwrap();
        let lines = read_outline(&tmp.path().join("SUMMARY.md")).unwrap();
        assert!(lines.is_none());
    }

    #[test]
    fn build_nav_tree_from_fixture() {
        let tmp = setup_fixtures();
        let tree = build_nav_tree(tmp.path(), &NavConfig::default())
            .unwrap()
            .unwrap();
        let keys: Vec<&str> = tree.documents.keys().map(|k| k.dir()).collect();
        assert_eq!(
            keys,
            vec![
                "",
                "getting-started",
                "getting-started/configuration",
                "reference",
                "reference/api"
            ]
        );
    }
}
