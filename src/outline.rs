//! Outline lexing.
//!
//! A GitBook `SUMMARY.md` is a flat file where structure lives entirely in
//! line prefixes and indentation:
//!
//! ```text
//! # Table of contents                       ← root title (Other)
//! * [Welcome](README.md)                    ← Bullet, level 0
//!
//! ## Guide                                  ← TopHeading (chapter)
//! * [Start](guide/start.md)                 ← Bullet, level 0
//! * [Advanced](guide/advanced/README.md)
//!   * [Tuning](guide/advanced/tuning.md)    ← Bullet, level 1
//! ***                                       ← SectionBreak
//! ```
//!
//! This module turns each non-blank physical line into an [`OutlineLine`]
//! (indentation level, kind, marker-stripped title, optional link target) and
//! provides [`LineCursor`], a forward cursor with a one-line pushback slot.
//! The parser in [`crate::nav`] hands a line back to its caller through that
//! slot instead of doing index arithmetic on the line list.

use crate::naming;
use regex::Regex;
use std::sync::LazyLock;

/// Leading spaces per indentation level.
pub const INDENT_UNIT: usize = 2;

/// `[Title](path/to/file.md)`; the path is optional for same-directory links.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<title>.*)\]\((?:(?P<path>.*)/)?(?P<filename>.*\.md)\)")
        .expect("link pattern must compile")
});

/// List or heading marker stripped from the start of a trimmed line.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(##?|\*) ").expect("marker pattern must compile"));

/// The structural role of an outline line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `## ` at column 0: starts a chapter.
    TopHeading,
    /// `***` at column 0: ends the current chapter.
    SectionBreak,
    /// `* ` after optional indentation.
    Bullet,
    /// Anything else (`# Title`, prose, `### sub-heading`).
    Other,
}

/// Structured target of a `[title](path/filename.md)` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    /// Link text with markdown escapes removed.
    pub title: String,
    /// Directory part, `None` for same-directory links.
    pub path: Option<String>,
    /// Markdown file name, always ending in `.md`.
    pub filename: String,
}

impl LinkTarget {
    /// Extract a link target from a marker-stripped title.
    ///
    /// Only the start of the text is anchored, so trailing text after the
    /// closing parenthesis is tolerated. An empty path is treated as absent.
    pub fn parse(text: &str) -> Option<Self> {
        let caps = LINK_RE.captures(text)?;
        let filename = caps.name("filename")?.as_str().to_string();
        let path = caps
            .name("path")
            .map(|m| m.as_str().to_string())
            .filter(|p| !p.is_empty());
        Some(Self {
            title: naming::unescape_markdown(&caps["title"]),
            path,
            filename,
        })
    }

    /// Directory of the target, `""` when it sits next to the outline.
    pub fn dir(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    /// Last segment of the directory part: `guide/advanced` → `advanced`.
    pub fn last_dir_segment(&self) -> Option<&str> {
        self.path
            .as_deref()
            .and_then(|p| p.trim_end_matches('/').rsplit('/').next())
            .filter(|s| !s.is_empty())
    }

    /// True if the target is the directory's index page.
    pub fn is_index(&self, index_file: &str) -> bool {
        self.filename == index_file
    }
}

/// One non-blank physical line of the outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    /// 1-based line number in the source file.
    pub number: usize,
    /// Original text, trailing whitespace removed.
    pub raw: String,
    /// Leading whitespace in units of [`INDENT_UNIT`]; a tab counts as one unit.
    pub indent_level: usize,
    pub kind: LineKind,
    /// Trimmed text with a leading `# `, `## ` or `* ` marker removed.
    pub title: String,
    pub link: Option<LinkTarget>,
}

impl OutlineLine {
    /// Lex one physical line. Returns `None` for blank lines.
    pub fn parse(number: usize, line: &str) -> Option<Self> {
        let raw = line.trim_end();
        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            return None;
        }

        let kind = if raw.starts_with("## ") {
            LineKind::TopHeading
        } else if raw.starts_with("***") {
            LineKind::SectionBreak
        } else if trimmed.starts_with("* ") {
            LineKind::Bullet
        } else {
            LineKind::Other
        };

        let title = MARKER_RE.replace(trimmed, "").trim().to_string();
        let link = LinkTarget::parse(&title);

        Some(Self {
            number,
            raw: raw.to_string(),
            indent_level: indent_level(raw),
            kind,
            title,
            link,
        })
    }

    /// Document depth a bullet at this indentation belongs to.
    ///
    /// Unindented bullets belong to chapter documents (depth 1), so depth is
    /// one more than the indentation level.
    pub fn nesting_depth(&self) -> usize {
        self.indent_level + 1
    }

    /// Label shown for this line: the link text if there is a link.
    pub fn display_title(&self) -> &str {
        self.link
            .as_ref()
            .map(|l| l.title.as_str())
            .unwrap_or(&self.title)
    }
}

fn indent_level(raw: &str) -> usize {
    let columns: usize = raw
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { INDENT_UNIT } else { 1 })
        .sum();
    columns / INDENT_UNIT
}

/// Lex a whole outline, dropping blank lines.
pub fn lex(text: &str) -> Vec<OutlineLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| OutlineLine::parse(i + 1, line))
        .collect()
}

/// Forward cursor over lexed lines with a single pushback slot.
///
/// [`push_back`](Self::push_back) re-presents the line most recently returned
/// by [`next_line`](Self::next_line). Only that line can be pushed back, and
/// only once per read, which keeps every rewind paired with a read.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: &'a [OutlineLine],
    pos: usize,
    can_push_back: bool,
}

impl<'a> LineCursor<'a> {
    pub fn new(lines: &'a [OutlineLine]) -> Self {
        Self {
            lines,
            pos: 0,
            can_push_back: false,
        }
    }

    /// Return the next line and advance.
    pub fn next_line(&mut self) -> Option<&'a OutlineLine> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        self.can_push_back = true;
        Some(line)
    }

    /// Hand the last line returned by `next_line` back, so the following
    /// `next_line` returns it again.
    ///
    /// # Panics
    ///
    /// Panics if no line was read since the last pushback.
    pub fn push_back(&mut self) {
        assert!(
            self.can_push_back,
            "push_back without a preceding next on the outline cursor"
        );
        self.pos -= 1;
        self.can_push_back = false;
    }

    /// Index of the line `next_line` would return.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.lines.len()
    }
}
