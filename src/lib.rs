//! # gitbook2mkdocs
//!
//! Converts a GitBook source tree into a tree MkDocs (Material theme, with the
//! awesome-nav plugin) can build. GitBook keeps navigation in one `SUMMARY.md`
//! and page markup in Liquid-style `{% … %}` blocks; MkDocs wants one
//! navigation file per directory and admonitions, tabs and plain HTML.
//!
//! # Architecture: One Pass, Five Stages
//!
//! ```text
//! 1. Copy      src/             →  docs/              (tree copy, hidden pages renamed)
//! 2. Rewrite   docs/**/*.md     →  docs/**/*.md       (markup rules, asset references collected)
//! 3. Navigate  src/SUMMARY.md   →  docs/**/.nav.yml   (outline → per-directory documents)
//! 4. Assets    .gitbook/assets/ →  docs/assets/       (renamed copies + assets.json)
//! 5. Extra     extra/           →  docs/              (verbatim overlay)
//! ```
//!
//! The rewrite stage is the only one that carries state forward: the
//! [`rewrite::Rewriter`] accumulates an [`assets::AssetMap`] while it walks the
//! pages, and stage 4 consumes it. Navigation is independent of page content
//! and can run on its own (`gitbook2mkdocs nav`).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`outline`] | `SUMMARY.md` line lexer and the pushback cursor the parser reads from |
//! | [`nav`] | Recursive-descent outline parser producing one document per directory |
//! | [`emit`] | Writes navigation documents as `.nav.yml` files, in parallel |
//! | [`rewrite`] | GitBook markup rules, applied page by page |
//! | [`assets`] | Asset rename map, `assets.json` manifest, asset copying |
//! | [`files`] | Source tree copy, frontmatter, hidden pages, extra files |
//! | [`naming`] | Link URL splitting and file naming conventions |
//! | [`convert`] | The pipeline tying the stages together |
//! | [`config`] | `gitbook2mkdocs.toml` loading, validation, stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Directory-Keyed Navigation
//!
//! GitBook chapters are headings in a single outline; awesome-nav reads a file
//! per directory. The parser keys every document by the directory its pages
//! live in, so two outline sections pointing at the same directory merge into
//! one file instead of overwriting each other.
//!
//! ## Code Is Never Rewritten
//!
//! Fenced code blocks are swapped for placeholders before any markup rule runs
//! and restored afterwards. Liquid syntax inside a code sample stays exactly as
//! written.
//!
//! ## Rules Are Data
//!
//! Each markup rule is a [`rewrite::Rule`] value with a fixed position in the
//! pipeline. Configuration selects which rules run, never their order, so a
//! config file cannot produce output the rules were not written to expect.

pub mod assets;
pub mod config;
pub mod convert;
pub mod emit;
pub mod files;
pub mod naming;
pub mod nav;
pub mod outline;
pub mod output;
pub mod rewrite;

#[cfg(test)]
pub(crate) mod test_helpers;
