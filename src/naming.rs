//! Filename and link-url conventions shared by the copy, rewrite and asset stages.
//!
//! ## Hidden pages
//!
//! A page whose frontmatter says `hidden: true` is copied under a name the
//! navigation `ignore` glob matches:
//! - `draft.md` → `draft.hidden.md`
//! - `notes` → `notes.hidden`
//!
//! ## Renamed images
//!
//! GitBook stores uploads under their original (often unwieldy, percent-encoded)
//! names. Images are renumbered in the order they are first seen:
//! - `Screenshot 2024-01-01 at 10.00.png` → `image-1.png`
//! - `diagram%20v2.svg` → `image-2.svg`

/// Infix inserted before the extension of hidden pages.
pub const HIDDEN_INFIX: &str = "hidden";

/// Name a hidden page is written under.
pub fn hidden_page_name(file_name: &str) -> String {
    match split_extension(file_name) {
        (stem, Some(ext)) => format!("{stem}.{HIDDEN_INFIX}.{ext}"),
        (stem, None) => format!("{stem}.{HIDDEN_INFIX}"),
    }
}

/// Name of the `index`-th renamed image (1-based), keeping the original extension.
pub fn renamed_image(index: usize, original: &str) -> String {
    match split_extension(file_name(original)) {
        (_, Some(ext)) => format!("image-{index}.{ext}"),
        (_, None) => format!("image-{index}"),
    }
}

/// Split `name.ext` into stem and extension. Dotfiles have no extension.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(dot) => (&name[..dot], Some(&name[dot + 1..])),
    }
}

/// Last `/`-separated segment of a url path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Everything before the last `/`, or `""` for a bare name.
pub fn parent_dir(path: &str) -> &str {
    path.rfind('/').map(|i| &path[..i]).unwrap_or("")
}

/// Join a parent directory and a name with `/`, skipping an empty parent.
pub fn join(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// A markdown link url split into directory, file and anchor.
///
/// `../guide/page.md#setup` → path=`../guide/`, filename=`page.md`, anchor=`#setup`.
/// The three parts always concatenate back to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUrl<'a> {
    /// Directory part including the trailing `/`, or empty.
    pub path: &'a str,
    /// File part, empty for folder links like `guide/`.
    pub filename: &'a str,
    /// Anchor including the leading `#`, or empty.
    pub anchor: &'a str,
}

pub fn split_link_url(url: &str) -> LinkUrl<'_> {
    let (location, anchor) = match url.find('#') {
        Some(hash) => url.split_at(hash),
        None => (url, ""),
    };
    let (path, filename) = match location.rfind('/') {
        Some(slash) => location.split_at(slash + 1),
        None => ("", location),
    };
    LinkUrl {
        path,
        filename,
        anchor,
    }
}

/// True for urls that carry a scheme (`https:`, `mailto:`), i.e. point off-site.
pub fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    // One-letter schemes would be Windows drive letters.
    scheme.len() > 1
        && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Drop markdown backslash escapes: `C\# Basics` → `C# Basics`.
pub fn unescape_markdown(text: &str) -> String {
    text.replace('\\', "")
}
