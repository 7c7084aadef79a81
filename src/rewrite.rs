//! Inline markup rewriting: GitBook directives → MkDocs Material syntax.
//!
//! Every page body passes through a [`Rewriter`], which applies a fixed
//! sequence of regex rules. Each [`Rule`] can be switched off in the config;
//! the sequence itself never changes.
//!
//! | Rule | GitBook | MkDocs |
//! |------|---------|--------|
//! | `code` | `{% code title="a.cs" lineNumbers="true" %}` around a fence | ```` ``` cs title="a.cs" linenums="1" ```` |
//! | `hint` | `{% hint style="info" %}…{% endhint %}` | `!!! info` + indented body |
//! | `tab` | `{% tab title="A" %}…{% endtab %}` | `=== "A"` + indented body |
//! | `embed_yt` | `{% embed url="https://youtu.be/ID" %}` | YouTube `<iframe>` |
//! | `embed` | `{% embed url="…" %}` | link `<div class="embed">` |
//! | `link` | `[x](guide/)`, `[x](page.md#v1.2)` | `[x](guide/README.md)`, `[x](page.md#v12)` |
//! | `mark` | `<mark style="…">`code`</mark>` | `` `code` `` |
//! | `tag` | `\<h1>` | `<h1\>` |
//! | `quote` | `>    indented` | `> &nbsp;&nbsp;&nbsp;indented` |
//! | `images` | `![a](<x.png>)`, `<figure>`, `<img>` | `![a](image-N.png)` + `/// caption` |
//! | `file` | `{% file src="x.pdf" %}` | `!!! file` admonition |
//! | `listitem` | 2-space nested lists | 4-space nested lists |
//!
//! Fenced code blocks are swapped out for placeholders before the rules run
//! and restored afterwards, so directives quoted inside code survive. A block
//! whose placeholder was indented by a rule (inside a hint, say) gets the
//! same extra indentation on each of its lines.

use crate::assets::AssetMap;
use crate::config::ConvertConfig;
use crate::naming;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// A named rewrite rule. Declaration order is execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Code,
    Hint,
    Tab,
    EmbedYt,
    Embed,
    Link,
    Mark,
    Tag,
    Quote,
    Images,
    File,
    Listitem,
}

impl Rule {
    /// Every rule, in execution order.
    pub const ALL: &'static [Rule] = &[
        Rule::Code,
        Rule::Hint,
        Rule::Tab,
        Rule::EmbedYt,
        Rule::Embed,
        Rule::Link,
        Rule::Mark,
        Rule::Tag,
        Rule::Quote,
        Rule::Images,
        Rule::File,
        Rule::Listitem,
    ];

    /// Rules enabled by default: all but `listitem`.
    pub const DEFAULT: &'static [Rule] = &[
        Rule::Tag,
        Rule::Hint,
        Rule::Tab,
        Rule::EmbedYt,
        Rule::Embed,
        Rule::Code,
        Rule::Mark,
        Rule::Link,
        Rule::Quote,
        Rule::Images,
        Rule::File,
    ];

    /// Rules that see page links after the asset directory swap.
    fn reads_asset_paths(self) -> bool {
        self >= Rule::Images
    }
}

// =========================================================================
// Patterns
// =========================================================================

macro_rules! pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect(concat!(stringify!($name), " must compile")));
    };
}

pattern!(
    CODE_RE,
    r#"(?s)\{% code ?(?:title="(?P<title>[^"]*)" ?)?(?:lineNumbers="(?P<linenums>[^"]*)" ?)?%\}\n```(?P<language>[^\n]*)\n(?P<code>.*?)```\n\{% endcode %\}"#
);
pattern!(CODE_BLOCK_RE, r"(?s)(?P<indent>[ ]*)```(?P<content>.*?)```");
pattern!(
    PLACEHOLDER_RE,
    r"(?P<indent>[ ]*)```g2m-code-(?P<index>\d+)```"
);
pattern!(
    HINT_RE,
    r#"(?s)\{% hint style="(?P<style>[^"]*)" %\}\n?(?P<content>.*?)\n?\{% endhint %\}"#
);
pattern!(
    TAB_RE,
    r#"(?s)\{% tab title="(?P<title>[^"]*)" %\}\n?(?P<content>.*?)\n?\{% endtab %\}"#
);
pattern!(
    EMBED_YT_RE,
    r#"\{% embed url="https://(?:www\.)?youtu[^/"]*/(?:watch\?v=)?(?P<video>[^"]*)" %\}"#
);
pattern!(EMBED_RE, r#"\{% embed url="(?P<url>[^"]*)" %\}"#);
pattern!(LINK_RE, r"\[(?P<text>[^\]\n]*)\]\((?P<url>[^)\s]*)\)");
pattern!(MARK_RE, r"<mark[^>]*>(?P<content>`[^`\n]*`)</mark>");
pattern!(TAG_RE, r"\\<(?P<tag>[^>\n]*)>");
pattern!(QUOTE_RE, r"(?m)^> (?P<indent> *)(?P<content>.+)$");
pattern!(
    MD_IMAGE_RE,
    r"!\[(?P<alt>[^\]\n]*)\]\(<?(?P<src>[^)>\n]*)>?\)"
);
pattern!(
    FIGURE_RE,
    r#"(?s)<figure>\s*<img src="<?(?P<src>[^">]*)>?" alt="(?P<alt>[^"]*)"[^>]*>\s*(?:<figcaption>(?P<caption>.*?)</figcaption>)?\s*</figure>"#
);
pattern!(IMG_RE, r#"<img src="(?P<src>[^"]*)" alt="(?P<alt>[^"]*)"[^>]*>"#);
pattern!(
    FILE_RE,
    r#"\{% file src="(?P<src>[^"]*)" %\}(?:\n(?P<caption>[^\n]*)\n\{% endfile %\})?"#
);
pattern!(LISTITEM_RE, r"(?m)^(?P<indent> +)(?P<marker>[*+-]|\d+\.) ");
pattern!(PARAGRAPH_RE, r"</?p>");

/// GitBook wrappers that have no MkDocs counterpart.
const REMOVALS: &[&str] = &[
    "{% tabs %}\n",
    "{% endtabs %}\n",
    "{% endembed %}\n",
    "<div>",
    "</div>",
];

const YOUTUBE_IFRAME_ATTRS: &str = r#"title="YouTube video player" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture" allowfullscreen"#;

/// Prefix every line that is not blank.
fn indent(text: &str, prefix: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect()
}

const BODY_INDENT: &str = "    ";

// =========================================================================
// Rewriter
// =========================================================================

/// Applies the enabled rules to page bodies and collects referenced assets.
///
/// One rewriter is shared by all pages of a run, so image numbering is
/// global to the converted tree.
#[derive(Debug, Clone)]
pub struct Rewriter {
    rules: Vec<Rule>,
    index_file: String,
    asset_source_dir: String,
    asset_target_dir: String,
    assets: AssetMap,
}

impl Rewriter {
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            rules: config.rewrite.active_rules(),
            index_file: config.nav.index_file.clone(),
            asset_source_dir: config.assets.source_dir.clone(),
            asset_target_dir: config.assets.target_dir.clone(),
            assets: AssetMap::new(),
        }
    }

    pub fn assets(&self) -> &AssetMap {
        &self.assets
    }

    pub fn into_assets(self) -> AssetMap {
        self.assets
    }

    fn enabled(&self, rule: Rule) -> bool {
        self.rules.contains(&rule)
    }

    /// Rewrite one page body.
    pub fn rewrite(&mut self, text: &str) -> String {
        let mut text = if self.enabled(Rule::Code) {
            CODE_RE.replace_all(text, code_fence).into_owned()
        } else {
            text.to_string()
        };

        let mut blocks = Vec::new();
        text = CODE_BLOCK_RE
            .replace_all(&text, |caps: &Captures| {
                let index = blocks.len();
                blocks.push((caps["indent"].to_string(), caps["content"].to_string()));
                format!("{}```g2m-code-{index}```", &caps["indent"])
            })
            .into_owned();

        text = text.replace("&#x20;", " ");
        for removal in REMOVALS {
            text = text.replace(removal, "");
        }

        let mut swapped = false;
        let rules: Vec<Rule> = self.rules.iter().copied().filter(|r| *r != Rule::Code).collect();
        for rule in rules {
            if rule.reads_asset_paths() && !swapped {
                text = text.replace(&self.asset_source_dir, &self.asset_target_dir);
                swapped = true;
            }
            text = self.apply(rule, &text);
        }
        if !swapped {
            text = text.replace(&self.asset_source_dir, &self.asset_target_dir);
        }

        text = text.replace("\\\n", "  \n");

        PLACEHOLDER_RE
            .replace_all(&text, |caps: &Captures| restore_block(caps, &blocks))
            .into_owned()
    }

    fn apply(&mut self, rule: Rule, text: &str) -> String {
        match rule {
            Rule::Code => text.to_string(),
            Rule::Hint => HINT_RE
                .replace_all(text, |caps: &Captures| {
                    format!("!!! {}\n{}", &caps["style"], indent(&caps["content"], BODY_INDENT))
                })
                .into_owned(),
            Rule::Tab => TAB_RE
                .replace_all(text, |caps: &Captures| {
                    format!("=== \"{}\"\n{}", &caps["title"], indent(&caps["content"], BODY_INDENT))
                })
                .into_owned(),
            Rule::EmbedYt => EMBED_YT_RE
                .replace_all(text, |caps: &Captures| {
                    format!(
                        r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/{}" {YOUTUBE_IFRAME_ATTRS}></iframe>"#,
                        &caps["video"]
                    )
                })
                .into_owned(),
            Rule::Embed => EMBED_RE
                .replace_all(
                    text,
                    r#"<div class="embed"><i class="fas fa-link"></i><a href="$url">$url</a></div>"#,
                )
                .into_owned(),
            Rule::Link => {
                let index_file = &self.index_file;
                LINK_RE
                    .replace_all(text, |caps: &Captures| {
                        format!("[{}]({})", &caps["text"], local_link(&caps["url"], index_file))
                    })
                    .into_owned()
            }
            Rule::Mark => MARK_RE.replace_all(text, "$content").into_owned(),
            Rule::Tag => TAG_RE.replace_all(text, r"<$tag\>").into_owned(),
            Rule::Quote => QUOTE_RE
                .replace_all(text, |caps: &Captures| {
                    format!("> {}{}", "&nbsp;".repeat(caps["indent"].len()), &caps["content"])
                })
                .into_owned(),
            Rule::Images => {
                let mut text = text.to_string();
                for re in [&*MD_IMAGE_RE, &*FIGURE_RE, &*IMG_RE] {
                    text = re
                        .replace_all(&text, |caps: &Captures| self.image(caps))
                        .into_owned();
                }
                text
            }
            Rule::File => FILE_RE
                .replace_all(text, |caps: &Captures| self.file(caps))
                .into_owned(),
            Rule::Listitem => LISTITEM_RE
                .replace_all(text, |caps: &Captures| {
                    format!("{0}{0}{1} ", &caps["indent"], &caps["marker"])
                })
                .into_owned(),
        }
    }

    fn image(&mut self, caps: &Captures) -> String {
        let src = &caps["src"];
        let alt = &caps["alt"];
        let target = if naming::has_scheme(src) {
            src.to_string()
        } else {
            let renamed = self.assets.rename_image(naming::file_name(src));
            naming::join(naming::parent_dir(src), &renamed)
        };

        let caption = caps
            .name("caption")
            .map(|c| PARAGRAPH_RE.replace_all(c.as_str(), "").trim().to_string())
            .unwrap_or_default();
        if caption.is_empty() {
            format!("![{alt}]({target})")
        } else {
            format!("![{alt}]({target})\n/// caption\n{caption}\n///")
        }
    }

    fn file(&mut self, caps: &Captures) -> String {
        let src = &caps["src"];
        let name = naming::file_name(src);
        if !naming::has_scheme(src) {
            self.assets.record_file(name);
        }
        match caps.name("caption") {
            Some(caption) => format!("!!! file\n    [{name}]({src})\n    {}", caption.as_str()),
            None => format!("!!! file\n    [{name}]({src})"),
        }
    }
}

fn code_fence(caps: &Captures) -> String {
    let mut fence = String::from("```");
    let language = caps["language"].trim();
    if !language.is_empty() {
        fence.push(' ');
        fence.push_str(language);
    }
    if let Some(title) = caps.name("title") {
        fence.push_str(&format!(" title=\"{}\"", title.as_str()));
    }
    if caps.name("linenums").is_some_and(|m| m.as_str() == "true") {
        fence.push_str(" linenums=\"1\"");
    }
    format!("{fence}\n{}```", &caps["code"])
}

/// Point folder links at their index page and drop periods from anchors.
fn local_link(url: &str, index_file: &str) -> String {
    if url.is_empty() || naming::has_scheme(url) {
        return url.to_string();
    }
    if url.starts_with('#') {
        return url.replace('.', "");
    }
    let parts = naming::split_link_url(url);
    let filename = if parts.filename.is_empty() {
        index_file
    } else {
        parts.filename
    };
    format!("{}{}{}", parts.path, filename, parts.anchor.replace('.', ""))
}

fn restore_block(caps: &Captures, blocks: &[(String, String)]) -> String {
    let indent = &caps["indent"];
    let Some((original_indent, content)) = caps["index"]
        .parse::<usize>()
        .ok()
        .and_then(|i| blocks.get(i))
    else {
        return caps[0].to_string();
    };

    let added = " ".repeat(indent.len().saturating_sub(original_indent.len()));
    let block = format!("```{content}```");
    let mut lines = block.split_inclusive('\n');
    let mut restored = format!("{indent}{}", lines.next().unwrap_or_default());
    for line in lines {
        if !added.is_empty() && !line.trim().is_empty() {
            restored.push_str(&added);
        }
        restored.push_str(line);
    }
    restored
}
