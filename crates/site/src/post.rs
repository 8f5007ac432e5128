//! Markdown posts with a leading metadata block.
//!
//! ```text
//! ---
//! title: Hello world
//! date: 2021-03-14
//! category: Notes
//! ---
//!
//! Body in **markdown**.
//! ```
//!
//! The `---` fences are optional; without them the block ends at the first
//! blank line or the first line that is not `key: value`.

use pulldown_cmark::{Options, Parser, html};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields a post must declare before it is rendered.
pub const MANDATORY_FIELDS: [&str; 2] = ["title", "date"];

/// Metadata of one post as declared in its header, plus derived fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostMeta(BTreeMap<String, String>);

impl PostMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// A field that is present and not blank.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.non_empty("title")
    }

    pub fn slug(&self) -> Option<&str> {
        self.non_empty("slug")
    }

    pub fn category(&self) -> Option<&str> {
        self.non_empty("category")
    }

    /// Mandatory fields that are missing or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        MANDATORY_FIELDS
            .into_iter()
            .filter(|field| self.non_empty(field).is_none())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PostMeta {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A post split into its metadata and rendered HTML body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub meta: PostMeta,
    pub html: String,
}

/// Parse a post's metadata block and render its body.
pub fn parse_post(source: &str) -> ParsedPost {
    let (meta, body) = split_metadata(source);
    ParsedPost {
        meta,
        html: render_markdown(body),
    }
}

/// Separate the metadata block from the markdown body.
pub fn split_metadata(source: &str) -> (PostMeta, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut meta = PostMeta::new();
    let mut last_key: Option<String> = None;

    let mut lines = LineCursor::new(source);
    let fenced = lines.peek().is_some_and(|line| line.trim_end() == "---");
    if fenced {
        lines.advance();
    }

    while let Some(line) = lines.peek() {
        let trimmed = line.trim();
        if fenced && trimmed == "---" {
            lines.advance();
            break;
        }
        if trimmed.is_empty() {
            lines.advance();
            if fenced {
                continue;
            }
            break;
        }

        match parse_field(line) {
            Some((key, value)) => {
                meta.set(key, value);
                last_key = Some(key.to_string());
            }
            // Indented lines continue the previous value.
            None if line.starts_with([' ', '\t']) && last_key.is_some() => {
                if let Some(key) = &last_key {
                    let joined = match meta.get(key) {
                        Some(prev) if !prev.is_empty() => format!("{prev} {trimmed}"),
                        _ => trimmed.to_string(),
                    };
                    meta.set(key.clone(), joined);
                }
            }
            None if fenced => log::warn!("Ignoring malformed metadata line: {trimmed}"),
            None => break,
        }
        lines.advance();
    }

    if !fenced && meta.is_empty() {
        return (meta, source);
    }
    (meta, lines.rest())
}

fn parse_field(line: &str) -> Option<(&str, &str)> {
    if line.starts_with([' ', '\t']) {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    let valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    if !valid_key {
        return None;
    }
    let value = value.trim();
    // Folded values (`key: >`) are filled from the indented lines that follow.
    Some((key, if value == ">" { "" } else { value }))
}

/// Render markdown to HTML with tables, footnotes and strikethrough.
pub fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// ASCII, lowercase, hyphen-separated form of `text` for file names.
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}

/// Walks lines of a string while tracking the byte offset of the remainder.
struct LineCursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        let rest = &self.source[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let line = rest.split('\n').next().unwrap_or(rest);
        Some(line.strip_suffix('\r').unwrap_or(line))
    }

    fn advance(&mut self) {
        let rest = &self.source[self.pos..];
        self.pos += rest.find('\n').map_or(rest.len(), |i| i + 1);
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_metadata() {
        let source = "---\ntitle: Hello\ndate: 2021-03-14\n---\n\n# Heading\n";
        let (meta, body) = split_metadata(source);
        assert_eq!(meta.get("title"), Some("Hello"));
        assert_eq!(meta.get("date"), Some("2021-03-14"));
        assert_eq!(body, "\n# Heading\n");
    }

    #[test]
    fn test_unfenced_metadata_ends_at_blank_line() {
        let source = "title: Hello\ncategory: Rust notes\n\nBody: with a colon\n";
        let (meta, body) = split_metadata(source);
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.category(), Some("Rust notes"));
        assert_eq!(body, "Body: with a colon\n");
    }

    #[test]
    fn test_no_metadata() {
        let source = "# Just a heading\n\ntext";
        let (meta, body) = split_metadata(source);
        assert!(meta.is_empty());
        assert_eq!(body, source);
    }

    #[test]
    fn test_value_keeps_inner_colons() {
        let (meta, _) = split_metadata("title: Rust: the good parts\ndate: 2020-01-01 10:30\n\n");
        assert_eq!(meta.title(), Some("Rust: the good parts"));
        assert_eq!(meta.get("date"), Some("2020-01-01 10:30"));
    }

    #[test]
    fn test_folded_value() {
        let source = "---\ntitle: Short\nsummary: >\n    A longer summary\n    over two lines\n---\nBody";
        let (meta, body) = split_metadata(source);
        assert_eq!(meta.get("summary"), Some("A longer summary over two lines"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_and_bom() {
        let source = "\u{feff}---\r\ntitle: Windows\r\ndate: 2022-02-02\r\n---\r\nBody\r\n";
        let (meta, body) = split_metadata(source);
        assert_eq!(meta.title(), Some("Windows"));
        assert_eq!(meta.get("date"), Some("2022-02-02"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_missing_fields() {
        let meta: PostMeta = [("title", "Hi"), ("date", "  ")].into_iter().collect();
        assert_eq!(meta.missing_fields(), vec!["date"]);

        let meta = PostMeta::new();
        assert_eq!(meta.missing_fields(), vec!["title", "date"]);
    }

    #[test]
    fn test_parse_post_renders_markdown() {
        let post = parse_post("title: T\ndate: D\n\nSome *emphasis* and ~~strike~~.\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(post.html.contains("<em>emphasis</em>"));
        assert!(post.html.contains("<del>strike</del>"));
        assert!(post.html.contains("<table>"));
        assert_eq!(post.meta.title(), Some("T"));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Ünïcödé Títle"), "unicode-title");
        assert_eq!(slugify("  Rust  Notes "), "rust-notes");
    }

    #[test]
    fn test_meta_serializes_as_plain_map() {
        let meta: PostMeta = [("title", "Hi"), ("slug", "hi")].into_iter().collect();
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({"title": "Hi", "slug": "hi"}));
    }
}
