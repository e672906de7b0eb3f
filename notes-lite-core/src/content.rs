//! Title, tag and snippet derivation from rich-text content.
//!
//! Content is an HTML fragment produced by a rich-text editor. Everything
//! here is a pure function of that string.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Title shown for notes without any text
pub const PLACEHOLDER_TITLE: &str = "New Note";

/// Maximum title length in characters
pub const TITLE_MAX_CHARS: usize = 160;

/// Maximum snippet length in characters
pub const SNIPPET_MAX_CHARS: usize = 120;

/// Elements whose boundaries start a new line in the text rendering.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "br",
    "dd",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tr",
    "ul",
];

/// Elements whose body is not text.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// Longest entity reference looked at, `&` and `;` included.
const ENTITY_MAX_LEN: usize = 12;

/// `#tag` preceded by start of text or whitespace.
static TAG_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([\p{L}\p{N}_-]+)").ok());

/// Text rendering of an HTML fragment.
///
/// Markup is dropped, block boundaries become `\n`, `script`/`style`
/// bodies and comments are skipped and character references are decoded.
/// A `<` that does not open a well-formed tag is kept as text.
pub fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(pos) = rest.find(['<', '&']) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if rest.starts_with('&') {
            match decode_entity(rest) {
                Some((c, consumed)) => {
                    out.push(c);
                    rest = &rest[consumed..];
                }
                None => {
                    out.push('&');
                    rest = &rest[1..];
                }
            }
            continue;
        }

        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            continue;
        }

        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            continue;
        }

        let Some(tag) = parse_tag(rest) else {
            out.push('<');
            rest = &rest[1..];
            continue;
        };

        if BLOCK_TAGS.contains(&tag.name.as_str()) {
            out.push('\n');
        }
        rest = &rest[tag.len..];

        if !tag.closing && RAW_TEXT_TAGS.contains(&tag.name.as_str()) {
            let close = format!("</{}", tag.name);
            rest = rest
                .to_ascii_lowercase()
                .find(&close)
                .map_or("", |end| &rest[end..]);
        }
    }

    out.push_str(rest);
    out
}

/// First non-blank line of the text rendering, trimmed and truncated to
/// [`TITLE_MAX_CHARS`]. Empty when the content has no text.
pub fn title_from(html: &str) -> String {
    let text = plain_text(html).replace('\r', "");
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.chars().take(TITLE_MAX_CHARS).collect())
        .unwrap_or_default()
}

/// [`title_from`] or [`PLACEHOLDER_TITLE`].
pub fn display_title(html: &str) -> String {
    let title = title_from(html);
    if title.is_empty() {
        PLACEHOLDER_TITLE.to_string()
    } else {
        title
    }
}

/// Hashtags in `text`: lowercase, deduplicated, first-seen order.
pub fn extract_tags(text: &str) -> Vec<String> {
    let Some(pattern) = TAG_PATTERN.as_ref() else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Tags of a note from its display title and plain text.
pub fn derive_tags(title: &str, plain: &str) -> Vec<String> {
    extract_tags(&format!("{title} {plain}"))
}

/// Whitespace-collapsed start of the text rendering.
pub fn snippet(html: &str) -> String {
    plain_text(html)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(SNIPPET_MAX_CHARS)
        .collect()
}

struct Tag {
    name: String,
    closing: bool,
    /// Byte length of the whole tag, `<` to `>`
    len: usize,
}

/// Parses the tag at the start of `s` (which begins with `<`).
fn parse_tag(s: &str) -> Option<Tag> {
    let bytes = s.as_bytes();
    let closing = bytes.get(1) == Some(&b'/');
    let name_start = if closing { 2 } else { 1 };

    if !bytes.get(name_start)?.is_ascii_alphabetic() {
        return None;
    }

    let mut i = name_start;
    while bytes.get(i).is_some_and(u8::is_ascii_alphanumeric) {
        i += 1;
    }
    let name = s[name_start..i].to_ascii_lowercase();

    let mut quote = None;
    while let Some(&b) = bytes.get(i) {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => {
                return Some(Tag {
                    name,
                    closing,
                    len: i + 1,
                });
            }
            None => {}
        }
        i += 1;
    }

    None
}

/// Decodes the character reference at the start of `s` (which begins with
/// `&`). Returns the character and the bytes consumed.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let (end, _) = s
        .char_indices()
        .take(ENTITY_MAX_LEN)
        .find(|&(_, c)| c == ';')?;
    let body = &s[1..end];

    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let num = body.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };

    Some((c, end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_breaks_blocks_and_strips_markup() {
        let html = "<div>One <b>bold</b></div><p class=\"x\">Two<br>Three</p>";
        assert_eq!(plain_text(html), "\nOne bold\n\nTwo\nThree\n");
    }

    #[test]
    fn plain_text_decodes_entities() {
        assert_eq!(plain_text("a &amp; b &lt;c&gt; &#35;x &#x41;"), "a & b <c> #x A");
        assert_eq!(plain_text("AT&T &bogus; &"), "AT&T &bogus; &");
    }

    #[test]
    fn plain_text_skips_scripts_and_comments() {
        let html = "<style>p{}</style>a<!-- hidden -->b<SCRIPT>if (x<y) {}</SCRIPT>c";
        assert_eq!(plain_text(html), "abc");
    }

    #[test]
    fn plain_text_keeps_stray_angle_brackets() {
        assert_eq!(plain_text("1 < 2 and 3 <4"), "1 < 2 and 3 <4");
        assert_eq!(plain_text("<a title=\"x>y\">link</a>"), "link");
    }

    #[test]
    fn title_is_first_non_blank_line() {
        assert_eq!(title_from("<div>  </div><div>  Hello #World </div><div>x</div>"), "Hello #World");
        assert_eq!(title_from("line one\r\nline two"), "line one");
        assert_eq!(title_from("<p></p>"), "");
    }

    #[test]
    fn title_is_truncated_by_chars() {
        let long = "é".repeat(TITLE_MAX_CHARS + 40);
        let title = title_from(&long);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn display_title_falls_back_to_placeholder() {
        assert_eq!(display_title(""), PLACEHOLDER_TITLE);
        assert_eq!(display_title("<div><br></div>"), PLACEHOLDER_TITLE);
        assert_eq!(display_title("<div>Hi</div>"), "Hi");
    }

    #[test]
    fn tags_need_leading_whitespace() {
        assert_eq!(
            extract_tags("#Rust and #rust, mail@x #ok#not #über #a_b-c #"),
            vec!["rust", "ok", "über", "a_b-c"]
        );
    }

    #[test]
    fn hello_world_example() {
        let html = "<div>Hello #World</div>";
        let title = display_title(html);
        assert_eq!(title, "Hello #World");
        assert_eq!(derive_tags(&title, &plain_text(html)), vec!["world"]);
    }

    #[test]
    fn tag_extraction_is_idempotent() {
        let mut note = crate::types::Note::new("u", crate::types::ROOT_FOLDER_ID, -1);
        note.set_content("<p>Plan #Work</p><p>#home #work #Home</p>");
        assert_eq!(note.tags, vec!["work", "home"]);

        let again = derive_tags(&note.title, &note.plain_text());
        assert_eq!(again, note.tags);
    }

    #[test]
    fn snippet_collapses_whitespace() {
        assert_eq!(snippet("<div>a</div>\n\n<div>b   c</div>"), "a b c");
        assert_eq!(snippet(&"x ".repeat(200)).chars().count(), SNIPPET_MAX_CHARS);
    }
}
