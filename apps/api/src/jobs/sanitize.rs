//! Description sanitizer shared by every provider adapter.

/// Maximum description length, in characters, before the ellipsis.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

const ENTITIES: [(&str, &str); 7] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
];

/// Strips markup, decodes a fixed set of entities, collapses whitespace and
/// truncates to `max_chars` characters (appending `...` when truncated).
///
/// Tag stripping is a single pass that drops everything between `<` and `>`.
/// It does not validate markup, so a stray `<` swallows the rest of the text.
/// Entities are decoded after stripping, so escaped markup such as `&lt;p&gt;`
/// comes back as literal `<p>` text. Only real tags are removed.
pub fn sanitize(text: &str, max_chars: usize) -> String {
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            '\n' | '\r' | '\t' if !in_tag => stripped.push(' '),
            _ if !in_tag => stripped.push(c),
            _ => {}
        }
    }

    let mut decoded = stripped;
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = decoded.replace(entity, replacement);
        }
    }

    let collapsed = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() > max_chars {
        let mut truncated: String = collapsed.chars().take(max_chars).collect();
        truncated.push_str(ELLIPSIS);
        truncated
    } else {
        collapsed
    }
}

/// `sanitize` with the standard description bound.
pub fn sanitize_description(text: &str) -> String {
    sanitize(text, DESCRIPTION_MAX_CHARS)
}
