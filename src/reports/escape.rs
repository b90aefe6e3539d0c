//! Escaping utilities for safe report generation.
//!
//! File names and detail-page links come straight from the coverage
//! payload and may contain characters that break HTML or inject markup.
//! Everything taken from the payload MUST be escaped before it is
//! embedded in a report.

/// Escape a string for safe inclusion in HTML content.
///
/// Escapes the following characters:
/// - `&` -> `&amp;`
/// - `<` -> `&lt;`
/// - `>` -> `&gt;`
/// - `"` -> `&quot;`
/// - `'` -> `&#x27;`
///
/// # Examples
///
/// ```
/// use covtree::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<script>alert('xss')</script>.js"),
///     "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;.js");
///
/// assert_eq!(escape_html("src/index.js"), "src/index.js");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in HTML attributes.
///
/// Stricter than content escaping: newlines and tabs are encoded too so
/// they cannot break attribute parsing.
///
/// # Examples
///
/// ```
/// use covtree::reports::escape::escape_html_attr;
///
/// assert_eq!(escape_html_attr("a \"b\".js.html"),
///     "a &quot;b&quot;.js.html");
/// ```
#[must_use]
pub fn escape_html_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a link target, refusing `javascript:` URLs.
///
/// Detail-page links in a payload are relative paths; anything that would
/// execute script is replaced with `#`.
///
/// # Examples
///
/// ```
/// use covtree::reports::escape::escape_href;
///
/// assert_eq!(escape_href("src/index.js.html"), "src/index.js.html");
/// assert_eq!(escape_href(" JavaScript:alert(1)"), "#");
/// ```
#[must_use]
pub fn escape_href(s: &str) -> String {
    let scheme = s.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("data:") {
        return "#".to_string();
    }
    escape_html_attr(s)
}
