//! Text helpers shared by the Markdown pages

/// Cancel Markdown emphasis by escaping `*`, `_` and backticks.
///
/// # Examples
///
/// ```
/// use mikedoc::utils::text::escape_emphasis;
///
/// assert_eq!(escape_emphasis("my_func"), "my\\_func");
/// ```
pub fn escape_emphasis(text: &str) -> String {
    text.replace('*', "\\*")
        .replace('_', "\\_")
        .replace('`', "\\`")
}

/// Replace non-printable characters with `\xNN` escapes.
///
/// Line feeds are escaped as well.
pub fn escape_unprintable(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            result.push_str(&format!("\\x{:02x}", c as u32));
        } else {
            result.push(c);
        }
    }
    result
}

/// Anchor for a section title: `#` followed by the lower-cased title with
/// whitespace turned into hyphens.
///
/// # Examples
///
/// ```
/// use mikedoc::utils::text::urlify_section_title;
///
/// assert_eq!(urlify_section_title("Fields table"), "#fields-table");
/// ```
pub fn urlify_section_title(title: &str) -> String {
    let mut anchor = String::from("#");
    for c in title.chars() {
        if c.is_whitespace() {
            anchor.push('-');
        } else {
            anchor.extend(c.to_lowercase());
        }
    }
    anchor
}

/// First paragraph of a description, flattened to one line and truncated
pub fn short_description(description: &str, length: usize) -> String {
    if description.is_empty() {
        return String::new();
    }
    let first = description
        .split("\n\n")
        .next()
        .unwrap_or_default()
        .replace('\n', " ");
    truncate(&first, length)
}

/// Truncate to `length` characters, appending `...` when something was cut
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() > length {
        let mut cut: String = text.chars().take(length).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// Flatten a multi-line text for a table cell
pub fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}

/// Drop the receiver (first parameter) from a method signature, giving the
/// signature a caller sees: `(self, arg)` becomes `(arg)`.
///
/// Signatures without a parenthesized parameter list come back unchanged.
pub fn drop_receiver(signature: &str) -> String {
    let Some(params) = signature.strip_prefix('(') else {
        return signature.to_string();
    };
    match params.find(|c| c == ',' || c == ')') {
        Some(end) if !params[..end].trim().is_empty() => {
            let rest = params[end..].strip_prefix(',').unwrap_or(&params[end..]);
            format!("({}", rest.trim_start())
        }
        _ => signature.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_receiver() {
        assert_eq!(drop_receiver("(self, arg, name='alex')"), "(arg, name='alex')");
        assert_eq!(drop_receiver("(self)"), "()");
        assert_eq!(drop_receiver("(self) -> None"), "() -> None");
        assert_eq!(drop_receiver("()"), "()");
        assert_eq!(drop_receiver("<builtin>"), "<builtin>");
    }

    #[test]
    fn test_escape_emphasis() {
        assert_eq!(escape_emphasis("__init__"), "\\_\\_init\\_\\_");
        assert_eq!(escape_emphasis("a*b`c"), "a\\*b\\`c");
    }

    #[test]
    fn test_escape_unprintable() {
        assert_eq!(escape_unprintable("a\nb"), "a\\x0ab");
        assert_eq!(escape_unprintable("plain"), "plain");
    }

    #[test]
    fn test_urlify_section_title() {
        assert_eq!(
            urlify_section_title("MyProject API Reference"),
            "#myproject-api-reference"
        );
        assert_eq!(urlify_section_title("my_func"), "#my_func");
    }

    #[test]
    fn test_short_description() {
        assert_eq!(short_description("", 10), "");
        assert_eq!(
            short_description("First line\nsame paragraph\n\nSecond paragraph", 100),
            "First line same paragraph"
        );
        assert_eq!(short_description("abcdefghij", 4), "abcd...");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("héllo", 5), "héllo");
        assert_eq!(truncate("héllo", 2), "hé...");
    }
}
